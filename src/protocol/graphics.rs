//! # Bitmap Row Command
//!
//! Images are sent one scanline at a time with the DC2 `*` bitmap command,
//! using a height of one row:
//!
//! ```text
//! DC2 * r n d1 ... dn
//! 18  42 1 n  (n = bytes in the row, at most 48)
//! ```
//!
//! ## Bit Packing
//!
//! Each byte carries 8 horizontal dots:
//! - Bit 7 (MSB) = leftmost dot
//! - Bit 0 (LSB) = rightmost dot
//! - 1 = black (print), 0 = white (no print)
//!
//! ## Head Width
//!
//! The print head has 384 dots, so a row is never wider than 48 bytes.
//! Bytes past the 48th are not sent.

use super::commands::DC2;

/// Dots across the print head
pub const HEAD_DOTS: usize = 384;

/// Maximum bytes per bitmap row (384 / 8)
pub const MAX_ROW_BYTES: usize = HEAD_DOTS / 8;

/// Length of the bitmap row header
pub const ROW_HEADER_LEN: usize = 4;

/// # Print One Bitmap Row (DC2 * 1 n data)
///
/// `packed` is the MSB-first dot data for one scanline. It is clipped to
/// [`MAX_ROW_BYTES`].
///
/// ## Example
///
/// ```
/// use termica::protocol::graphics;
///
/// let cmd = graphics::row(&[0xF0, 0x0F]);
/// assert_eq!(cmd, vec![18, 42, 1, 2, 0xF0, 0x0F]);
/// ```
pub fn row(packed: &[u8]) -> Vec<u8> {
    let data = &packed[..packed.len().min(MAX_ROW_BYTES)];

    let mut cmd = Vec::with_capacity(ROW_HEADER_LEN + data.len());
    cmd.push(DC2);
    cmd.push(b'*');
    cmd.push(1); // one row high
    cmd.push(data.len() as u8);
    cmd.extend_from_slice(data);
    cmd
}

// ============================================================================
// TESTS
// ============================================================================
