//! # Barcode Commands
//!
//! 1D barcodes are configured with three GS settings (height, module width,
//! human-readable text position) and printed with a NUL-terminated payload:
//!
//! ```text
//! GS k m d1 ... dk NUL
//! ```
//!
//! ## Usage
//!
//! ```
//! use termica::protocol::barcode::{self, BarcodeType, BarcodeReadable};
//!
//! let mut data = Vec::new();
//! data.extend(barcode::height(80));
//! data.extend(barcode::width(3));
//! data.extend(barcode::readable(BarcodeReadable::Below));
//! data.extend(barcode::print(b"12345678", BarcodeType::Ean8));
//! ```
//!
//! The payload is passed through untouched. The printer silently refuses
//! payloads that do not suit the symbology.

use super::commands::{GS, NUL};

/// 1D barcode symbologies, numbered for the NUL-terminated `GS k` form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BarcodeType {
    /// UPC-A (11-12 digits)
    UpcA = 0,
    /// UPC-E (11-12 digits, compressed)
    UpcE = 1,
    /// EAN-13 / JAN-13 (12-13 digits)
    Ean13 = 2,
    /// EAN-8 / JAN-8 (7-8 digits)
    Ean8 = 3,
    /// Code39 (A-Z, 0-9, space, -.$/%+)
    Code39 = 4,
    /// Interleaved 2 of 5 (even number of digits)
    Itf = 5,
    /// Codabar / NW-7
    Codabar = 6,
    /// Code93 (full ASCII)
    Code93 = 7,
    /// Code128 (full ASCII)
    Code128 = 8,
    Code11 = 9,
    Msi = 10,
}

/// Where the human-readable digits are printed (GS H n)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BarcodeReadable {
    #[default]
    None = 0,
    Above = 1,
    Below = 2,
    Both = 3,
}

/// Human-readable text position (GS H n)
#[inline]
pub fn readable(position: BarcodeReadable) -> Vec<u8> {
    vec![GS, b'H', position as u8]
}

/// # Barcode Height (GS h n)
///
/// Height in dots. Zero is not a valid height and is raised to 1.
#[inline]
pub fn height(dots: u8) -> Vec<u8> {
    vec![GS, b'h', dots.max(1)]
}

/// # Barcode Module Width (GS w n)
///
/// Only 2 and 3 are accepted by the printer; anything else is clamped.
///
/// ```
/// use termica::protocol::barcode;
///
/// assert_eq!(barcode::width(1), vec![29, 119, 2]);
/// assert_eq!(barcode::width(9), vec![29, 119, 3]);
/// ```
#[inline]
pub fn width(module: u8) -> Vec<u8> {
    vec![GS, b'w', module.clamp(2, 3)]
}

/// # Print Barcode (GS k m data NUL)
///
/// Returns the whole command in one buffer so it can be written as a single
/// unit.
///
/// ## Example
///
/// ```
/// use termica::protocol::barcode::{print, BarcodeType};
///
/// let cmd = print(b"123", BarcodeType::Code39);
/// assert_eq!(cmd, vec![29, 107, 4, b'1', b'2', b'3', 0]);
/// ```
pub fn print(payload: &[u8], kind: BarcodeType) -> Vec<u8> {
    let mut cmd = Vec::with_capacity(4 + payload.len());
    cmd.extend_from_slice(&[GS, b'k', kind as u8]);
    cmd.extend_from_slice(payload);
    cmd.push(NUL);
    cmd
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readable() {
        assert_eq!(readable(BarcodeReadable::None), vec![29, 72, 0]);
        assert_eq!(readable(BarcodeReadable::Both), vec![29, 72, 3]);
    }

    #[test]
    fn test_height_minimum() {
        assert_eq!(height(0), vec![29, 104, 1]);
        assert_eq!(height(1), vec![29, 104, 1]);
        assert_eq!(height(162), vec![29, 104, 162]);
    }

    #[test]
    fn test_width_clamps() {
        assert_eq!(width(0), vec![29, 119, 2]);
        assert_eq!(width(2), vec![29, 119, 2]);
        assert_eq!(width(3), vec![29, 119, 3]);
        assert_eq!(width(4), vec![29, 119, 3]);
    }

    #[test]
    fn test_print_ean8() {
        let cmd = print(b"12345678", BarcodeType::Ean8);
        assert_eq!(&cmd[..3], &[29, 107, 3]);
        assert_eq!(&cmd[3..11], b"12345678");
        assert_eq!(cmd[11], 0);
        assert_eq!(cmd.len(), 12);
    }

    #[test]
    fn test_print_empty_payload() {
        assert_eq!(print(b"", BarcodeType::Code128), vec![29, 107, 8, 0]);
    }
}
