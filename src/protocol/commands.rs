//! # Printer Control Commands
//!
//! This module implements the control half of the command set spoken by the
//! common 58mm serial thermal printers (CSN-A2 and its many clones): reset,
//! online state, head heating, print density, paper feed.
//!
//! ## Escape Sequence Structure
//!
//! Commands follow these patterns:
//! - Single byte: `LF`
//! - Prefix + selector: `ESC @`
//! - Prefix + selector + parameters: `ESC 7 n1 n2 n3`, `DC2 # n`
//!
//! Every builder returns the complete byte sequence and never fails.
//! Parameters outside the range the printer accepts are clamped.

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// LF (Line Feed) - Print the line buffer and advance one line
pub const LF: u8 = 0x0A;

/// DC2 (Device Control 2) - Prefix for density and bitmap commands
///
/// - Hex: 0x12, Decimal: 18
pub const DC2: u8 = 0x12;

/// ESC (Escape) - Command prefix byte
///
/// Most commands begin with ESC (0x1B). This byte signals the start of a
/// control sequence rather than printable text.
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Used for reverse printing and all barcode settings.
/// - Hex: 0x1D, Decimal: 29
pub const GS: u8 = 0x1D;

/// NUL - terminates variable-length barcode payloads
pub const NUL: u8 = 0x00;

// ============================================================================
// INITIALIZATION
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Clears the print buffer and restores power-on text formatting.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
/// | Decimal | 27 64 |
///
/// ## Example
///
/// ```
/// use termica::protocol::commands;
///
/// assert_eq!(commands::reset(), vec![27, 64]);
/// ```
#[inline]
pub fn reset() -> Vec<u8> {
    vec![ESC, b'@']
}

/// # Set Online / Offline (ESC = n)
///
/// An offline printer ignores everything except this command.
///
/// | Format  | Bytes      |
/// |---------|------------|
/// | Decimal | 27 61 n    |
#[inline]
pub fn online(state: bool) -> Vec<u8> {
    vec![ESC, b'=', state as u8]
}

// ============================================================================
// PRINT HEAD TUNING
// ============================================================================

/// # Heating Parameters (ESC 7 n1 n2 n3)
///
/// Trades print speed against darkness and peak current draw.
///
/// ## Protocol Details
///
/// | Format  | Bytes             |
/// |---------|-------------------|
/// | ASCII   | ESC 7 n1 n2 n3    |
/// | Decimal | 27 55 n1 n2 n3    |
///
/// ## Parameters
///
/// - `dots` (n1): max heating dots, in units of 8 dots minus one.
///   Printer default 7 (64 dots). More dots = faster, more current.
/// - `time` (n2): heating time in 10µs units, 3-255. Printer default 80.
///   Longer = darker but slower; too short prints blank.
/// - `interval` (n3): recovery time between dot groups in 10µs units.
///   Printer default 2. Longer = cleaner but slower.
///
/// ## Example
///
/// ```
/// use termica::protocol::commands;
///
/// assert_eq!(commands::heating(7, 160, 0), vec![27, 55, 7, 160, 0]);
/// ```
#[inline]
pub fn heating(dots: u8, time: u8, interval: u8) -> Vec<u8> {
    vec![ESC, b'7', dots, time, interval]
}

/// # Print Density (DC2 # n)
///
/// Density and break time share one parameter byte:
///
/// ```text
/// bit:   7 6 5 | 4 3 2 1 0
///        break | density
/// ```
///
/// - density: 50% + 5% × n. Clamped to 5 bits (0-31).
/// - break time: n × 250µs. Clamped to 3 bits (0-7).
///
/// ## Example
///
/// ```
/// use termica::protocol::commands;
///
/// // (4 << 5) | 14 = 142
/// assert_eq!(commands::print_density(14, 4), vec![18, 35, 142]);
/// ```
#[inline]
pub fn print_density(density: u8, break_time: u8) -> Vec<u8> {
    let packed = (break_time.min(0x07) << 5) | density.min(0x1F);
    vec![DC2, b'#', packed]
}

/// # Sleep Timer (ESC 8 n)
///
/// Seconds of inactivity before the printer sleeps. The trailing `0xFF`
/// wakes a printer that is already asleep so the command is not lost.
#[inline]
pub fn sleep_time(seconds: u8) -> Vec<u8> {
    vec![ESC, b'8', seconds, 0xFF]
}

/// Enable or disable the paper-feed key on the front panel (ESC c 5 n)
#[inline]
pub fn panel_key(enabled: bool) -> Vec<u8> {
    vec![ESC, b'c', b'5', enabled as u8]
}

// ============================================================================
// PAPER FEED
// ============================================================================

/// Print the line buffer and feed one line (LF)
#[inline]
pub fn feed() -> Vec<u8> {
    vec![LF]
}

/// # Feed n Lines (ESC J n)
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | Decimal | 27 74 n  |
#[inline]
pub fn feed_lines(lines: u8) -> Vec<u8> {
    vec![ESC, b'J', lines]
}

/// Set line spacing in dots (ESC 3 n)
#[inline]
pub fn line_spacing(dots: u8) -> Vec<u8> {
    vec![ESC, b'3', dots]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset() {
        assert_eq!(reset(), vec![27, 64]);
    }

    #[test]
    fn test_online() {
        assert_eq!(online(true), vec![27, 61, 1]);
        assert_eq!(online(false), vec![27, 61, 0]);
    }

    #[test]
    fn test_heating() {
        assert_eq!(heating(11, 120, 40), vec![27, 55, 11, 120, 40]);
    }

    #[test]
    fn test_print_density_packing() {
        assert_eq!(print_density(14, 4), vec![18, 35, (4 << 5) | 14]);
        assert_eq!(print_density(0, 0), vec![18, 35, 0]);
        assert_eq!(print_density(31, 7), vec![18, 35, 0xFF]);
    }

    #[test]
    fn test_print_density_clamps() {
        // Out-of-range fields must not bleed into each other
        assert_eq!(print_density(200, 2), vec![18, 35, (2 << 5) | 31]);
        assert_eq!(print_density(3, 9), vec![18, 35, (7 << 5) | 3]);
    }

    #[test]
    fn test_sleep_time() {
        assert_eq!(sleep_time(30), vec![27, 56, 30, 255]);
    }

    #[test]
    fn test_panel_key() {
        assert_eq!(panel_key(true), vec![27, 99, 53, 1]);
        assert_eq!(panel_key(false), vec![27, 99, 53, 0]);
    }

    #[test]
    fn test_feed() {
        assert_eq!(feed(), vec![10]);
        assert_eq!(feed_lines(3), vec![27, 74, 3]);
    }

    #[test]
    fn test_line_spacing() {
        assert_eq!(line_spacing(24), vec![27, 51, 24]);
    }
}
