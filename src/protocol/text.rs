//! # Text Styling Commands
//!
//! Formatting toggles for printed text. The printer is the only holder of the
//! current style: each builder produces the command for one change and nothing
//! is remembered host-side.
//!
//! | Style | Command | Effect |
//! |-------|---------|--------|
//! | Bold | ESC SP n + ESC E n | Emphasized text |
//! | Underline | ESC - n | Underlined text |
//! | Reverse | GS B n | White on black |
//! | Double Width | ESC SO / ESC DC4 | 2x horizontal size |
//! | Upside Down | ESC { n | 180° rotation |
//! | Left Margin | ESC B n | Blank characters on the left |

use super::commands::{ESC, GS};

// ============================================================================
// TEXT ALIGNMENT
// ============================================================================

/// Text alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left = 0,
    Middle = 1,
    Right = 2,
}

/// # Set Text Alignment (ESC a n)
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | ESC a n  |
/// | Decimal | 27 97 n  |
///
/// ## Example
///
/// ```
/// use termica::protocol::text::{align, Alignment};
///
/// assert_eq!(align(Alignment::Middle), vec![27, 97, 1]);
/// ```
pub fn align(alignment: Alignment) -> Vec<u8> {
    vec![ESC, b'a', alignment as u8]
}

// ============================================================================
// EMPHASIS
// ============================================================================

/// # Bold (ESC SP n, ESC E n)
///
/// Two commands are sent: the character spacing selector the printer
/// firmware couples with emphasis, then emphasis itself.
///
/// ## Example
///
/// ```
/// use termica::protocol::text::bold;
///
/// assert_eq!(bold(true), vec![27, 32, 1, 27, 69, 1]);
/// ```
pub fn bold(state: bool) -> Vec<u8> {
    vec![ESC, b' ', state as u8, ESC, b'E', state as u8]
}

/// Underline on/off (ESC - n)
#[inline]
pub fn underline(state: bool) -> Vec<u8> {
    vec![ESC, b'-', state as u8]
}

/// Reverse (white on black) printing (GS B n)
#[inline]
pub fn reverse(state: bool) -> Vec<u8> {
    vec![GS, b'B', state as u8]
}

/// Upside-down printing (ESC { n)
#[inline]
pub fn upside_down(state: bool) -> Vec<u8> {
    vec![ESC, b'{', state as u8]
}

/// # Double Width (ESC SO / ESC DC4)
///
/// The state is carried by the selector byte, not a parameter:
/// 14 (SO) turns double width on, 20 (DC4) turns it off.
#[inline]
pub fn double_width(state: bool) -> Vec<u8> {
    vec![ESC, if state { 14 } else { 20 }]
}

/// Maximum number of blank characters accepted by ESC B
pub const MAX_LEFT_MARGIN: u8 = 47;

/// # Left Margin (ESC B n)
///
/// Number of blank characters printed at the start of each line, clamped to
/// 0-47.
///
/// ```
/// use termica::protocol::text::left_margin;
///
/// assert_eq!(left_margin(100), vec![27, 66, 47]);
/// ```
#[inline]
pub fn left_margin(chars: u8) -> Vec<u8> {
    vec![ESC, b'B', chars.min(MAX_LEFT_MARGIN)]
}

// ============================================================================
// CHARACTER SETS AND CODE TABLES
// ============================================================================

/// International character sets (ESC R n)
///
/// Each set swaps a handful of ASCII positions (`#`, `$`, `@`, `[`...) for
/// national characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharacterSet {
    #[default]
    Usa = 0,
    France = 1,
    Germany = 2,
    Uk = 3,
    Denmark1 = 4,
    Sweden = 5,
    Italy = 6,
    Spain1 = 7,
    Japan = 8,
    Norway = 9,
    Denmark2 = 10,
    Spain2 = 11,
    LatinAmerica = 12,
    Korea = 13,
    SloveniaCroatia = 14,
    China = 15,
}

/// Select international character set (ESC R n)
#[inline]
pub fn character_set(set: CharacterSet) -> Vec<u8> {
    vec![ESC, b'R', set as u8]
}

/// Code tables for bytes 0x80-0xFF (ESC t n)
///
/// Only the tables commonly present in firmware are named; use
/// [`code_table_raw`] for the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodeTable {
    #[default]
    Cp437 = 0,
    Katakana = 1,
    Cp850 = 2,
    Cp860 = 3,
    Cp863 = 4,
    Cp865 = 5,
    Wcp1251 = 6,
    Cp866 = 7,
    Mik = 8,
    Cp755 = 9,
    Iran = 10,
    Cp862 = 15,
    Wcp1252 = 16,
    Wcp1253 = 17,
    Cp852 = 18,
    Cp858 = 19,
    Iran2 = 20,
    Latvian = 21,
    Cp864 = 22,
    Iso8859_1 = 23,
    Cp737 = 24,
    Wcp1257 = 25,
    Thai = 26,
    Cp720 = 27,
    Cp855 = 28,
    Cp857 = 29,
    Wcp1250 = 30,
    Cp775 = 31,
    Wcp1254 = 32,
    Wcp1255 = 33,
    Wcp1256 = 34,
    Wcp1258 = 35,
    Iso8859_2 = 36,
    Iso8859_3 = 37,
    Iso8859_4 = 38,
    Iso8859_5 = 39,
    Iso8859_6 = 40,
    Iso8859_7 = 41,
    Iso8859_8 = 42,
    Iso8859_9 = 43,
    Iso8859_15 = 44,
    Thai2 = 45,
    Cp856 = 46,
    Cp874 = 47,
}

/// Select code table (ESC t n)
#[inline]
pub fn code_table(table: CodeTable) -> Vec<u8> {
    code_table_raw(table as u8)
}

/// Select code table by raw number
#[inline]
pub fn code_table_raw(n: u8) -> Vec<u8> {
    vec![ESC, b't', n]
}

// ============================================================================
// TESTS
// ============================================================================
