//! # Printer Protocol Implementation
//!
//! This module provides low-level command builders for the ESC/POS dialect
//! spoken by 58mm serial thermal printers (CSN-A2 and compatibles).
//!
//! ## Module Structure
//!
//! - [`commands`]: Control commands (reset, online, heating, density, feed)
//! - [`text`]: Text styling (alignment, bold, underline, reverse, ...)
//! - [`barcode`]: 1D barcode settings and printing
//! - [`graphics`]: Bitmap row printing
//!
//! Every builder is a pure function returning `Vec<u8>`. Writing the bytes
//! and pacing them is the session's job.
//!
//! ## Usage Example
//!
//! ```
//! use termica::protocol::{commands, text, barcode};
//!
//! let mut data = Vec::new();
//! data.extend(commands::reset());
//! data.extend(text::align(text::Alignment::Middle));
//! data.extend(text::bold(true));
//! data.extend(b"RECEIPT\n");
//! data.extend(text::bold(false));
//! data.extend(barcode::print(b"12345678", barcode::BarcodeType::Ean8));
//! data.extend(commands::feed_lines(3));
//! ```

pub mod barcode;
pub mod commands;
pub mod graphics;
pub mod text;
