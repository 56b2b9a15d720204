//! # Termica - Serial Thermal Printer Driver
//!
//! Termica drives small serial thermal receipt printers (CSN-A2 and its
//! clones, the common 58mm "Adafruit" printer). It provides:
//!
//! - **Protocol implementation**: ESC/POS-style command builders
//! - **Dithering**: Atkinson error diffusion to 1-bit rows
//! - **Print queue**: background worker that streams image rows
//! - **Transport**: serial port and in-memory backends
//!
//! ## Quick Start
//!
//! ```no_run
//! use termica::printer::{PrinterConfig, PrinterSession};
//! use termica::protocol::barcode::BarcodeType;
//!
//! let session = PrinterSession::new(PrinterConfig::CSN_A2);
//! session.open("/dev/ttyUSB0")?;
//!
//! let logo = image::open("logo.png")?.to_rgb8();
//! session.print_image(&logo, 128);
//! session.print_line("Thank you!");
//! session.print_barcode("12345678", BarcodeType::Ean8);
//! session.feed_lines(3);
//!
//! session.wait_until_printed();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | Command byte builders |
//! | [`render`] | Atkinson dithering |
//! | [`transport`] | Communication backends |
//! | [`printer`] | Configuration, queue, and session |
//! | [`error`] | Error types |

pub mod error;
pub mod printer;
pub mod protocol;
pub mod render;
pub mod transport;

// Re-exports for convenience
pub use error::TermicaError;
pub use printer::{PrinterConfig, PrinterSession};
pub use transport::SerialTransport;
