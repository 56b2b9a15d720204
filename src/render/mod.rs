//! # Rendering Module
//!
//! Turns images into dot rows the print head can take.
//!
//! ## Modules
//!
//! - [`dither`]: Atkinson error diffusion and row packing
//!
//! ## Usage Example
//!
//! ```
//! use image::{Rgb, RgbImage};
//! use termica::render::dither;
//!
//! let img = RgbImage::from_pixel(384, 10, Rgb([128, 128, 128]));
//! let rows = dither::atkinson(&img, 127);
//!
//! // One row per scanline, 48 bytes each on the wire
//! assert_eq!(rows.len(), 10);
//! assert_eq!(rows[0].byte_len(), 48);
//! ```

pub mod dither;

pub use dither::BitmapRow;
