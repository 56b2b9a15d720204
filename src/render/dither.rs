//! # Atkinson Error-Diffusion Dithering
//!
//! This module converts continuous-tone images into the 1-bit rows the
//! thermal head prints.
//!
//! ## Algorithm
//!
//! Pixels are visited in raster order (row-major, left to right, top to
//! bottom). For each pixel:
//!
//! 1. brightness = max(r, g, b), lifted by the curve `sqrt(255 * b)` so
//!    midtones do not print too dark on thermal paper
//! 2. darkness = 255 - floor(corrected) + error already diffused into it
//! 3. darkness >= threshold prints a dot and keeps `darkness - threshold` as
//!    residual; otherwise no dot and the whole darkness is residual
//! 4. one eighth of the residual is pushed into six later pixels
//!
//! ```text
//!          [ * ]  1/8   1/8
//!    1/8   1/8    1/8
//!          1/8
//! ```
//!
//! Only 6/8 of the residual is diffused, which keeps highlights and shadows
//! clean compared to Floyd-Steinberg.
//!
//! Neighbours are addressed by linear index (`+1, +2, +w-1, +w, +w+1, +2w`)
//! and skipped only past the end of the buffer. A push off the right edge of
//! one row therefore lands at the start of the next. Output is bit-exact for
//! a given image and threshold, so iteration order is part of the contract.
//!
//! ## Usage Example
//!
//! ```
//! use image::{Rgb, RgbImage};
//! use termica::render::dither;
//!
//! let img = RgbImage::from_pixel(16, 4, Rgb([0, 0, 0]));
//! let rows = dither::atkinson(&img, 128);
//!
//! assert_eq!(rows.len(), 4);
//! assert_eq!(rows[0].packed(), vec![0xFF, 0xFF]);
//! ```

use image::RgbImage;
use rayon::prelude::*;

use crate::protocol::graphics::{HEAD_DOTS, MAX_ROW_BYTES};

/// One scanline of dots, at most [`HEAD_DOTS`] long.
///
/// Rows are immutable once built. Dots past the head width are dropped at
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitmapRow {
    dots: Vec<bool>,
}

impl BitmapRow {
    pub fn new(mut dots: Vec<bool>) -> Self {
        dots.truncate(HEAD_DOTS);
        Self { dots }
    }

    pub fn dots(&self) -> &[bool] {
        &self.dots
    }

    pub fn len(&self) -> usize {
        self.dots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dots.is_empty()
    }

    /// Bytes this row occupies on the wire, `min(ceil(len / 8), 48)`.
    pub fn byte_len(&self) -> usize {
        self.dots.len().div_ceil(8).min(MAX_ROW_BYTES)
    }

    /// MSB-first packed dot data, exactly [`byte_len`](Self::byte_len) bytes.
    pub fn packed(&self) -> Vec<u8> {
        pack_row(&self.dots)
    }
}

/// Pack a row of boolean pixel values into bytes.
///
/// - Bit 7 (MSB) = leftmost pixel
/// - 1 = black (print dot), 0 = white (no dot)
///
/// The last byte is padded with white on the right.
///
/// ```
/// use termica::render::dither::pack_row;
///
/// let row = vec![true, true, false, false, true, false, true, false];
/// assert_eq!(pack_row(&row), vec![0xCA]);
/// assert_eq!(pack_row(&[true; 12]), vec![0xFF, 0xF0]);
/// ```
pub fn pack_row(pixels: &[bool]) -> Vec<u8> {
    let num_bytes = pixels.len().div_ceil(8);
    let mut bytes = vec![0u8; num_bytes];

    for (i, &pixel) in pixels.iter().enumerate() {
        if pixel {
            bytes[i / 8] |= 1 << (7 - (i % 8)); // MSB first
        }
    }

    bytes
}

/// Darkness of a pixel before any diffused error, in 0-255.
///
/// `sqrt(255) * sqrt(b)` is evaluated as `sqrt(255 * b)` so pure white maps
/// to exactly 0.
#[inline]
pub fn base_darkness(r: u8, g: u8, b: u8) -> i32 {
    let brightness = r.max(g).max(b) as f64;
    let corrected = (255.0 * brightness).sqrt().clamp(0.0, 255.0);
    255 - corrected.floor() as i32
}

/// Linear indices receiving a share of the error at `idx`.
///
/// Targets at or past `len` are skipped.
pub fn diffusion_targets(idx: usize, width: usize, len: usize) -> impl Iterator<Item = usize> {
    let offsets = [1, 2, width.wrapping_sub(1), width, width + 1, 2 * width];
    offsets
        .into_iter()
        .filter_map(move |offset| idx.checked_add(offset))
        .filter(move |&target| target < len)
}

/// Dither an RGB image into one [`BitmapRow`] per scanline.
///
/// `threshold` is the darkness (0-255) at which a dot prints. Zero prints
/// every dot, even pure white.
pub fn atkinson(image: &RgbImage, threshold: u8) -> Vec<BitmapRow> {
    let width = image.width() as usize;
    let height = image.height() as usize;
    let len = width * height;
    let threshold = threshold as i32;

    // Independent per pixel, so this part can fan out
    let base: Vec<i32> = image
        .as_raw()
        .par_chunks_exact(3)
        .map(|px| base_darkness(px[0], px[1], px[2]))
        .collect();

    let mut accumulator = vec![0i32; len];
    let mut rows = Vec::with_capacity(height);

    for y in 0..height {
        let mut dots = Vec::with_capacity(width);
        for x in 0..width {
            let idx = y * width + x;
            let darkness = base[idx] + accumulator[idx];

            let residual = if darkness >= threshold {
                dots.push(true);
                darkness - threshold
            } else {
                dots.push(false);
                darkness
            };

            let share = residual / 8;
            if share == 0 {
                continue;
            }
            for target in diffusion_targets(idx, width, len) {
                accumulator[target] += share;
            }
        }
        rows.push(BitmapRow::new(dots));
    }

    rows
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            let v = ((x * 255) / width.max(1)) as u8;
            Rgb([v, v.wrapping_add(y as u8), v / 2])
        })
    }

    #[test]
    fn test_base_darkness_extremes() {
        assert_eq!(base_darkness(255, 255, 255), 0);
        assert_eq!(base_darkness(0, 0, 0), 255);
    }

    #[test]
    fn test_base_darkness_uses_max_channel() {
        assert_eq!(base_darkness(255, 0, 0), 0);
        assert_eq!(base_darkness(0, 0, 255), 0);
    }

    #[test]
    fn test_base_darkness_curve_lifts_midtones() {
        // sqrt(255 * 64) = 127.7...
        assert_eq!(base_darkness(64, 64, 64), 128);
    }

    #[test]
    fn test_white_threshold_zero_marks_every_dot() {
        let img = RgbImage::from_pixel(8, 1, Rgb([255, 255, 255]));
        let rows = atkinson(&img, 0);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].packed(), vec![0xFF]);
    }

    #[test]
    fn test_white_prints_nothing() {
        let img = RgbImage::from_pixel(16, 3, Rgb([255, 255, 255]));
        for row in atkinson(&img, 128) {
            assert_eq!(row.packed(), vec![0x00, 0x00]);
        }
    }

    #[test]
    fn test_black_prints_everything() {
        let img = RgbImage::from_pixel(16, 3, Rgb([0, 0, 0]));
        for row in atkinson(&img, 255) {
            assert_eq!(row.packed(), vec![0xFF, 0xFF]);
        }
    }

    #[test]
    fn test_light_gray_prints_some_dots() {
        let img = RgbImage::from_pixel(32, 32, Rgb([200, 200, 200]));
        let rows = atkinson(&img, 100);
        let on: usize = rows
            .iter()
            .map(|r| r.dots().iter().filter(|&&d| d).count())
            .sum();
        assert!(on > 0, "diffused error should eventually print");
        assert!(on < 32 * 32, "light gray must not print solid");
    }

    #[test]
    fn test_deterministic() {
        let img = gradient(100, 40);
        assert_eq!(atkinson(&img, 127), atkinson(&img, 127));
    }

    #[test]
    fn test_one_row_per_scanline() {
        let img = gradient(10, 7);
        let rows = atkinson(&img, 90);
        assert_eq!(rows.len(), 7);
        assert!(rows.iter().all(|r| r.len() == 10));
    }

    #[test]
    fn test_row_byte_lengths() {
        for width in [1usize, 7, 8, 9, 100, 383, 384, 385, 1000] {
            let row = BitmapRow::new(vec![true; width]);
            let expected = width.div_ceil(8).min(48);
            assert_eq!(row.byte_len(), expected, "width {}", width);
            assert_eq!(row.packed().len(), expected, "width {}", width);
        }
    }

    #[test]
    fn test_wide_image_clipped_to_head() {
        let img = RgbImage::from_pixel(500, 2, Rgb([0, 0, 0]));
        let rows = atkinson(&img, 128);
        assert_eq!(rows[0].len(), HEAD_DOTS);
        assert_eq!(rows[0].packed(), vec![0xFF; 48]);
    }

    #[test]
    fn test_diffusion_targets_interior() {
        let targets: Vec<usize> = diffusion_targets(12, 10, 100).collect();
        assert_eq!(targets, vec![13, 14, 21, 22, 23, 32]);
    }

    #[test]
    fn test_diffusion_targets_skip_past_end() {
        // Last pixel of a 4x2 image has no in-bounds targets
        assert_eq!(diffusion_targets(7, 4, 8).count(), 0);
        // First pixel of the last row only reaches its right-hand neighbours
        let targets: Vec<usize> = diffusion_targets(4, 4, 8).collect();
        assert_eq!(targets, vec![5, 6, 7]);
    }

    #[test]
    fn test_diffusion_never_amplifies() {
        for residual in 0..=512i32 {
            let share = residual / 8;
            for count in 0..=6 {
                assert!(share * count <= residual);
            }
        }
    }

    #[test]
    fn test_pack_row_padding() {
        assert_eq!(pack_row(&[true, true, true, true]), vec![0xF0]);
        assert_eq!(pack_row(&[true; 9]), vec![0xFF, 0x80]);
        assert_eq!(pack_row(&[]), Vec::<u8>::new());
    }

    #[test]
    fn test_zero_sized_image() {
        let img = RgbImage::new(0, 0);
        assert!(atkinson(&img, 128).is_empty());
    }
}
