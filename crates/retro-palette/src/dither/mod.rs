//! Color quantization against the palette's normal band.
//!
//! Two strategies implement [`Quantize`]:
//!
//! - [`Nearest`]: every pixel independently mapped to its nearest entry.
//! - [`FloydSteinberg`]: classic error diffusion in 8-bit RGB code space.
//!
//! Both target the normal (lit) band `[0, first_fullbright)`; fullbright
//! entries are only reachable through the HDR and emission paths.
//!
//! # Example
//!
//! ```
//! use retro_palette::dither::quantize;
//! use retro_palette::{Palette, Rgb8};
//!
//! let bytes: Vec<u8> = (0..=255u8).flat_map(|i| [i, i, i]).collect();
//! let palette = Palette::from_bytes(&bytes).unwrap();
//!
//! let pixels = vec![Rgb8::new(40, 40, 40); 4];
//! assert_eq!(quantize(&pixels, 2, 2, &palette, false), vec![40; 4]);
//! ```

mod floyd_steinberg;
mod kernel;

pub use floyd_steinberg::FloydSteinberg;
pub use kernel::{Kernel, FLOYD_STEINBERG};

use crate::color::Rgb8;
use crate::palette::Palette;

/// Trait for strategies that turn RGB pixels into palette indices.
pub trait Quantize {
    /// Quantize an image to palette indices.
    ///
    /// # Arguments
    ///
    /// * `pixels` - Input pixels (row-major order)
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `palette` - Palette whose normal band is the target
    ///
    /// # Panics
    ///
    /// Panics if `pixels.len() != width * height`.
    fn quantize(&self, pixels: &[Rgb8], width: usize, height: usize, palette: &Palette)
        -> Vec<u8>;
}

/// Independent nearest-color mapping without error diffusion.
///
/// A pure function of each pixel: identical inputs always give identical
/// outputs, regardless of neighbors.
pub struct Nearest;

impl Quantize for Nearest {
    fn quantize(
        &self,
        pixels: &[Rgb8],
        width: usize,
        height: usize,
        palette: &Palette,
    ) -> Vec<u8> {
        check_dimensions(pixels, width, height);
        pixels.iter().map(|&p| palette.nearest_normal(p)).collect()
    }
}

/// Quantize with or without Floyd-Steinberg dithering.
pub fn quantize(
    pixels: &[Rgb8],
    width: usize,
    height: usize,
    palette: &Palette,
    dither: bool,
) -> Vec<u8> {
    if dither {
        FloydSteinberg.quantize(pixels, width, height, palette)
    } else {
        Nearest.quantize(pixels, width, height, palette)
    }
}

fn check_dimensions(pixels: &[Rgb8], width: usize, height: usize) {
    assert_eq!(
        pixels.len(),
        width * height,
        "pixel buffer length ({}) must match {}x{}",
        pixels.len(),
        width,
        height
    );
}

/// Working buffer for one error diffusion pass.
///
/// Holds the error-adjusted color of every pixel as signed integers, the
/// same dimensions as the source. Every addition is clamped back to
/// `[0, 255]` immediately, so the adjusted color always stays a valid
/// 8-bit color. Created and dropped inside a single quantization call.
#[derive(Debug)]
pub struct DitherState {
    colors: Vec<[i32; 3]>,
    width: usize,
    height: usize,
}

impl DitherState {
    /// Seed the buffer with the source pixels.
    pub fn new(pixels: &[Rgb8], width: usize, height: usize) -> Self {
        check_dimensions(pixels, width, height);
        Self {
            colors: pixels
                .iter()
                .map(|p| [p.r as i32, p.g as i32, p.b as i32])
                .collect(),
            width,
            height,
        }
    }

    /// Current adjusted color at (x, y).
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb8 {
        let [r, g, b] = self.colors[y * self.width + x];
        // Values are kept inside [0, 255] by add_error
        Rgb8::new(r as u8, g as u8, b as u8)
    }

    /// Add `factor * error` to the pixel at (x, y), truncating each
    /// channel's share toward zero and clamping the sum to `[0, 255]`.
    ///
    /// Coordinates outside the image are ignored; that share of the error
    /// is lost.
    #[inline]
    pub fn add_error(&mut self, x: i64, y: i64, error: [i32; 3], factor: f64) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let target = &mut self.colors[y as usize * self.width + x as usize];
        for c in 0..3 {
            let share = (error[c] as f64 * factor) as i32;
            target[c] = (target[c] + share).clamp(0, 255);
        }
    }
}
