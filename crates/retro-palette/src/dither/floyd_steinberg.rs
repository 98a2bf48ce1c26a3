//! Floyd-Steinberg error diffusion dithering.

use crate::color::Rgb8;
use crate::palette::Palette;

use super::{DitherState, Quantize, FLOYD_STEINBERG};

/// Floyd-Steinberg error diffusion dithering.
///
/// # Algorithm
///
/// Pixels are visited row-major, top-to-bottom, left-to-right (no
/// serpentine). Each pixel's error-adjusted color is quantized against the
/// normal band, and the integer error `adjusted - chosen` is handed to the
/// unvisited neighbors:
///
/// ```text
///        X   7
///    3   5   1
/// ```
///
/// Each share is truncated toward zero and the neighbor is clamped to
/// `[0, 255]` right after the addition. Shares falling outside the image are
/// dropped. Output is bit-exact for identical input.
pub struct FloydSteinberg;

impl Quantize for FloydSteinberg {
    fn quantize(
        &self,
        pixels: &[Rgb8],
        width: usize,
        height: usize,
        palette: &Palette,
    ) -> Vec<u8> {
        let mut state = DitherState::new(pixels, width, height);
        let mut output = vec![0u8; width * height];

        for y in 0..height {
            for x in 0..width {
                let adjusted = state.get(x, y);
                let index = palette.nearest_normal(adjusted);
                output[y * width + x] = index;

                let chosen = palette.color(index);
                let error = [
                    adjusted.r as i32 - chosen.r as i32,
                    adjusted.g as i32 - chosen.g as i32,
                    adjusted.b as i32 - chosen.b as i32,
                ];

                for (dx, dy, factor) in FLOYD_STEINBERG.factors() {
                    state.add_error(x as i64 + dx as i64, y as i64 + dy as i64, error, factor);
                }
            }
        }

        output
    }
}
