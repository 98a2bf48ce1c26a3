//! HDR radiance to palette index mapping.
//!
//! Radiance is scaled, gamma-encoded with the forward exponent 2.2 and
//! expanded to 8-bit range. Colors that stay within `[0, 255]` on every
//! channel map into the palette's normal band. Colors that overflow on any
//! channel are treated as emissive: they are shifted down by 128, clamped,
//! and mapped into the fullbright band, where the engine draws them at full
//! intensity regardless of lighting.

mod split;

pub use split::split_hdr;

use crate::color::Rgb8;
use crate::palette::Palette;

/// Exponent applied to scaled radiance.
const ENCODE_EXPONENT: f32 = 2.2;

/// Offset subtracted from overflowing channels before fullbright matching.
const FULLBRIGHT_SHIFT: f32 = 128.0;

/// Maps HDR radiance triples to palette indices.
///
/// # Example
///
/// ```
/// use retro_palette::tonemap::ToneMapper;
/// use retro_palette::Palette;
///
/// let bytes: Vec<u8> = (0..=255u8).flat_map(|i| [i, i, i]).collect();
/// let palette = Palette::from_bytes(&bytes).unwrap();
/// let mapper = ToneMapper::new(&palette, 1.0);
///
/// assert_eq!(mapper.map([0.0, 0.0, 0.0]), 0);
/// // Overflowing radiance lands in the fullbright band [224, 255)
/// assert!(palette.fullbright_band().contains(mapper.map([2.0, 2.0, 2.0])));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ToneMapper<'a> {
    palette: &'a Palette,
    scale: f32,
}

impl<'a> ToneMapper<'a> {
    /// Create a mapper using `palette`'s fullbright band and the given
    /// radiance multiplier.
    pub fn new(palette: &'a Palette, scale: f32) -> Self {
        Self { palette, scale }
    }

    /// Radiance multiplier applied before encoding.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Map one radiance triple to a palette index.
    ///
    /// NaN channels count as zero, negative channels as black.
    pub fn map(&self, radiance: [f32; 3]) -> u8 {
        let encoded = radiance.map(|channel| self.encode(channel));

        if encoded.iter().any(|&v| v > 255.0) {
            let color = to_rgb8(encoded.map(|v| v - FULLBRIGHT_SHIFT));
            self.palette.nearest_fullbright(color)
        } else {
            self.palette.nearest_normal(to_rgb8(encoded))
        }
    }

    /// Map an interleaved RGB buffer, one index per pixel.
    ///
    /// # Panics
    ///
    /// Panics if the buffer length is not a multiple of 3.
    pub fn map_pixels(&self, pixels: &[f32]) -> Vec<u8> {
        assert!(
            pixels.len() % 3 == 0,
            "tone map: buffer length {} is not a multiple of 3",
            pixels.len()
        );
        pixels
            .chunks_exact(3)
            .map(|p| self.map([p[0], p[1], p[2]]))
            .collect()
    }

    #[inline]
    fn encode(&self, channel: f32) -> f32 {
        let scaled = channel * self.scale;
        let scaled = if scaled.is_nan() { 0.0 } else { scaled.max(0.0) };
        scaled.powf(ENCODE_EXPONENT) * 255.0 + 0.5
    }
}

/// Clamp to `[0, 255]` and truncate.
#[inline]
fn to_rgb8(values: [f32; 3]) -> Rgb8 {
    let [r, g, b] = values.map(|v| v.clamp(0.0, 255.0) as u8);
    Rgb8::new(r, g, b)
}

/// Tone-map a whole interleaved RGB radiance buffer against `palette`.
pub fn tone_map(pixels: &[f32], scale: f32, palette: &Palette) -> Vec<u8> {
    ToneMapper::new(palette, scale).map_pixels(pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::FullbrightBand;

    fn grey_palette() -> Palette {
        let bytes: Vec<u8> = (0..=255u8).flat_map(|i| [i, i, i]).collect();
        Palette::from_bytes(&bytes).unwrap()
    }

    #[test]
    fn test_black_maps_to_normal_black() {
        let palette = grey_palette();
        assert_eq!(ToneMapper::new(&palette, 1.0).map([0.0; 3]), 0);
    }

    #[test]
    fn test_unit_radiance_stays_normal() {
        // 1.0 encodes to 255.5, which already overflows; just below stays normal
        let palette = grey_palette();
        let index = ToneMapper::new(&palette, 1.0).map([0.99, 0.99, 0.99]);
        assert!(index < 224, "got {index}");
    }

    #[test]
    fn test_mid_radiance_matches_forward_exponent() {
        let palette = grey_palette();
        // 0.5^2.2 * 255 + 0.5 = 55.99 -> 55
        let index = ToneMapper::new(&palette, 1.0).map([0.5, 0.5, 0.5]);
        assert_eq!(index, 55);
    }

    #[test]
    fn test_overflow_goes_fullbright() {
        let palette = grey_palette();
        let mapper = ToneMapper::new(&palette, 1.0);
        let index = mapper.map([2.0, 2.0, 2.0]);
        assert!(FullbrightBand::QUAKE.contains(index), "got {index}");
        // Shifted white is still white: nearest in [224, 255) is 254
        assert_eq!(index, 254);
    }

    #[test]
    fn test_single_channel_overflow_is_enough() {
        let palette = grey_palette();
        let index = ToneMapper::new(&palette, 1.0).map([3.0, 0.0, 0.0]);
        assert!(FullbrightBand::QUAKE.contains(index));
    }

    #[test]
    fn test_scale_is_applied() {
        let palette = grey_palette();
        let mapper = ToneMapper::new(&palette, 4.0);
        assert!(FullbrightBand::QUAKE.contains(mapper.map([0.5, 0.5, 0.5])));
        assert_eq!(mapper.scale(), 4.0);
    }

    #[test]
    fn test_nan_and_negative_are_black() {
        let palette = grey_palette();
        let mapper = ToneMapper::new(&palette, 1.0);
        assert_eq!(mapper.map([f32::NAN, -1.0, f32::NEG_INFINITY]), 0);
    }

    #[test]
    fn test_respects_custom_band() {
        let palette = grey_palette().with_fullbright_band(FullbrightBand::HEXEN2);
        let mapper = ToneMapper::new(&palette, 1.0);
        let index = mapper.map([2.0, 2.0, 2.0]);
        assert!((240..255).contains(&index), "got {index}");
        // Normal band now reaches up to 239
        assert_eq!(mapper.map([0.99, 0.99, 0.99]), 239);
    }

    #[test]
    fn test_tone_map_buffer() {
        let palette = grey_palette();
        let pixels = [0.0, 0.0, 0.0, 2.0, 2.0, 2.0];
        assert_eq!(tone_map(&pixels, 1.0, &palette), vec![0, 254]);
    }

    #[test]
    #[should_panic(expected = "multiple of 3")]
    fn test_ragged_buffer_panics() {
        let palette = grey_palette();
        tone_map(&[0.0; 4], 1.0, &palette);
    }
}
