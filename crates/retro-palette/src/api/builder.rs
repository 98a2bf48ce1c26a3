//! Converter builder -- the primary ergonomic entry point for the crate.
//!
//! [`Converter`] owns the palette and per-run options and turns
//! [`ImageSource`]s into indexed bitmaps, one mip level at a time or a whole
//! chain at once.

use rayon::prelude::*;

use super::ConvertError;
use crate::output::IndexedImage;
use crate::palette::{FullbrightBand, Palette};
use crate::source::{ConvertOptions, ImageSource};

/// High-level conversion builder.
///
/// - Constructor requires a [`Palette`] (no invalid states)
/// - Configuration methods consume and return `self`
/// - [`convert()`](Self::convert) takes `&self`, so one converter serves any
///   number of images, from any number of threads
///
/// # Example
///
/// ```
/// use retro_palette::{Converter, ImageSource, Palette};
///
/// let bytes: Vec<u8> = (0..=255u8).flat_map(|i| [i, i, i]).collect();
/// let palette = Palette::from_bytes(&bytes).unwrap();
///
/// let converter = Converter::new(palette).dither(true);
/// let source = ImageSource::from_rgb8(4, 4, &[128; 48]).unwrap();
///
/// let mips = converter.convert_mips(&source, 3).unwrap();
/// assert_eq!(mips.len(), 3);
/// assert_eq!((mips[2].width(), mips[2].height()), (1, 1));
/// ```
#[derive(Debug, Clone)]
pub struct Converter {
    palette: Palette,
    options: ConvertOptions,
}

impl Converter {
    /// Create a converter with the given palette.
    ///
    /// Defaults: no dithering, HDR scale 1.0.
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            options: ConvertOptions::default(),
        }
    }

    /// Replace the palette's fullbright band.
    #[inline]
    pub fn fullbright_band(mut self, band: FullbrightBand) -> Self {
        self.palette = self.palette.with_fullbright_band(band);
        self
    }

    /// Enable Floyd-Steinberg dithering for LDR sources.
    ///
    /// Converting an HDR or pre-indexed source with dithering enabled fails
    /// with an unsupported-combination error.
    #[inline]
    pub fn dither(mut self, enabled: bool) -> Self {
        self.options.dither = enabled;
        self
    }

    /// Set the radiance multiplier for HDR sources.
    #[inline]
    pub fn hdr_scale(mut self, scale: f32) -> Self {
        self.options.hdr_scale = scale;
        self
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Options used for level 0; other levels differ only in `mip_level`.
    #[inline]
    pub fn options(&self) -> ConvertOptions {
        self.options
    }

    /// Convert `source` at mip `level`.
    pub fn convert(&self, source: &ImageSource, level: u32) -> Result<IndexedImage, ConvertError> {
        source.to_indexed(&self.palette, &self.options.at_level(level))
    }

    /// Convert mip levels `0..levels` in parallel.
    ///
    /// Results are ordered by level. If any level fails, the error of the
    /// lowest failing level is returned.
    pub fn convert_mips(
        &self,
        source: &ImageSource,
        levels: u32,
    ) -> Result<Vec<IndexedImage>, ConvertError> {
        tracing::debug!(levels, kind = ?source.kind(), "Converting mip chain");
        let results: Vec<Result<IndexedImage, ConvertError>> = (0..levels)
            .into_par_iter()
            .map(|level| self.convert(source, level))
            .collect();
        results.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grey_palette() -> Palette {
        let bytes: Vec<u8> = (0..=255u8).flat_map(|i| [i, i, i]).collect();
        Palette::from_bytes(&bytes).unwrap()
    }

    #[test]
    fn test_builder_sets_options() {
        let converter = Converter::new(grey_palette()).dither(true).hdr_scale(2.5);
        let options = converter.options();
        assert!(options.dither);
        assert_eq!(options.hdr_scale, 2.5);
        assert_eq!(options.mip_level, 0);
    }

    #[test]
    fn test_fullbright_band_override() {
        let converter = Converter::new(grey_palette()).fullbright_band(FullbrightBand::HEXEN2);
        assert_eq!(converter.palette().fullbright_band(), FullbrightBand::HEXEN2);
        assert_eq!(converter.palette().normal_band_len(), 240);
    }

    #[test]
    fn test_mips_are_ordered() {
        let converter = Converter::new(grey_palette());
        let source = ImageSource::from_rgb8(16, 8, &[90; 16 * 8 * 3]).unwrap();
        let mips = converter.convert_mips(&source, 4).unwrap();
        let sizes: Vec<_> = mips.iter().map(|m| (m.level(), m.width(), m.height())).collect();
        assert_eq!(sizes, vec![(0, 16, 8), (1, 8, 4), (2, 4, 2), (3, 2, 1)]);
        assert!(mips.iter().all(|m| m.indices().iter().all(|&i| i == 90)));
    }

    #[test]
    fn test_mip_chain_too_long_fails() {
        let converter = Converter::new(grey_palette());
        let source = ImageSource::from_rgb8(4, 4, &[0; 48]).unwrap();
        let err = converter.convert_mips(&source, 4).unwrap_err();
        assert!(matches!(err, ConvertError::MipTooSmall { level: 3, .. }));
    }

    #[test]
    fn test_lowest_failing_level_is_reported() {
        let converter = Converter::new(grey_palette());
        let source = ImageSource::from_rgb8(4, 4, &[0; 48]).unwrap();
        for _ in 0..8 {
            let err = converter.convert_mips(&source, 12).unwrap_err();
            assert!(matches!(err, ConvertError::MipTooSmall { level: 3, .. }), "{err:?}");
        }
    }

    #[test]
    fn test_zero_levels_is_empty() {
        let converter = Converter::new(grey_palette());
        let source = ImageSource::from_rgb8(1, 1, &[0; 3]).unwrap();
        assert!(converter.convert_mips(&source, 0).unwrap().is_empty());
    }

    #[test]
    fn test_converter_rejects_dithered_hdr() {
        let converter = Converter::new(grey_palette()).dither(true);
        let source = ImageSource::from_hdr(1, 1, vec![1.0; 3]).unwrap();
        assert_eq!(converter.convert(&source, 0).unwrap_err(), ConvertError::DitherHdr);
    }
}
