//! Image sources and their conversion to indexed bitmaps.
//!
//! An [`ImageSource`] is one decoded texture in one of three pixel formats
//! ([`SourcePixels`]), plus an optional emission mask of the same size. The
//! format is inspected once, in [`ImageSource::to_indexed`], which runs the
//! matching pipeline:
//!
//! | Source | Pipeline |
//! |--------|----------|
//! | LDR (RGBA8) | sRGB downsample, quantize (optionally dithered), alpha |
//! | HDR (RGB f32) | linear downsample, tone map |
//! | Indexed | copy (level 0 only, no dithering) |
//!
//! Emission is composited last, at the same mip level, for every format.

mod options;

pub use options::ConvertOptions;

use crate::api::ConvertError;
use crate::composite::{apply_alpha, apply_emission, split_color_alpha};
use crate::dither::quantize;
use crate::mip::{downsample_rgb_f32, downsample_rgba8, mip_dimensions};
use crate::output::IndexedImage;
use crate::palette::Palette;
use crate::tonemap::ToneMapper;

/// Decoded pixel data of an image source.
#[derive(Debug, Clone, PartialEq)]
pub enum SourcePixels {
    /// 8-bit sRGB color with straight alpha, 4 bytes per pixel
    Ldr(Vec<u8>),
    /// Linear radiance, 3 floats per pixel
    Hdr(Vec<f32>),
    /// Palette indices already matching the target palette
    Indexed(Vec<u8>),
}

/// Which [`SourcePixels`] variant a source holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Ldr,
    Hdr,
    Indexed,
}

impl SourcePixels {
    pub fn kind(&self) -> SourceKind {
        match self {
            SourcePixels::Ldr(_) => SourceKind::Ldr,
            SourcePixels::Hdr(_) => SourceKind::Hdr,
            SourcePixels::Indexed(_) => SourceKind::Indexed,
        }
    }
}

/// A decoded texture ready for conversion.
///
/// # Example
///
/// ```
/// use retro_palette::{ConvertOptions, ImageSource, Palette};
///
/// let bytes: Vec<u8> = (0..=255u8).flat_map(|i| [i, i, i]).collect();
/// let palette = Palette::from_bytes(&bytes).unwrap();
///
/// let source = ImageSource::from_rgba8(2, 1, vec![0, 0, 0, 255, 9, 9, 9, 0]).unwrap();
/// let image = source.to_indexed(&palette, &ConvertOptions::default()).unwrap();
/// assert_eq!(image.indices(), &[0, 255]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSource {
    width: u32,
    height: u32,
    pixels: SourcePixels,
    /// Emission mask as RGBA8, same dimensions as the base image
    emission: Option<Vec<u8>>,
}

fn check_buffer(width: u32, height: u32, channels: usize, actual: usize) -> Result<(), ConvertError> {
    if width == 0 || height == 0 {
        return Err(ConvertError::EmptyImage { width, height });
    }
    let expected = width as usize * height as usize * channels;
    if actual != expected {
        return Err(ConvertError::BufferLength { expected, actual });
    }
    Ok(())
}

fn rgb_to_rgba(rgb: &[u8]) -> Vec<u8> {
    rgb.chunks_exact(3)
        .flat_map(|p| [p[0], p[1], p[2], 255])
        .collect()
}

impl ImageSource {
    /// LDR source from interleaved RGBA8.
    ///
    /// # Errors
    ///
    /// [`ConvertError::EmptyImage`] for a zero dimension,
    /// [`ConvertError::BufferLength`] unless `rgba.len() == width * height * 4`.
    pub fn from_rgba8(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, ConvertError> {
        check_buffer(width, height, 4, rgba.len())?;
        Ok(Self::new(width, height, SourcePixels::Ldr(rgba)))
    }

    /// LDR source from interleaved RGB8; every pixel is opaque.
    pub fn from_rgb8(width: u32, height: u32, rgb: &[u8]) -> Result<Self, ConvertError> {
        check_buffer(width, height, 3, rgb.len())?;
        Ok(Self::new(width, height, SourcePixels::Ldr(rgb_to_rgba(rgb))))
    }

    /// HDR source from interleaved linear RGB radiance.
    pub fn from_hdr(width: u32, height: u32, radiance: Vec<f32>) -> Result<Self, ConvertError> {
        check_buffer(width, height, 3, radiance.len())?;
        Ok(Self::new(width, height, SourcePixels::Hdr(radiance)))
    }

    /// Source whose pixels are already indices into the target palette.
    pub fn from_indexed(width: u32, height: u32, indices: Vec<u8>) -> Result<Self, ConvertError> {
        check_buffer(width, height, 1, indices.len())?;
        Ok(Self::new(width, height, SourcePixels::Indexed(indices)))
    }

    fn new(width: u32, height: u32, pixels: SourcePixels) -> Self {
        Self {
            width,
            height,
            pixels,
            emission: None,
        }
    }

    /// Attach an RGBA8 emission mask. Only the color channels are used.
    ///
    /// # Errors
    ///
    /// [`ConvertError::EmissionSizeMismatch`] if the mask is not the size of
    /// the base image, [`ConvertError::BufferLength`] if the buffer does not
    /// match its own dimensions.
    pub fn with_emission_rgba8(
        mut self,
        width: u32,
        height: u32,
        mut rgba: Vec<u8>,
    ) -> Result<Self, ConvertError> {
        self.check_emission_size(width, height)?;
        check_buffer(width, height, 4, rgba.len())?;
        // Mask alpha is ignored; keep it opaque so mip filtering sees raw color
        for pixel in rgba.chunks_exact_mut(4) {
            pixel[3] = 255;
        }
        self.emission = Some(rgba);
        Ok(self)
    }

    /// Attach an RGB8 emission mask.
    pub fn with_emission_rgb8(
        self,
        width: u32,
        height: u32,
        rgb: &[u8],
    ) -> Result<Self, ConvertError> {
        self.check_emission_size(width, height)?;
        check_buffer(width, height, 3, rgb.len())?;
        self.with_emission_rgba8(width, height, rgb_to_rgba(rgb))
    }

    fn check_emission_size(&self, width: u32, height: u32) -> Result<(), ConvertError> {
        if (width, height) != (self.width, self.height) {
            return Err(ConvertError::EmissionSizeMismatch {
                width: self.width,
                height: self.height,
                emission_width: width,
                emission_height: height,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &SourcePixels {
        &self.pixels
    }

    #[inline]
    pub fn kind(&self) -> SourceKind {
        self.pixels.kind()
    }

    #[inline]
    pub fn has_emission(&self) -> bool {
        self.emission.is_some()
    }

    /// Number of mip levels with at least one pixel on each axis.
    pub fn max_mip_levels(&self) -> u32 {
        // Each level halves; the smaller side runs out after log2 + 1 levels
        32 - self.width.min(self.height).leading_zeros()
    }

    /// Convert to a palette-indexed bitmap at `options.mip_level`.
    ///
    /// # Errors
    ///
    /// - [`ConvertError::DitherIndexed`] / [`ConvertError::MipOnIndexed`] for
    ///   pre-indexed sources with dithering or a level above 0
    /// - [`ConvertError::DitherHdr`] for HDR sources with dithering
    /// - [`ConvertError::MipTooSmall`] if the level has a zero dimension
    ///
    /// All checks run before any pixel work.
    pub fn to_indexed(
        &self,
        palette: &Palette,
        options: &ConvertOptions,
    ) -> Result<IndexedImage, ConvertError> {
        let level = options.mip_level;
        tracing::debug!(
            kind = ?self.kind(),
            width = self.width,
            height = self.height,
            level,
            dither = options.dither,
            emission = self.has_emission(),
            "Converting image source"
        );

        match &self.pixels {
            SourcePixels::Indexed(_) if options.dither => return Err(ConvertError::DitherIndexed),
            SourcePixels::Indexed(_) if level != 0 => {
                return Err(ConvertError::MipOnIndexed { level })
            }
            SourcePixels::Hdr(_) if options.dither => return Err(ConvertError::DitherHdr),
            _ => {}
        }

        let (width, height) = mip_dimensions(self.width, self.height, level);
        if width == 0 || height == 0 {
            return Err(ConvertError::MipTooSmall {
                level,
                width: self.width,
                height: self.height,
            });
        }

        let mut indices = match &self.pixels {
            SourcePixels::Ldr(rgba) => {
                let (rgba, w, h) = downsample_rgba8(rgba, self.width, self.height, level);
                let (colors, alpha) = split_color_alpha(&rgba);
                let mut indices =
                    quantize(&colors, w as usize, h as usize, palette, options.dither);
                apply_alpha(&mut indices, &alpha);
                indices
            }
            SourcePixels::Hdr(radiance) => {
                let (radiance, _, _) = downsample_rgb_f32(radiance, self.width, self.height, level);
                ToneMapper::new(palette, options.hdr_scale).map_pixels(&radiance)
            }
            SourcePixels::Indexed(indices) => indices.clone(),
        };

        if let Some(emission) = &self.emission {
            let (rgba, _, _) = downsample_rgba8(emission, self.width, self.height, level);
            let (glow, _) = split_color_alpha(&rgba);
            apply_emission(&mut indices, &glow, palette);
        }

        Ok(IndexedImage::new(indices, width, height, level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::FullbrightBand;

    fn grey_palette() -> Palette {
        let bytes: Vec<u8> = (0..=255u8).flat_map(|i| [i, i, i]).collect();
        Palette::from_bytes(&bytes).unwrap()
    }

    fn dithered() -> ConvertOptions {
        ConvertOptions {
            dither: true,
            ..ConvertOptions::default()
        }
    }

    #[test]
    fn test_constructors_validate_length() {
        assert_eq!(
            ImageSource::from_rgba8(2, 2, vec![0; 15]).unwrap_err(),
            ConvertError::BufferLength {
                expected: 16,
                actual: 15
            }
        );
        assert!(ImageSource::from_hdr(1, 1, vec![0.0; 4]).is_err());
        assert!(ImageSource::from_indexed(3, 1, vec![0; 3]).is_ok());
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let err = ImageSource::from_rgba8(0, 4, Vec::new()).unwrap_err();
        assert_eq!(err, ConvertError::EmptyImage { width: 0, height: 4 });
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_rgb8_is_opaque() {
        let source = ImageSource::from_rgb8(1, 1, &[1, 2, 3]).unwrap();
        assert_eq!(source.pixels(), &SourcePixels::Ldr(vec![1, 2, 3, 255]));
    }

    #[test]
    fn test_emission_size_mismatch() {
        let source = ImageSource::from_rgba8(2, 2, vec![0; 16]).unwrap();
        let err = source.with_emission_rgb8(1, 2, &[0; 6]).unwrap_err();
        assert!(matches!(err, ConvertError::EmissionSizeMismatch { .. }));
    }

    #[test]
    fn test_indexed_rejects_dither_and_mips() {
        let palette = grey_palette();
        let source = ImageSource::from_indexed(4, 4, vec![7; 16]).unwrap();
        assert_eq!(
            source.to_indexed(&palette, &dithered()).unwrap_err(),
            ConvertError::DitherIndexed
        );
        assert_eq!(
            source
                .to_indexed(&palette, &ConvertOptions::default().at_level(1))
                .unwrap_err(),
            ConvertError::MipOnIndexed { level: 1 }
        );
    }

    #[test]
    fn test_indexed_passes_through() {
        let palette = grey_palette();
        let indices: Vec<u8> = (0..6).collect();
        let source = ImageSource::from_indexed(3, 2, indices.clone()).unwrap();
        let image = source.to_indexed(&palette, &ConvertOptions::default()).unwrap();
        assert_eq!(image.indices(), indices.as_slice());
    }

    #[test]
    fn test_hdr_rejects_dither() {
        let palette = grey_palette();
        let source = ImageSource::from_hdr(1, 1, vec![0.5; 3]).unwrap();
        let err = source.to_indexed(&palette, &dithered()).unwrap_err();
        assert_eq!(err, ConvertError::DitherHdr);
        assert!(err.is_unsupported_combination());
    }

    #[test]
    fn test_mip_too_small() {
        let palette = grey_palette();
        let source = ImageSource::from_rgba8(4, 4, vec![0; 64]).unwrap();
        assert_eq!(
            source
                .to_indexed(&palette, &ConvertOptions::default().at_level(3))
                .unwrap_err(),
            ConvertError::MipTooSmall {
                level: 3,
                width: 4,
                height: 4
            }
        );
        assert_eq!(source.max_mip_levels(), 3);
    }

    #[test]
    fn test_ldr_mip_level_dimensions() {
        let palette = grey_palette();
        let source = ImageSource::from_rgba8(8, 4, [50, 50, 50, 255].repeat(32)).unwrap();
        let image = source
            .to_indexed(&palette, &ConvertOptions::default().at_level(2))
            .unwrap();
        assert_eq!((image.width(), image.height(), image.level()), (2, 1, 2));
        assert_eq!(image.indices(), &[50, 50]);
    }

    #[test]
    fn test_emission_applies_to_hdr() {
        let palette = grey_palette();
        let source = ImageSource::from_hdr(2, 1, vec![0.0; 6])
            .unwrap()
            .with_emission_rgb8(2, 1, &[0, 0, 0, 255, 255, 255])
            .unwrap();
        let image = source.to_indexed(&palette, &ConvertOptions::default()).unwrap();
        assert_eq!(image.indices()[0], 0);
        assert!(FullbrightBand::QUAKE.contains(image.indices()[1]));
    }

    #[test]
    fn test_emission_overrides_transparency() {
        let palette = grey_palette();
        let source = ImageSource::from_rgba8(1, 1, vec![0, 0, 0, 0])
            .unwrap()
            .with_emission_rgb8(1, 1, &[200, 200, 200])
            .unwrap();
        let image = source.to_indexed(&palette, &ConvertOptions::default()).unwrap();
        assert_eq!(image.indices(), &[224]);
    }

    #[test]
    fn test_emission_resampled_to_mip_levels() {
        // 8x8 dark source, mask lit in columns 0 and 1 only
        let palette = grey_palette();
        let mut mask = Vec::new();
        for _ in 0..8 {
            for x in 0..8 {
                let v = if x < 2 { 255 } else { 0 };
                mask.extend_from_slice(&[v, v, v]);
            }
        }
        let source = ImageSource::from_rgb8(8, 8, &[20; 8 * 8 * 3])
            .unwrap()
            .with_emission_rgb8(8, 8, &mask)
            .unwrap();

        let level1 = source
            .to_indexed(&palette, &ConvertOptions::default().at_level(1))
            .unwrap();
        assert_eq!((level1.width(), level1.height()), (4, 4));
        for row in level1.indices().chunks_exact(4) {
            for (x, &index) in row.iter().enumerate() {
                let lit = FullbrightBand::QUAKE.contains(index);
                // Column 2 is the only output whose taps miss the lit texels
                match x {
                    0 => assert!(lit, "row {row:?}"),
                    2 => assert!(!lit, "row {row:?}"),
                    _ => {}
                }
            }
        }

        let level2 = source
            .to_indexed(&palette, &ConvertOptions::default().at_level(2))
            .unwrap();
        assert_eq!((level2.width(), level2.height()), (2, 2));
        assert_eq!(level2.level(), 2);
        assert!(level2.indices().iter().any(|&i| FullbrightBand::QUAKE.contains(i)));
    }

    #[test]
    fn test_emission_mask_alpha_is_ignored() {
        let palette = grey_palette();
        let source = ImageSource::from_rgb8(4, 4, &[20; 4 * 4 * 3])
            .unwrap()
            .with_emission_rgba8(4, 4, [255, 255, 255, 0].repeat(16))
            .unwrap();
        let image = source
            .to_indexed(&palette, &ConvertOptions::default().at_level(1))
            .unwrap();
        assert!(image.indices().iter().all(|&i| FullbrightBand::QUAKE.contains(i)));
    }
}
