//! Palette struct with nearest-color matching.
//!
//! This module provides the core `Palette` type: the 256 RGB entries of an
//! engine palette lump plus the fullbright band configuration that goes with
//! it.

use super::band::FullbrightBand;
use super::error::PaletteError;
use crate::color::Rgb8;

/// Number of entries in an engine palette.
pub const PALETTE_SIZE: usize = 256;

/// Size of a raw palette lump in bytes.
pub const PALETTE_BYTES: usize = PALETTE_SIZE * 3;

/// Reserved index meaning "fully transparent".
pub const TRANSPARENT_INDEX: u8 = 255;

/// A fixed 256-entry color palette.
///
/// The palette is immutable after construction and is shared by reference
/// across concurrent conversions.
///
/// # Bands
///
/// - **Normal band** `[0, band.first())`: lit colors, target of LDR
///   quantization and tone-mapped non-overbright pixels.
/// - **Fullbright band** `[band.first(), band.first() + band.count())`:
///   emissive colors, target of overbright HDR pixels and emission masks.
/// - Index 255: transparency sentinel, never produced by color matching.
///
/// # Example
///
/// ```
/// use retro_palette::{FullbrightBand, Palette, Rgb8};
///
/// let bytes: Vec<u8> = (0..=255u8).flat_map(|i| [i, i, i]).collect();
/// let palette = Palette::from_bytes(&bytes).unwrap();
///
/// assert_eq!(palette.fullbright_band(), FullbrightBand::QUAKE);
/// assert_eq!(palette.nearest_normal(Rgb8::new(10, 10, 10)), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [Rgb8; PALETTE_SIZE],
    band: FullbrightBand,
}

impl Palette {
    /// Create a palette from a raw 768-byte RGB lump with the default
    /// (Quake) fullbright band.
    ///
    /// # Errors
    ///
    /// [`PaletteError::WrongSize`] unless `bytes` is exactly 768 bytes long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PaletteError> {
        if bytes.len() != PALETTE_BYTES {
            return Err(PaletteError::WrongSize { len: bytes.len() });
        }

        let mut colors = [Rgb8::BLACK; PALETTE_SIZE];
        for (color, rgb) in colors.iter_mut().zip(bytes.chunks_exact(3)) {
            *color = Rgb8::new(rgb[0], rgb[1], rgb[2]);
        }

        Ok(Self {
            colors,
            band: FullbrightBand::default(),
        })
    }

    /// Create a palette from the pixels of a 16x16 RGB image, read row-major.
    ///
    /// # Errors
    ///
    /// [`PaletteError::ImageSize`] if the image is not 16x16, or
    /// [`PaletteError::WrongSize`] if the pixel buffer is not 768 bytes.
    pub fn from_rgb_image(width: u32, height: u32, rgb: &[u8]) -> Result<Self, PaletteError> {
        if width != 16 || height != 16 {
            return Err(PaletteError::ImageSize { width, height });
        }
        Self::from_bytes(rgb)
    }

    /// Replace the fullbright band configuration.
    pub fn with_fullbright_band(mut self, band: FullbrightBand) -> Self {
        self.band = band;
        self
    }

    /// The fullbright band of this palette.
    #[inline]
    pub fn fullbright_band(&self) -> FullbrightBand {
        self.band
    }

    /// Number of entries in the normal (lit) band.
    #[inline]
    pub fn normal_band_len(&self) -> usize {
        self.band.first() as usize
    }

    /// Color stored at `index`.
    #[inline]
    pub fn color(&self, index: u8) -> Rgb8 {
        self.colors[index as usize]
    }

    /// All 256 colors in index order.
    #[inline]
    pub fn colors(&self) -> &[Rgb8; PALETTE_SIZE] {
        &self.colors
    }

    /// The palette as a 768-byte RGB lump (also a valid PNG `PLTE` chunk).
    pub fn to_bytes(&self) -> Vec<u8> {
        self.colors.iter().flat_map(|c| c.to_bytes()).collect()
    }

    /// Find the entry nearest to `color` among `band_len` entries starting
    /// at `band_start`.
    ///
    /// Exhaustive linear scan by Euclidean RGB distance. Returns the absolute
    /// palette index. On ties the lowest index wins, since the scan runs
    /// upwards and only a strictly smaller distance replaces the best match.
    ///
    /// # Panics
    ///
    /// Panics if `band_len` is zero or the band runs past the last entry.
    #[inline]
    pub fn nearest_index(&self, color: Rgb8, band_start: usize, band_len: usize) -> u8 {
        assert!(
            band_len > 0 && band_start + band_len <= PALETTE_SIZE,
            "nearest_index: invalid band start {band_start} length {band_len}"
        );

        let mut best_idx = band_start;
        let mut best_dist = i32::MAX;

        for (offset, &candidate) in self.colors[band_start..band_start + band_len]
            .iter()
            .enumerate()
        {
            let dist = color.distance_squared(candidate);
            if dist < best_dist {
                best_dist = dist;
                best_idx = band_start + offset;
            }
        }

        best_idx as u8
    }

    /// Nearest entry in the normal (lit) band.
    #[inline]
    pub fn nearest_normal(&self, color: Rgb8) -> u8 {
        self.nearest_index(color, 0, self.normal_band_len())
    }

    /// Nearest entry in the fullbright band.
    #[inline]
    pub fn nearest_fullbright(&self, color: Rgb8) -> u8 {
        self.nearest_index(
            color,
            self.band.first() as usize,
            self.band.count() as usize,
        )
    }
}
