//! IndexedImage struct with palette expansion.

use crate::palette::Palette;

/// A palette-indexed bitmap for one mip level.
///
/// # Example
///
/// ```
/// use retro_palette::{IndexedImage, Palette};
///
/// let bytes: Vec<u8> = (0..=255u8).flat_map(|i| [i, i, i]).collect();
/// let palette = Palette::from_bytes(&bytes).unwrap();
///
/// let image = IndexedImage::new(vec![0, 128, 255, 1], 2, 2, 0);
/// assert_eq!(image.indices(), &[0, 128, 255, 1]);
/// assert_eq!(&image.to_rgb(&palette)[..6], &[0, 0, 0, 128, 128, 128]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedImage {
    /// Palette indices, one per pixel, row-major order.
    indices: Vec<u8>,
    width: u32,
    height: u32,
    /// Mip level this image was produced for.
    level: u32,
}

impl IndexedImage {
    /// Wrap an index buffer.
    ///
    /// # Panics
    ///
    /// Panics if `indices.len() != width * height`.
    pub fn new(indices: Vec<u8>, width: u32, height: u32, level: u32) -> Self {
        assert_eq!(
            indices.len(),
            width as usize * height as usize,
            "indices length ({}) must match {}x{}",
            indices.len(),
            width,
            height,
        );
        Self {
            indices,
            width,
            height,
            level,
        }
    }

    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    /// Consume the image, returning the raw index buffer.
    pub fn into_indices(self) -> Vec<u8> {
        self.indices
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
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Expand to interleaved RGB8 through `palette`.
    ///
    /// Transparent pixels take the sentinel entry's color, like the engine
    /// would show them without alpha testing.
    pub fn to_rgb(&self, palette: &Palette) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.indices.len() * 3);
        for &index in &self.indices {
            rgb.extend_from_slice(&palette.color(index).to_bytes());
        }
        rgb
    }
}
