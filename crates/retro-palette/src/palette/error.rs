//! Error types for palette construction

use thiserror::Error;

/// Error type for palette validation.
///
/// Returned when palette data has the wrong size or the fullbright band
/// does not fit the palette.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// Palette data is not exactly 256 RGB triples
    #[error("palette must be exactly 768 bytes (256 RGB entries), got {len} bytes")]
    WrongSize {
        /// Number of bytes supplied
        len: usize,
    },

    /// Palette image is not 16x16 pixels
    #[error("palette image must be 16x16 pixels, got {width}x{height}")]
    ImageSize { width: u32, height: u32 },

    /// Fullbright band is empty, leaves no normal colors, or covers the
    /// transparency sentinel
    #[error(
        "invalid fullbright band: first {first}, count {count} \
         (need first >= 1, count >= 1, first + count <= 255)"
    )]
    InvalidBand { first: u8, count: u8 },
}
