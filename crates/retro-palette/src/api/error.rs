//! Unified error type for the conversion API.
//!
//! [`ConvertError`] covers the two failure families a caller can recover
//! from: invalid input data and option combinations the pipeline does not
//! support. Broken preconditions inside the pipeline (mismatched buffer
//! lengths between internal stages) are programming errors and panic
//! instead.

use crate::palette::PaletteError;
use thiserror::Error;

/// Error type for image sources and conversions.
///
/// # Example
///
/// ```
/// use retro_palette::{ConvertError, Palette};
///
/// fn load(bytes: &[u8]) -> Result<Palette, ConvertError> {
///     Ok(Palette::from_bytes(bytes)?)
/// }
///
/// let err = load(&[0; 10]).unwrap_err();
/// assert!(err.is_invalid_input());
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    /// Palette data or fullbright band is invalid
    #[error(transparent)]
    Palette(#[from] PaletteError),

    /// Pixel buffer does not hold `width * height * channels` values
    #[error("pixel buffer holds {actual} values, expected {expected}")]
    BufferLength { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    /// Emission image dimensions differ from the base image
    #[error(
        "emission image is {emission_width}x{emission_height}, \
         base image is {width}x{height}"
    )]
    EmissionSizeMismatch {
        width: u32,
        height: u32,
        emission_width: u32,
        emission_height: u32,
    },

    /// Requested mip level shrinks a dimension to zero
    #[error("mip level {level} of a {width}x{height} image has no pixels")]
    MipTooSmall { level: u32, width: u32, height: u32 },

    /// Dithering requested for an HDR source
    #[error("dithering is not supported for HDR sources")]
    DitherHdr,

    /// Dithering requested for a pre-indexed source
    #[error("dithering is not supported for pre-indexed sources")]
    DitherIndexed,

    /// Mip level above 0 requested for a pre-indexed source
    #[error("pre-indexed sources only provide mip level 0, requested level {level}")]
    MipOnIndexed { level: u32 },
}

impl ConvertError {
    /// True for errors caused by malformed or mismatched input data.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            ConvertError::Palette(_)
                | ConvertError::BufferLength { .. }
                | ConvertError::EmptyImage { .. }
                | ConvertError::EmissionSizeMismatch { .. }
                | ConvertError::MipTooSmall { .. }
        )
    }

    /// True for option combinations the pipeline refuses to run.
    pub fn is_unsupported_combination(&self) -> bool {
        matches!(
            self,
            ConvertError::DitherHdr
                | ConvertError::DitherIndexed
                | ConvertError::MipOnIndexed { .. }
        )
    }
}
