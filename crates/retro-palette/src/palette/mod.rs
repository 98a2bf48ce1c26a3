//! Palette types
//!
//! A [`Palette`] is the engine's fixed 256-entry color table together with
//! the [`FullbrightBand`] that marks which entries render unlit.

mod band;
mod error;
mod palette;

pub use band::FullbrightBand;
pub use error::PaletteError;
pub use palette::{Palette, PALETTE_BYTES, PALETTE_SIZE, TRANSPARENT_INDEX};
