//! Color types and gamma conversion
//!
//! Palette entries and LDR pixels are plain 8-bit sRGB triples ([`Rgb8`]).
//! Nearest-color search compares them directly; only the mip filter leaves
//! the 8-bit domain, decoding to linear light through the build-time LUTs
//! in [`lut`] and encoding back afterwards.

pub mod lut;
mod rgb8;

pub use rgb8::Rgb8;
