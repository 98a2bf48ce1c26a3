// Generated LUT tables and index-heavy pixel loops
#![allow(
    clippy::excessive_precision,
    clippy::needless_range_loop,
    clippy::module_inception
)]

//! retro-palette: fixed-palette texture conversion for retro 3D engines
//!
//! This library turns decoded images (8-bit color, HDR radiance, or data
//! that is already palette-mapped) into 256-color indexed bitmaps the way
//! classic software renderers expect them: one byte per texel, a lit
//! "normal" band of colors, an unlit "fullbright" band for emissive texels,
//! and index 255 reserved for transparency.
//!
//! # Quick Start
//!
//! The [`Converter`] builder is the primary entry point:
//!
//! ```
//! use retro_palette::{Converter, ImageSource, Palette};
//!
//! let bytes: Vec<u8> = (0..=255u8).flat_map(|i| [i, i, i]).collect();
//! let palette = Palette::from_bytes(&bytes).unwrap();
//!
//! let converter = Converter::new(palette).dither(true);
//! let source = ImageSource::from_rgb8(8, 8, &[100; 8 * 8 * 3]).unwrap();
//!
//! let image = converter.convert(&source, 0).unwrap();
//! assert_eq!(image.indices().len(), 64);
//! ```
//!
//! # Pipeline
//!
//! ```text
//! LDR RGBA8 --> mip (sRGB, via linear light) --> quantize --> alpha --+
//!                                                                     |
//! HDR RGB f32 --> mip (linear) --> tone map (normal | fullbright) ----+--> emission --> IndexedImage
//!                                                                     |
//! Indexed u8 --> copy (level 0 only) ---------------------------------+
//! ```
//!
//! # Palette Bands
//!
//! | Range | Meaning | Produced by |
//! |-------|---------|-------------|
//! | `[0, first)` | normal, shaded by light level | quantization, tone map |
//! | `[first, first + count)` | fullbright, drawn unlit | overbright HDR, emission |
//! | `255` | transparent | alpha below 128 |
//!
//! The band boundaries belong to the palette ([`FullbrightBand`]), so the
//! same code serves palettes with different layouts.
//!
//! # Color Matching
//!
//! Nearest-color search is an exhaustive scan with squared Euclidean
//! distance on raw 8-bit values, ties going to the lowest index. Error
//! diffusion also stays in 8-bit integer space: each diffused share is
//! truncated toward zero and the receiving pixel clamped to `[0, 255]`
//! immediately. Results are bit-exact across runs and platforms.
//!
//! Only mip filtering works in linear light, because averaging gamma-encoded
//! values darkens high-contrast detail.

pub mod api;
pub mod color;
pub mod colormap;
pub mod composite;
pub mod dither;
pub mod mip;
pub mod output;
pub mod palette;
pub mod source;
pub mod tonemap;


pub use api::{ConvertError, Converter};
pub use color::Rgb8;
pub use colormap::generate_colormap;
pub use output::IndexedImage;
pub use palette::{FullbrightBand, Palette, PaletteError, TRANSPARENT_INDEX};
pub use source::{ConvertOptions, ImageSource, SourceKind, SourcePixels};
pub use tonemap::{split_hdr, tone_map, ToneMapper};
