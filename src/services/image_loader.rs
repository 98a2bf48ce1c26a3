//! Decoding image files into conversion sources.
//!
//! The source kind follows from the decoded data:
//!
//! - floating point images (Radiance HDR, OpenEXR) become HDR sources
//! - 8-bit indexed PNGs whose PLTE equals the target palette become
//!   pre-indexed sources, copied through unchanged
//! - everything else is decoded to RGBA8

use std::path::Path;

use image::{ColorType, DynamicImage};
use retro_palette::{ImageSource, Palette};

use super::png_io::decode_indexed;
use crate::error::AppError;

/// Decode `bytes` into an image source for `palette`.
pub fn source_from_bytes(bytes: &[u8], palette: &Palette) -> Result<ImageSource, AppError> {
    if matches!(image::guess_format(bytes), Ok(image::ImageFormat::Png)) {
        if let Some(indexed) = decode_indexed(bytes)? {
            if indexed.plte == palette.to_bytes() {
                return Ok(ImageSource::from_indexed(
                    indexed.width,
                    indexed.height,
                    indexed.indices,
                )?);
            }
            tracing::debug!("Indexed PNG uses a different palette, requantizing");
        }
    }

    let img = image::load_from_memory(bytes)?;
    let (width, height) = (img.width(), img.height());
    let source = if is_float(&img) {
        ImageSource::from_hdr(width, height, img.into_rgb32f().into_raw())?
    } else {
        ImageSource::from_rgba8(width, height, img.into_rgba8().into_raw())?
    };
    Ok(source)
}

fn is_float(img: &DynamicImage) -> bool {
    matches!(img.color(), ColorType::Rgb32F | ColorType::Rgba32F)
}

/// Load an image file as a conversion source.
pub fn load_source(path: &Path, palette: &Palette) -> Result<ImageSource, AppError> {
    let bytes = std::fs::read(path)?;
    let source = source_from_bytes(&bytes, palette)?;
    tracing::debug!(
        path = %path.display(),
        kind = ?source.kind(),
        width = source.width(),
        height = source.height(),
        "Loaded source image"
    );
    Ok(source)
}

/// Load an image file as RGBA8, for emission masks.
pub fn load_rgba8(path: &Path) -> Result<(u32, u32, Vec<u8>), AppError> {
    let img = image::open(path)?.into_rgba8();
    Ok((img.width(), img.height(), img.into_raw()))
}

/// Load an image file as linear RGB radiance.
///
/// 8-bit images are decoded to the `0..1` range.
pub fn load_rgb32f(path: &Path) -> Result<(u32, u32, Vec<f32>), AppError> {
    let img = image::open(path)?.into_rgb32f();
    Ok((img.width(), img.height(), img.into_raw()))
}

/// Load `path` as a source and attach the emission mask at `emission`.
pub fn load_source_with_emission(
    path: &Path,
    emission: Option<&Path>,
    palette: &Palette,
) -> Result<ImageSource, AppError> {
    let source = load_source(path, palette)?;
    match emission {
        Some(emission) => {
            let (width, height, rgba) = load_rgba8(emission)?;
            Ok(source.with_emission_rgba8(width, height, rgba)?)
        }
        None => Ok(source),
    }
}
