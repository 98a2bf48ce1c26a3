//! Palette file loading.
//!
//! Two formats are accepted: any image format the `image` crate recognizes,
//! which must then be exactly 16x16 pixels (one palette entry per pixel,
//! row-major), and the raw 768-byte lump.

use std::path::Path;

use retro_palette::{FullbrightBand, Palette};

use crate::error::AppError;

/// Load a palette file and attach `band`.
pub fn load_palette(path: &Path, band: FullbrightBand) -> Result<Palette, AppError> {
    let bytes = std::fs::read(path)?;
    let palette = palette_from_bytes(&bytes, path)?.with_fullbright_band(band);
    tracing::debug!(
        path = %path.display(),
        fullbright_first = band.first(),
        fullbright_count = band.count(),
        "Loaded palette"
    );
    Ok(palette)
}

/// Decode palette file contents; `path` is only used for error messages.
pub fn palette_from_bytes(bytes: &[u8], path: &Path) -> Result<Palette, AppError> {
    // A lump whose first bytes happen to look like an image header still
    // loads as a lump when decoding fails
    let decoded = image::guess_format(bytes)
        .ok()
        .and_then(|_| image::load_from_memory(bytes).ok());

    let palette = match decoded {
        Some(img) => {
            let rgb = img.to_rgb8();
            Palette::from_rgb_image(rgb.width(), rgb.height(), rgb.as_raw())
        }
        None => Palette::from_bytes(bytes),
    };

    palette.map_err(|source| AppError::PaletteFile {
        path: path.to_path_buf(),
        source,
    })
}
