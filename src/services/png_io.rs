//! PNG reading and writing for indexed and RGB images.
//!
//! Indexed output always carries the full 256-entry palette in its PLTE
//! chunk, so the files open in any image viewer with the right colors and
//! can be fed back in as pre-indexed sources.

use std::io::Cursor;
use std::path::Path;

use retro_palette::{IndexedImage, Palette};

use crate::error::AppError;

/// An 8-bit indexed PNG as read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedPng {
    pub width: u32,
    pub height: u32,
    pub indices: Vec<u8>,
    /// PLTE chunk contents, 3 bytes per entry
    pub plte: Vec<u8>,
}

/// Encode an indexed image with `palette` as PLTE.
pub fn encode_indexed(image: &IndexedImage, palette: &Palette) -> Result<Vec<u8>, AppError> {
    encode_png(
        image.width(),
        image.height(),
        png::ColorType::Indexed,
        Some(&palette.to_bytes()),
        image.indices(),
    )
}

/// Encode interleaved RGB8 pixels.
pub fn encode_rgb(width: u32, height: u32, rgb: &[u8]) -> Result<Vec<u8>, AppError> {
    encode_png(width, height, png::ColorType::Rgb, None, rgb)
}

pub fn write_indexed(path: &Path, image: &IndexedImage, palette: &Palette) -> Result<(), AppError> {
    std::fs::write(path, encode_indexed(image, palette)?)?;
    tracing::debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        level = image.level(),
        "Wrote indexed PNG"
    );
    Ok(())
}

pub fn write_rgb(path: &Path, width: u32, height: u32, rgb: &[u8]) -> Result<(), AppError> {
    std::fs::write(path, encode_rgb(width, height, rgb)?)?;
    tracing::debug!(path = %path.display(), width, height, "Wrote RGB PNG");
    Ok(())
}

/// Read an 8-bit indexed PNG, or `None` if the data is a PNG of any other
/// kind.
pub fn decode_indexed(bytes: &[u8]) -> Result<Option<IndexedPng>, AppError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::IDENTITY);
    let mut reader = decoder.read_info()?;

    let info = reader.info();
    if info.color_type != png::ColorType::Indexed || info.bit_depth != png::BitDepth::Eight {
        return Ok(None);
    }
    let plte = match &info.palette {
        Some(plte) => plte.to_vec(),
        None => return Ok(None),
    };

    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf)?;
    buf.truncate(frame.buffer_size());

    Ok(Some(IndexedPng {
        width: frame.width,
        height: frame.height,
        indices: buf,
        plte,
    }))
}

/// Read an 8-bit indexed PNG file; any other kind of image is an error.
pub fn read_indexed(path: &Path) -> Result<IndexedPng, AppError> {
    let bytes = std::fs::read(path)?;
    decode_indexed(&bytes)?.ok_or_else(|| AppError::NotIndexed {
        path: path.to_path_buf(),
    })
}

fn encode_png(
    width: u32,
    height: u32,
    color_type: png::ColorType,
    plte: Option<&[u8]>,
    data: &[u8],
) -> Result<Vec<u8>, AppError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(png::BitDepth::Eight);
        if let Some(plte) = plte {
            encoder.set_palette(plte);
        }
        let mut writer = encoder.write_header()?;
        writer.write_image_data(data)?;
    }
    Ok(buf.into_inner())
}
