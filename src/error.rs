use std::path::PathBuf;

use retro_palette::ConvertError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decode error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Conversion error: {0}")]
    Convert(#[from] ConvertError),

    #[error("PNG decode error: {0}")]
    PngDecode(#[from] png::DecodingError),

    #[error("PNG encode error: {0}")]
    PngEncode(#[from] png::EncodingError),

    #[error("Config error in {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("Palette file {path}: {source}")]
    PaletteFile {
        path: PathBuf,
        source: retro_palette::PaletteError,
    },

    #[error("{path} is not an 8-bit indexed PNG")]
    NotIndexed { path: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;
    use retro_palette::PaletteError;

    #[test]
    fn test_config_error_message() {
        let error = AppError::Config {
            path: PathBuf::from("textures.yaml"),
            message: "missing field `palette`".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Config error in textures.yaml: missing field `palette`"
        );
    }

    #[test]
    fn test_palette_file_error_message() {
        let error = AppError::PaletteFile {
            path: PathBuf::from("gfx/palette.png"),
            source: PaletteError::ImageSize {
                width: 32,
                height: 8,
            },
        };
        assert_eq!(
            error.to_string(),
            "Palette file gfx/palette.png: palette image must be 16x16 pixels, got 32x8"
        );
    }

    #[test]
    fn test_from_convert_error() {
        let error: AppError = ConvertError::DitherHdr.into();
        match error {
            AppError::Convert(ConvertError::DitherHdr) => {}
            other => panic!("Expected Convert variant, got {other:?}"),
        }
    }

    #[test]
    fn test_not_indexed_message() {
        let error = AppError::NotIndexed {
            path: PathBuf::from("photo.png"),
        };
        assert_eq!(error.to_string(), "photo.png is not an 8-bit indexed PNG");
    }
}
