//! Test fixtures: palettes and images written to a temporary directory.

use std::path::{Path, PathBuf};

use retro_palette::Palette;
use tempfile::TempDir;

/// Grey ramp palette: entry i is (i, i, i)
pub fn grey_palette_bytes() -> Vec<u8> {
    (0..=255u8).flat_map(|i| [i, i, i]).collect()
}

pub fn grey_palette() -> Palette {
    Palette::from_bytes(&grey_palette_bytes()).unwrap()
}

/// Temporary working directory with helpers for writing input files
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write the grey ramp as a raw palette lump
    pub fn write_palette_lump(&self, name: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, grey_palette_bytes()).unwrap();
        path
    }

    /// Write a solid-color RGBA PNG
    pub fn write_solid_png(&self, name: &str, width: u32, height: u32, rgba: [u8; 4]) -> PathBuf {
        let path = self.path(name);
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
        img.save(&path).unwrap();
        path
    }

    /// Write a float image as OpenEXR
    pub fn write_exr(&self, name: &str, width: u32, height: u32, rgb: [f32; 3]) -> PathBuf {
        let path = self.path(name);
        let img = image::Rgb32FImage::from_pixel(width, height, image::Rgb(rgb));
        image::DynamicImage::ImageRgb32F(img).save(&path).unwrap();
        path
    }

    pub fn write_text(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, content).unwrap();
        path
    }
}
