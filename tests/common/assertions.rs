//! Assertion helpers for tests.

use std::path::Path;

use pretty_assertions::assert_eq;
use texbake::services::{read_indexed, IndexedPng};

use super::fixtures::grey_palette_bytes;

/// Assert `path` is an 8-bit indexed PNG of the given size carrying the grey
/// palette, and return it
pub fn assert_indexed_png(path: &Path, width: u32, height: u32) -> IndexedPng {
    assert!(path.exists(), "Expected {} to exist", path.display());
    let png = read_indexed(path).unwrap();
    assert_eq!(
        (png.width, png.height),
        (width, height),
        "Unexpected size for {}",
        path.display()
    );
    assert_eq!(png.plte, grey_palette_bytes(), "PLTE should hold the palette");
    png
}
