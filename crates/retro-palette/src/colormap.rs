//! Light-shading colormap generation.
//!
//! The software renderer shades texels through a 64-row lookup table: row
//! `y` maps every palette index to the index that best represents that
//! color at light level `y` (row 0 brightest, row 63 black). Row 31 is the
//! identity for normal colors; rows above it overbrighten up to roughly
//! double intensity.
//!
//! Fullbright entries and the transparency sentinel map to themselves on
//! every row, so they ignore lighting.

use crate::color::Rgb8;
use crate::palette::Palette;

/// Number of light levels in a colormap.
pub const COLORMAP_ROWS: usize = 64;

/// Build the `64 x 256` colormap for `palette`, row-major.
///
/// # Example
///
/// ```
/// use retro_palette::colormap::{generate_colormap, COLORMAP_ROWS};
/// use retro_palette::Palette;
///
/// let bytes: Vec<u8> = (0..=255u8).flat_map(|i| [i, i, i]).collect();
/// let palette = Palette::from_bytes(&bytes).unwrap();
///
/// let colormap = generate_colormap(&palette);
/// assert_eq!(colormap.len(), COLORMAP_ROWS * 256);
/// // Row 31 leaves normal colors unchanged
/// assert_eq!(colormap[31 * 256 + 100], 100);
/// ```
pub fn generate_colormap(palette: &Palette) -> Vec<u8> {
    let first_fullbright = palette.fullbright_band().first();
    let mut colormap = Vec::with_capacity(COLORMAP_ROWS * 256);

    for row in 0..COLORMAP_ROWS as u32 {
        let level = 63 - row;
        for index in 0..=255u8 {
            if index >= first_fullbright {
                colormap.push(index);
                continue;
            }
            let [r, g, b] = palette.color(index).to_bytes().map(|c| shade(c, level));
            colormap.push(palette.nearest_normal(Rgb8::new(r, g, b)));
        }
    }

    colormap
}

/// Scale one channel to light `level` (0..=63, 32 is unity), with rounding.
#[inline]
fn shade(channel: u8, level: u32) -> u8 {
    ((channel as u32 * level + 16) >> 5).min(255) as u8
}
