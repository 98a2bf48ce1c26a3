//! Mipmap pyramid generation.
//!
//! Level `L` of a `width x height` texture is `mip_dimensions(width, height, L)`:
//! each dimension halved by integer division, one step at a time, `L` times.
//! Level 0 is the source itself.
//!
//! Downsampling uses a separable tent filter whose footprint grows with the
//! scale factor. Edges wrap, because the engine tiles its textures.
//!
//! - [`downsample_rgba8`]: 8-bit sRGB color is decoded to linear light
//!   through the gamma LUTs and premultiplied by alpha before filtering, so
//!   transparent texels do not bleed their color into opaque neighbours.
//!   Alpha itself is filtered as is.
//! - [`downsample_rgb_f32`]: HDR radiance is already linear and filtered
//!   directly.

mod filter;

use crate::color::lut::{linear_to_srgb8, srgb8_to_linear};

/// Dimensions of mip level `level` for a `width x height` base image.
///
/// Either dimension may reach zero; callers decide whether that is an error.
///
/// # Example
///
/// ```
/// use retro_palette::mip::mip_dimensions;
///
/// assert_eq!(mip_dimensions(64, 32, 0), (64, 32));
/// assert_eq!(mip_dimensions(64, 32, 3), (8, 4));
/// assert_eq!(mip_dimensions(7, 13, 2), (1, 3));
/// ```
pub fn mip_dimensions(width: u32, height: u32, level: u32) -> (u32, u32) {
    let (mut w, mut h) = (width, height);
    for _ in 0..level {
        if w == 0 && h == 0 {
            break;
        }
        w /= 2;
        h /= 2;
    }
    (w, h)
}

fn target_dimensions(width: u32, height: u32, level: u32) -> (u32, u32) {
    let (w, h) = mip_dimensions(width, height, level);
    assert!(
        w > 0 && h > 0,
        "downsample: mip level {level} of {width}x{height} has no pixels"
    );
    (w, h)
}

/// Downsample an RGBA8 image to mip level `level`.
///
/// Returns the new pixels and dimensions. Level 0 returns a copy.
///
/// # Panics
///
/// Panics if `pixels.len() != width * height * 4` or if the level has a zero
/// dimension.
pub fn downsample_rgba8(pixels: &[u8], width: u32, height: u32, level: u32) -> (Vec<u8>, u32, u32) {
    assert_eq!(
        pixels.len(),
        width as usize * height as usize * 4,
        "downsample_rgba8: buffer length must match {width}x{height} RGBA"
    );
    if level == 0 {
        return (pixels.to_vec(), width, height);
    }
    let (new_w, new_h) = target_dimensions(width, height, level);

    let linear: Vec<f32> = pixels
        .chunks_exact(4)
        .flat_map(|p| {
            let a = p[3] as f32 / 255.0;
            [
                srgb8_to_linear(p[0]) * a,
                srgb8_to_linear(p[1]) * a,
                srgb8_to_linear(p[2]) * a,
                a,
            ]
        })
        .collect();

    let filtered = filter::resample(
        &linear,
        4,
        width as usize,
        height as usize,
        new_w as usize,
        new_h as usize,
    );

    let out = filtered
        .chunks_exact(4)
        .flat_map(|p| {
            let a = p[3];
            // Fully transparent results keep premultiplied black
            let unpremultiply = |c: f32| if a > 0.0 { c / a } else { c };
            [
                linear_to_srgb8(unpremultiply(p[0])),
                linear_to_srgb8(unpremultiply(p[1])),
                linear_to_srgb8(unpremultiply(p[2])),
                (a * 255.0).round().clamp(0.0, 255.0) as u8,
            ]
        })
        .collect();

    (out, new_w, new_h)
}

/// Downsample linear RGB radiance to mip level `level`.
///
/// # Panics
///
/// Panics if `pixels.len() != width * height * 3` or if the level has a zero
/// dimension.
pub fn downsample_rgb_f32(
    pixels: &[f32],
    width: u32,
    height: u32,
    level: u32,
) -> (Vec<f32>, u32, u32) {
    assert_eq!(
        pixels.len(),
        width as usize * height as usize * 3,
        "downsample_rgb_f32: buffer length must match {width}x{height} RGB"
    );
    if level == 0 {
        return (pixels.to_vec(), width, height);
    }
    let (new_w, new_h) = target_dimensions(width, height, level);

    let out = filter::resample(
        pixels,
        3,
        width as usize,
        height as usize,
        new_w as usize,
        new_h as usize,
    );
    (out, new_w, new_h)
}
