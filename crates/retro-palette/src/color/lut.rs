//! Gamma lookup table access functions
//!
//! This module provides fast gamma conversion using pre-computed lookup tables
//! generated at compile time by build.rs.

// Include the generated LUT from build.rs
include!(concat!(env!("OUT_DIR"), "/gamma_lut.rs"));

/// Decode an 8-bit sRGB code value to linear light (exact table lookup).
#[inline]
pub fn srgb8_to_linear(code: u8) -> f32 {
    SRGB8_TO_LINEAR[code as usize]
}

/// Convert a linear RGB value (0.0..=1.0) to sRGB using LUT with linear interpolation.
///
/// Inputs outside the range are clamped.
#[inline]
pub fn linear_to_srgb(linear: f32) -> f32 {
    interpolate(&LINEAR_TO_SRGB, linear)
}

/// Encode linear light back to the nearest 8-bit sRGB code value.
#[inline]
pub fn linear_to_srgb8(linear: f32) -> u8 {
    (linear_to_srgb(linear) * 255.0).round().clamp(0.0, 255.0) as u8
}

#[inline]
fn interpolate(table: &[f32; 4096], value: f32) -> f32 {
    // NaN clamps to NaN; treat it as black
    let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };

    // Scale to LUT index range (0..4095)
    let scaled = value * 4095.0;
    let index = scaled as usize;

    if index >= 4095 {
        return table[4095];
    }

    let frac = scaled - index as f32;
    let a = table[index];
    let b = table[index + 1];
    a + (b - a) * frac
}
