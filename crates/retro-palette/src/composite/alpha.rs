use crate::color::Rgb8;
use crate::palette::TRANSPARENT_INDEX;

/// Alpha values below this are transparent.
pub const ALPHA_THRESHOLD: u8 = 128;

/// Split interleaved RGBA8 into RGB pixels and an alpha plane.
///
/// # Panics
///
/// Panics if the buffer length is not a multiple of 4.
pub fn split_color_alpha(rgba: &[u8]) -> (Vec<Rgb8>, Vec<u8>) {
    assert!(
        rgba.len() % 4 == 0,
        "split_color_alpha: buffer length {} is not a multiple of 4",
        rgba.len()
    );
    rgba.chunks_exact(4)
        .map(|p| (Rgb8::new(p[0], p[1], p[2]), p[3]))
        .unzip()
}

/// Replace every index whose alpha is below [`ALPHA_THRESHOLD`] with the
/// transparency sentinel. Opaque pixels are left alone.
///
/// # Panics
///
/// Panics if `indexed` and `alpha` differ in length.
///
/// # Example
///
/// ```
/// use retro_palette::composite::apply_alpha;
///
/// let mut indexed = vec![3, 3, 3];
/// apply_alpha(&mut indexed, &[0, 127, 128]);
/// assert_eq!(indexed, vec![255, 255, 3]);
/// ```
pub fn apply_alpha(indexed: &mut [u8], alpha: &[u8]) {
    assert_eq!(
        indexed.len(),
        alpha.len(),
        "apply_alpha: index and alpha buffers must match"
    );
    for (index, &a) in indexed.iter_mut().zip(alpha) {
        if a < ALPHA_THRESHOLD {
            *index = TRANSPARENT_INDEX;
        }
    }
}
