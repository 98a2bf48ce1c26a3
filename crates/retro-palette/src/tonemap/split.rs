//! Split HDR radiance into two 8-bit exposures.

/// Exponent used when encoding the split exposures.
const DECODE_EXPONENT: f32 = 1.0 / 2.2;

/// Produce two RGB8 exposures of an HDR buffer.
///
/// The lower exposure covers scaled radiance `0..1`, the upper one `1..2`.
/// Each channel is encoded as `pow(base, 1/2.2) * 255 + 0.5` and clamped to
/// `[0, 255]`; negative bases give 0.
///
/// # Panics
///
/// Panics if the buffer length is not a multiple of 3.
///
/// # Example
///
/// ```
/// use retro_palette::tonemap::split_hdr;
///
/// let (lower, upper) = split_hdr(&[0.0, 1.0, 2.0], 1.0);
/// assert_eq!(lower, vec![0, 255, 255]);
/// assert_eq!(upper, vec![0, 0, 255]);
/// ```
pub fn split_hdr(pixels: &[f32], scale: f32) -> (Vec<u8>, Vec<u8>) {
    assert!(
        pixels.len() % 3 == 0,
        "split_hdr: buffer length {} is not a multiple of 3",
        pixels.len()
    );

    pixels
        .iter()
        .map(|&channel| {
            let scaled = channel * scale;
            (encode(scaled), encode(scaled - 1.0))
        })
        .unzip()
}

#[inline]
fn encode(base: f32) -> u8 {
    if base.is_nan() || base <= 0.0 {
        return 0;
    }
    (base.powf(DECODE_EXPONENT) * 255.0 + 0.5).clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lower_exposure_curve() {
        // 0.5^(1/2.2) * 255 + 0.5 = 186.6
        let (lower, upper) = split_hdr(&[0.5, 0.5, 0.5], 1.0);
        assert_eq!(lower, vec![186, 186, 186]);
        assert_eq!(upper, vec![0, 0, 0]);
    }

    #[test]
    fn test_upper_exposure_picks_up_overflow() {
        let (lower, upper) = split_hdr(&[1.5, 3.0, 0.0], 1.0);
        assert_eq!(lower, vec![255, 255, 0]);
        assert_eq!(upper, vec![186, 255, 0]);
    }

    #[test]
    fn test_scale_applies_to_both() {
        let (lower, upper) = split_hdr(&[0.75, 0.0, 0.0], 2.0);
        assert_eq!(lower[0], 255);
        assert_eq!(upper[0], 186);
    }

    #[test]
    fn test_negative_and_nan_are_black() {
        let (lower, upper) = split_hdr(&[-1.0, f32::NAN, 0.0], 1.0);
        assert_eq!(lower, vec![0, 0, 0]);
        assert_eq!(upper, vec![0, 0, 0]);
    }
}
