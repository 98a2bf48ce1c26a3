use crate::color::Rgb8;
use crate::palette::Palette;

/// Emission channels above this mark a pixel as glowing.
pub const EMISSION_THRESHOLD: u8 = 10;

/// Force glowing pixels into the fullbright band.
///
/// Every pixel whose emission color exceeds [`EMISSION_THRESHOLD`] on any
/// channel is replaced by the nearest fullbright entry for that emission
/// color. Other pixels are untouched.
///
/// # Panics
///
/// Panics if `indexed` and `emission` differ in length.
pub fn apply_emission(indexed: &mut [u8], emission: &[Rgb8], palette: &Palette) {
    assert_eq!(
        indexed.len(),
        emission.len(),
        "apply_emission: index and emission buffers must match"
    );
    for (index, &glow) in indexed.iter_mut().zip(emission) {
        if glow.max_channel() > EMISSION_THRESHOLD {
            *index = palette.nearest_fullbright(glow);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::FullbrightBand;

    fn grey_palette() -> Palette {
        let bytes: Vec<u8> = (0..=255u8).flat_map(|i| [i, i, i]).collect();
        Palette::from_bytes(&bytes).unwrap()
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let palette = grey_palette();
        let mut indexed = vec![7; 3];
        let emission = [
            Rgb8::new(10, 10, 10),
            Rgb8::new(0, 11, 0),
            Rgb8::new(255, 255, 255),
        ];
        apply_emission(&mut indexed, &emission, &palette);
        assert_eq!(indexed[0], 7);
        assert!(FullbrightBand::QUAKE.contains(indexed[1]));
        assert_eq!(indexed[2], 254);
    }

    #[test]
    fn test_dim_emission_still_picks_band_entry() {
        // Dark glow maps to the darkest fullbright entry, never below the band
        let palette = grey_palette();
        let mut indexed = vec![0];
        apply_emission(&mut indexed, &[Rgb8::new(20, 20, 20)], &palette);
        assert_eq!(indexed, vec![224]);
    }

    #[test]
    #[should_panic(expected = "must match")]
    fn test_length_mismatch_panics() {
        let palette = grey_palette();
        apply_emission(&mut [0; 2], &[Rgb8::BLACK], &palette);
    }
}
