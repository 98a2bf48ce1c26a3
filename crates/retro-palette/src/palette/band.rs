//! Fullbright band configuration.

use super::error::PaletteError;
use super::palette::TRANSPARENT_INDEX;

/// The contiguous range of palette entries that the engine renders at full
/// brightness regardless of lighting.
///
/// Entries below `first` form the normal (lit) band. The band never covers
/// the transparency sentinel at index 255.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FullbrightBand {
    first: u8,
    count: u8,
}

impl FullbrightBand {
    /// Quake: entries 224..=254 are fullbright.
    pub const QUAKE: FullbrightBand = FullbrightBand {
        first: 224,
        count: 31,
    };

    /// Hexen II: entries 240..=254 are fullbright.
    pub const HEXEN2: FullbrightBand = FullbrightBand {
        first: 240,
        count: 15,
    };

    /// Create a band starting at `first` covering `count` entries.
    ///
    /// # Errors
    ///
    /// [`PaletteError::InvalidBand`] if the band is empty, starts at 0
    /// (leaving no lit colors) or reaches the transparency sentinel.
    pub fn new(first: u8, count: u8) -> Result<Self, PaletteError> {
        if first == 0 || count == 0 || first as u16 + count as u16 > TRANSPARENT_INDEX as u16 {
            return Err(PaletteError::InvalidBand { first, count });
        }
        Ok(Self { first, count })
    }

    /// Band running from `first` up to and including index 254.
    pub fn starting_at(first: u8) -> Result<Self, PaletteError> {
        Self::new(first, TRANSPARENT_INDEX.wrapping_sub(first))
    }

    /// First fullbright palette index.
    #[inline]
    pub fn first(&self) -> u8 {
        self.first
    }

    /// Number of fullbright entries.
    #[inline]
    pub fn count(&self) -> u8 {
        self.count
    }

    /// Returns true if `index` lies inside the band.
    #[inline]
    pub fn contains(&self, index: u8) -> bool {
        index >= self.first && (index as u16) < self.first as u16 + self.count as u16
    }
}

impl Default for FullbrightBand {
    fn default() -> Self {
        Self::QUAKE
    }
}
