//! 8-bit sRGB color type

use std::fmt;

/// An 8-bit sRGB color, as stored in palette lumps and LDR images.
///
/// No gamma handling happens on this type: palette matching compares raw
/// code values, which is what the engine's renderer does with them too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Rgb8 = Rgb8::new(0, 0, 0);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a byte array [R, G, B].
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array [R, G, B].
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Squared Euclidean distance in RGB code space.
    ///
    /// Orders candidates exactly like the true Euclidean distance but stays
    /// in integers, so ties are detected exactly.
    #[inline]
    pub fn distance_squared(self, other: Rgb8) -> i32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        dr * dr + dg * dg + db * db
    }

    /// Largest of the three channels.
    #[inline]
    pub fn max_channel(self) -> u8 {
        self.r.max(self.g).max(self.b)
    }
}

impl From<[u8; 3]> for Rgb8 {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}
