//! Per-conversion options.

/// Options for one [`ImageSource::to_indexed`](super::ImageSource::to_indexed)
/// call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvertOptions {
    /// Floyd-Steinberg dithering for LDR sources
    pub dither: bool,
    /// Mip level to produce; 0 is full size
    pub mip_level: u32,
    /// Radiance multiplier for HDR sources
    pub hdr_scale: f32,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            dither: false,
            mip_level: 0,
            hdr_scale: 1.0,
        }
    }
}

impl ConvertOptions {
    /// Same options at a different mip level.
    pub fn at_level(self, mip_level: u32) -> Self {
        Self { mip_level, ..self }
    }
}
