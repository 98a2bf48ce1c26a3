//! Error diffusion kernel definitions.

/// An error diffusion kernel.
///
/// Each entry specifies an offset (dx, dy) to a neighbor that has not been
/// visited yet in a top-to-bottom, left-to-right raster scan, and the
/// numerator of the error share it receives.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    /// (dx, dy, weight) entries, applied in this order.
    pub entries: &'static [(i32, i32, u8)],

    /// Each neighbor receives `error * weight / divisor`.
    pub divisor: u8,
}

impl Kernel {
    /// Fraction of the error handed to each neighbor, in entry order.
    pub fn factors(&self) -> impl Iterator<Item = (i32, i32, f64)> + '_ {
        let divisor = self.divisor as f64;
        self.entries
            .iter()
            .map(move |&(dx, dy, weight)| (dx, dy, weight as f64 / divisor))
    }
}

/// Floyd-Steinberg dithering kernel.
///
/// Distributes error to 4 neighbors with 100% total propagation (16/16).
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
};
