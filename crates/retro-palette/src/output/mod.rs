//! Output type of the conversion pipeline.
//!
//! [`IndexedImage`] holds one palette index per pixel. The palette itself is
//! not stored: it is shared across every image converted in a run, and
//! callers pass it back in when they need colors ([`IndexedImage::to_rgb`]).

mod indexed_image;

pub use indexed_image::IndexedImage;
