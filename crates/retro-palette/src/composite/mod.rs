//! Post-quantization compositing.
//!
//! Both passes edit an already quantized index buffer in place:
//! transparency marks see-through pixels with the sentinel index, emission
//! forces glowing pixels into the fullbright band.

mod alpha;
mod emission;

pub use alpha::{apply_alpha, split_color_alpha, ALPHA_THRESHOLD};
pub use emission::{apply_emission, EMISSION_THRESHOLD};
