pub mod batch;
pub mod image_loader;
pub mod palette_loader;
pub mod png_io;
pub mod texture_converter;

pub use batch::{run_batch, BatchReport};
pub use image_loader::{load_rgb32f, load_rgba8, load_source, load_source_with_emission};
pub use palette_loader::load_palette;
pub use png_io::{read_indexed, write_indexed, write_rgb, IndexedPng};
pub use texture_converter::{convert_texture, mip_output_path, ConvertJob};
