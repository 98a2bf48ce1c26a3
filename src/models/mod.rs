pub mod config;

pub use config::{BatchConfig, FullbrightConfig, TextureConfig};
