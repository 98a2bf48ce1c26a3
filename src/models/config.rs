use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Batch configuration loaded from a YAML file
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BatchConfig {
    /// Palette file: raw 768-byte lump or 16x16 image
    pub palette: PathBuf,

    /// Fullbright band of the palette
    #[serde(default)]
    pub fullbright: FullbrightConfig,

    /// Directory receiving converted textures
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Textures to convert
    #[serde(default)]
    pub textures: Vec<TextureConfig>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Fullbright band as written in the config file
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FullbrightConfig {
    pub first: u8,
    pub count: u8,
}

impl Default for FullbrightConfig {
    fn default() -> Self {
        let band = retro_palette::FullbrightBand::QUAKE;
        Self {
            first: band.first(),
            count: band.count(),
        }
    }
}

/// Configuration for one texture
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TextureConfig {
    /// Source image
    pub input: PathBuf,

    /// Floyd-Steinberg dithering (LDR sources only)
    #[serde(default)]
    pub dither: bool,

    /// Number of mip levels to write, starting at level 0
    #[serde(default = "default_mips")]
    pub mips: u32,

    /// Radiance multiplier for HDR sources
    #[serde(default = "default_hdr_scale")]
    pub hdr_scale: f32,

    /// Optional emission mask, same size as the source
    #[serde(default)]
    pub emission: Option<PathBuf>,

    /// Output name; defaults to the input file stem
    #[serde(default)]
    pub name: Option<String>,
}

fn default_mips() -> u32 {
    1
}

fn default_hdr_scale() -> f32 {
    1.0
}

impl TextureConfig {
    /// Output name of this texture
    pub fn output_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self
                .input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "texture".to_string()),
        }
    }
}

impl BatchConfig {
    /// Parse a YAML document
    ///
    /// Two textures that would write the same output name are rejected.
    pub fn from_yaml(content: &str, path: &Path) -> Result<Self, AppError> {
        let config: Self = serde_yaml::from_str(content).map_err(|e| AppError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut seen = HashSet::new();
        for texture in &config.textures {
            let name = texture.output_name();
            if !seen.insert(name.clone()) {
                return Err(AppError::Config {
                    path: path.to_path_buf(),
                    message: format!(
                        "duplicate output name `{name}` (from {}); set `name:` to disambiguate",
                        texture.input.display()
                    ),
                });
            }
        }
        Ok(config)
    }

    /// Load a config file, resolving every relative path against the
    /// directory that contains it
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path).map_err(|e| AppError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = Self::from_yaml(&content, path)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        let config = config.resolve_paths(base);

        tracing::info!(
            path = %path.display(),
            textures = config.textures.len(),
            "Loaded batch configuration"
        );
        Ok(config)
    }

    /// Make relative paths relative to `base`
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        let resolve = |p: &Path| {
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                base.join(p)
            }
        };

        self.palette = resolve(&self.palette);
        self.output_dir = resolve(&self.output_dir);
        for texture in &mut self.textures {
            texture.input = resolve(&texture.input);
            texture.emission = texture.emission.as_deref().map(resolve);
        }
        self
    }
}
