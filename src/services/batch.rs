//! Batch conversion driven by a [`BatchConfig`].

use std::path::PathBuf;

use rayon::prelude::*;
use retro_palette::{ConvertError, FullbrightBand};

use super::palette_loader::load_palette;
use super::texture_converter::{convert_texture, ConvertJob};
use crate::error::AppError;
use crate::models::BatchConfig;

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Every file written, grouped by texture in config order
    pub written: Vec<PathBuf>,
    /// Inputs that failed, with the error message
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Convert every texture in `config` in parallel.
///
/// Palette and output directory problems abort the run. A texture that
/// fails is logged and recorded in the report; the others still convert.
pub fn run_batch(config: &BatchConfig) -> Result<BatchReport, AppError> {
    let band = FullbrightBand::new(config.fullbright.first, config.fullbright.count)
        .map_err(ConvertError::from)?;
    let palette = load_palette(&config.palette, band)?;
    std::fs::create_dir_all(&config.output_dir)?;

    let results: Vec<_> = config
        .textures
        .par_iter()
        .map(|texture| {
            let job = ConvertJob::from_texture(texture, &config.output_dir);
            (texture.input.clone(), convert_texture(&job, &palette))
        })
        .collect();

    let mut report = BatchReport::default();
    for (input, result) in results {
        match result {
            Ok(paths) => report.written.extend(paths),
            Err(e) => {
                tracing::error!(input = %input.display(), error = %e, "Texture conversion failed");
                report.failed.push((input, e.to_string()));
            }
        }
    }

    tracing::info!(
        textures = config.textures.len(),
        failed = report.failed.len(),
        files = report.written.len(),
        "Batch finished"
    );
    Ok(report)
}
