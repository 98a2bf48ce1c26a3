//! File-level texture conversion: decode, convert every mip level, write
//! indexed PNGs.

use std::path::{Path, PathBuf};

use retro_palette::{Converter, Palette};

use super::image_loader::load_source_with_emission;
use super::png_io::{write_indexed, write_rgb};
use crate::error::AppError;
use crate::models::TextureConfig;

/// One texture to convert.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertJob {
    pub input: PathBuf,
    /// Level 0 output; further levels go next to it
    pub output: PathBuf,
    pub emission: Option<PathBuf>,
    pub dither: bool,
    /// Number of levels to write, at least 1
    pub mips: u32,
    pub hdr_scale: f32,
    /// Optional RGB preview of level 0
    pub preview: Option<PathBuf>,
}

impl ConvertJob {
    /// Job for a batch entry, writing into `output_dir`.
    pub fn from_texture(texture: &TextureConfig, output_dir: &Path) -> Self {
        Self {
            input: texture.input.clone(),
            output: output_dir.join(format!("{}.png", texture.output_name())),
            emission: texture.emission.clone(),
            dither: texture.dither,
            mips: texture.mips,
            hdr_scale: texture.hdr_scale,
            preview: None,
        }
    }
}

/// Output path of mip `level`: `out.png` for level 0, `out.mip2.png` for
/// level 2.
pub fn mip_output_path(output: &Path, level: u32) -> PathBuf {
    if level == 0 {
        return output.to_path_buf();
    }
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output.with_file_name(format!("{stem}.mip{level}.png"))
}

/// Run `job` against `palette`, returning the written files in level order.
pub fn convert_texture(job: &ConvertJob, palette: &Palette) -> Result<Vec<PathBuf>, AppError> {
    let source = load_source_with_emission(&job.input, job.emission.as_deref(), palette)?;
    let converter = Converter::new(palette.clone())
        .dither(job.dither)
        .hdr_scale(job.hdr_scale);

    let mips = converter.convert_mips(&source, job.mips.max(1))?;

    let mut written = Vec::with_capacity(mips.len());
    for mip in &mips {
        let path = mip_output_path(&job.output, mip.level());
        write_indexed(&path, mip, palette)?;
        written.push(path);
    }

    if let (Some(preview), Some(base)) = (&job.preview, mips.first()) {
        write_rgb(preview, base.width(), base.height(), &base.to_rgb(palette))?;
    }

    tracing::info!(
        input = %job.input.display(),
        kind = ?source.kind(),
        width = source.width(),
        height = source.height(),
        levels = mips.len(),
        "Converted texture"
    );
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mip_output_path() {
        let out = Path::new("out/brick.png");
        assert_eq!(mip_output_path(out, 0), PathBuf::from("out/brick.png"));
        assert_eq!(mip_output_path(out, 1), PathBuf::from("out/brick.mip1.png"));
        assert_eq!(mip_output_path(out, 3), PathBuf::from("out/brick.mip3.png"));
    }

    #[test]
    fn test_job_from_texture() {
        let texture = TextureConfig {
            input: PathBuf::from("src/lava.hdr"),
            dither: false,
            mips: 4,
            hdr_scale: 2.0,
            emission: None,
            name: None,
        };
        let job = ConvertJob::from_texture(&texture, Path::new("build"));
        assert_eq!(job.output, PathBuf::from("build/lava.png"));
        assert_eq!(job.mips, 4);
        assert_eq!(job.hdr_scale, 2.0);
    }
}
