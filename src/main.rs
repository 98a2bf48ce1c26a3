use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use retro_palette::{generate_colormap, split_hdr, FullbrightBand, IndexedImage, Palette};
use texbake::models::BatchConfig;
use texbake::services::{
    convert_texture, load_palette, load_rgb32f, read_indexed, run_batch, write_indexed,
    write_rgb, ConvertJob,
};

#[derive(Parser)]
#[command(name = "texbake")]
#[command(about = "Convert images into fixed-palette indexed textures for retro 3D engines")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Palette file and fullbright band options
#[derive(Args)]
struct PaletteArgs {
    /// Palette file: raw 768-byte lump or 16x16 image
    #[arg(short, long)]
    palette: PathBuf,

    /// First palette index of the fullbright band
    #[arg(long, default_value_t = FullbrightBand::QUAKE.first())]
    fullbright_first: u8,

    /// Number of entries in the fullbright band
    #[arg(long, default_value_t = FullbrightBand::QUAKE.count())]
    fullbright_count: u8,
}

impl PaletteArgs {
    fn load(&self) -> anyhow::Result<Palette> {
        let band = FullbrightBand::new(self.fullbright_first, self.fullbright_count)?;
        load_palette(&self.palette, band)
            .with_context(|| format!("loading palette {}", self.palette.display()))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an image to indexed PNGs, one per mip level
    Convert {
        /// Source image (LDR, HDR/EXR, or indexed PNG)
        input: PathBuf,

        /// Output PNG for mip level 0; level N goes to <stem>.mipN.png
        output: PathBuf,

        #[command(flatten)]
        palette: PaletteArgs,

        /// Floyd-Steinberg dithering (LDR sources only)
        #[arg(short, long)]
        dither: bool,

        /// Number of mip levels to write
        #[arg(short, long, default_value_t = 1)]
        mips: u32,

        /// Radiance multiplier for HDR sources
        #[arg(long, default_value_t = 1.0)]
        hdr_scale: f32,

        /// Emission mask, same size as the input
        #[arg(short, long)]
        emission: Option<PathBuf>,

        /// Also write an RGB preview of level 0
        #[arg(long)]
        preview: Option<PathBuf>,
    },
    /// Expand an indexed PNG to RGB through a palette
    Import {
        /// 8-bit indexed PNG
        input: PathBuf,

        /// Output RGB PNG
        output: PathBuf,

        #[command(flatten)]
        palette: PaletteArgs,
    },
    /// Write the 64-level light shading table of a palette
    Colormap {
        /// Output 256x64 indexed PNG
        output: PathBuf,

        #[command(flatten)]
        palette: PaletteArgs,
    },
    /// Split an HDR image into two 8-bit exposures
    HdrSplit {
        /// HDR source image
        input: PathBuf,

        /// Exposure covering radiance 0..1
        lower: PathBuf,

        /// Exposure covering radiance 1..2
        upper: PathBuf,

        /// Radiance multiplier
        #[arg(long, default_value_t = 1.0)]
        hdr_scale: f32,
    },
    /// Convert every texture listed in a YAML config
    Batch {
        /// Batch config file
        config: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "texbake=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    match cli.command {
        Commands::Convert {
            input,
            output,
            palette,
            dither,
            mips,
            hdr_scale,
            emission,
            preview,
        } => {
            let palette = palette.load()?;
            let job = ConvertJob {
                input,
                output,
                emission,
                dither,
                mips,
                hdr_scale,
                preview,
            };
            run_convert_command(&job, &palette)
        }
        Commands::Import {
            input,
            output,
            palette,
        } => run_import_command(&input, &output, &palette.load()?),
        Commands::Colormap { output, palette } => run_colormap_command(&output, &palette.load()?),
        Commands::HdrSplit {
            input,
            lower,
            upper,
            hdr_scale,
        } => run_hdr_split_command(&input, &lower, &upper, hdr_scale),
        Commands::Batch { config } => run_batch_command(&config),
    }
}

fn run_convert_command(job: &ConvertJob, palette: &Palette) -> anyhow::Result<()> {
    let written = convert_texture(job, palette)
        .with_context(|| format!("converting {}", job.input.display()))?;
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}

fn run_import_command(input: &Path, output: &Path, palette: &Palette) -> anyhow::Result<()> {
    let png = read_indexed(input).with_context(|| format!("reading {}", input.display()))?;
    let image = IndexedImage::new(png.indices, png.width, png.height, 0);
    write_rgb(output, image.width(), image.height(), &image.to_rgb(palette))
        .with_context(|| format!("writing {}", output.display()))?;
    tracing::info!(input = %input.display(), output = %output.display(), "Imported picture");
    Ok(())
}

fn run_colormap_command(output: &Path, palette: &Palette) -> anyhow::Result<()> {
    let colormap = generate_colormap(palette);
    let image = IndexedImage::new(colormap, 256, retro_palette::colormap::COLORMAP_ROWS as u32, 0);
    write_indexed(output, &image, palette)
        .with_context(|| format!("writing {}", output.display()))?;
    tracing::info!(output = %output.display(), "Wrote colormap");
    Ok(())
}

fn run_hdr_split_command(
    input: &Path,
    lower: &Path,
    upper: &Path,
    hdr_scale: f32,
) -> anyhow::Result<()> {
    let (width, height, radiance) =
        load_rgb32f(input).with_context(|| format!("reading {}", input.display()))?;
    let (low, high) = split_hdr(&radiance, hdr_scale);
    write_rgb(lower, width, height, &low)
        .with_context(|| format!("writing {}", lower.display()))?;
    write_rgb(upper, width, height, &high)
        .with_context(|| format!("writing {}", upper.display()))?;
    tracing::info!(input = %input.display(), width, height, "Split HDR image");
    Ok(())
}

fn run_batch_command(config_path: &Path) -> anyhow::Result<()> {
    let config = BatchConfig::load(config_path)?;
    let report = run_batch(&config)?;

    if !report.is_success() {
        anyhow::bail!(
            "{} of {} textures failed",
            report.failed.len(),
            config.textures.len()
        );
    }
    Ok(())
}
