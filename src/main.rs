use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use depth_tiff_jpeg_rs::image_pipeline::{BatchConverter, ConversionConfig, NormalizationMethod};
use depth_tiff_jpeg_rs::logger;

use tracing::{info, warn};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Method {
    /// Min-max stretch to the full 8-bit range
    Linear,
    /// Histogram equalization (single-channel frames only)
    HistEq,
}

impl From<Method> for NormalizationMethod {
    fn from(method: Method) -> Self {
        match method {
            Method::Linear => NormalizationMethod::Linear,
            Method::HistEq => NormalizationMethod::HistEq,
        }
    }
}

#[derive(Parser)]
#[command(name = "depth-tiff-jpeg")]
#[command(about = "Convert 16-bit depth/amplitude TIFFs into normalized 8-bit JPEGs", long_about = None)]
struct Cli {
    /// Directory holding .tif/.tiff files
    #[arg(long, default_value = "input-tiff")]
    input: PathBuf,

    /// Directory for the .jpg output (created if missing)
    #[arg(long, default_value = "output-jpeg")]
    output: PathBuf,

    /// JPEG quality, 0 (low) to 100 (best)
    #[arg(long, default_value_t = 95)]
    quality: u8,

    /// Output size relative to input, e.g. 0.5 for half-size
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Keep the original orientation
    #[arg(long)]
    no_rotate: bool,

    /// Clockwise rotation in degrees: 90, 180 or 270
    #[arg(long, default_value_t = 180)]
    rotation_angle: u32,

    /// Normalization for amplitude and generic frames
    #[arg(long, value_enum, default_value_t = Method::Linear)]
    method: Method,

    /// Smallest valid depth sample; anything below is black
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    depth_clip_min: i32,

    /// Largest valid depth sample; anything above is black
    #[arg(long, default_value_t = 65535, allow_negative_numbers = true)]
    depth_clip_max: i32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init();

    let config = ConversionConfig::builder()
        .jpeg_quality(cli.quality)
        .scale_factor(cli.scale)
        .rotate(!cli.no_rotate)
        .rotation_angle(cli.rotation_angle)
        .normalization_method(cli.method.into())
        .depth_clip(cli.depth_clip_min, cli.depth_clip_max)
        .build();
    let converter = BatchConverter::new(config).context("invalid conversion settings")?;

    let config = converter.pipeline().config();
    info!("TIFF to JPEG converter initialized");
    info!("Quality: {}, scale: {}", config.jpeg_quality, config.scale_factor);
    info!(
        "Rotation: {}",
        if config.rotate {
            format!("{} degrees", config.rotation_angle)
        } else {
            "disabled".to_string()
        }
    );
    info!(
        "Normalization: {:?}, depth clip [{}, {}]",
        config.normalization.method,
        config.normalization.depth_clip_min,
        config.normalization.depth_clip_max
    );

    let summary = converter
        .run(&cli.input, &cli.output)
        .with_context(|| format!("converting {}", cli.input.display()))?;

    if summary.failed.is_empty() {
        info!("{} of {} images converted", summary.converted.len(), summary.attempted());
    } else {
        warn!(
            "{} of {} images converted, {} failed",
            summary.converted.len(),
            summary.attempted(),
            summary.failed.len()
        );
    }

    Ok(())
}
