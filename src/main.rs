use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use gis_raster_rs::logger;
use gis_raster_rs::raster_pipeline::{
    ConversionPipeline, PipelineConfig, ProcessingResult, ProgressSink, RasterFormat,
    ResampleMethod, ResampleParams, height_for_aspect, probe_dimensions,
};

#[derive(Parser)]
#[command(name = "gis-raster")]
#[command(version, about = "Raster format conversion and resampling", long_about = None)]
struct Cli {
    /// Print the processing result as JSON
    #[arg(long, global = true)]
    json: bool,

    /// JPEG encoder quality (1-100)
    #[arg(long, global = true, default_value_t = 75)]
    jpeg_quality: u8,

    /// Largest accepted width or height, 0 disables the check
    #[arg(long, global = true, default_value_t = 0)]
    max_dimension: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the pixel size of a raster
    Info {
        input: PathBuf,
        /// Input format, inferred from the extension when omitted
        #[arg(long)]
        format: Option<RasterFormat>,
    },
    /// Convert a raster to another container format
    Convert {
        input: PathBuf,
        output: PathBuf,
        #[arg(long)]
        from: Option<RasterFormat>,
        #[arg(long)]
        to: Option<RasterFormat>,
    },
    /// Resample a raster to new dimensions, keeping its format
    Resample {
        input: PathBuf,
        output: PathBuf,
        #[arg(long)]
        format: Option<RasterFormat>,
        #[arg(long)]
        width: usize,
        /// Required unless --keep-aspect is given
        #[arg(long)]
        height: Option<usize>,
        /// nearest, bilinear or cubic
        #[arg(long, default_value = "bilinear")]
        method: ResampleMethod,
        /// Derive the height from the width and the input's aspect ratio
        #[arg(long)]
        keep_aspect: bool,
        /// Carry projection and metadata over to the resampled raster
        #[arg(long)]
        preserve_georeference: bool,
    },
}

struct BarSink(ProgressBar);

impl ProgressSink for BarSink {
    fn report(&self, percent: u8) {
        self.0.set_position(percent as u64);
    }
}

fn progress_bar(hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos:>3}%")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );
    bar
}

fn resolve_format(explicit: Option<RasterFormat>, path: &Path) -> Result<RasterFormat> {
    explicit
        .or_else(|| RasterFormat::from_path(path))
        .with_context(|| format!("cannot infer the raster format of {}, pass it explicitly", path.display()))
}

fn check_distinct_formats(from: RasterFormat, to: RasterFormat) -> Result<()> {
    if from == to {
        bail!("input and output formats are both {from}, nothing to convert");
    }
    Ok(())
}

/// `--max-dimension 0` means no limit.
fn max_dimension_limit(value: usize) -> Option<usize> {
    (value > 0).then_some(value)
}

/// Target height for a resize. With `keep_aspect` the source size comes from
/// `dimensions` and any explicit height is ignored.
fn resolve_height(
    width: usize,
    height: Option<usize>,
    keep_aspect: bool,
    dimensions: impl FnOnce() -> Result<(usize, usize)>,
) -> Result<usize> {
    if !keep_aspect {
        return height.context("--height is required unless --keep-aspect is set");
    }
    if height.is_some() {
        warn!("--height is ignored when --keep-aspect is set");
    }
    let (src_width, src_height) = dimensions()?;
    Ok(height_for_aspect(width, src_width, src_height))
}

fn finish(result: ProcessingResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if result.success {
        println!("{} ({} ms)", result.message, result.elapsed_milliseconds);
    }

    if !result.success {
        bail!(
            "{}: {}",
            result.message,
            result.error_message.as_deref().unwrap_or("unknown error")
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    logger::init();
    let cli = Cli::parse();

    let config = PipelineConfig::builder()
        .jpeg_quality(cli.jpeg_quality)
        .max_dimension(max_dimension_limit(cli.max_dimension));

    match cli.command {
        Commands::Info { input, format } => {
            let format = resolve_format(format, &input)?;
            let (width, height) = probe_dimensions(&input, format)
                .with_context(|| format!("failed to read {}", input.display()))?;
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({ "path": input, "format": format.to_string(), "width": width, "height": height })
                );
            } else {
                println!("{}: {} {}x{}", input.display(), format, width, height);
            }
            Ok(())
        }
        Commands::Convert { input, output, from, to } => {
            let from = resolve_format(from, &input)?;
            let to = resolve_format(to, &output)?;
            check_distinct_formats(from, to)?;

            let pipeline = ConversionPipeline::new(config.build());
            debug!("Pipeline config: {:?}", pipeline.config());
            info!("Converting {} ({}) -> {} ({})", input.display(), from, output.display(), to);

            let bar = BarSink(progress_bar(cli.json));
            let result = pipeline.convert_format(&input, from, &output, to, Some(&bar));
            bar.0.finish_and_clear();
            finish(result, cli.json)
        }
        Commands::Resample {
            input,
            output,
            format,
            width,
            height,
            method,
            keep_aspect,
            preserve_georeference,
        } => {
            let format = resolve_format(format, &input)?;
            let height = resolve_height(width, height, keep_aspect, || {
                probe_dimensions(&input, format)
                    .with_context(|| format!("failed to read {}", input.display()))
            })?;

            let pipeline = ConversionPipeline::new(
                config.preserve_georeference(preserve_georeference).build(),
            );
            debug!("Pipeline config: {:?}", pipeline.config());
            let params = ResampleParams::new(width, height, method);

            let bar = BarSink(progress_bar(cli.json));
            let result = pipeline.resample_raster(&input, format, &output, params, Some(&bar));
            bar.0.finish_and_clear();
            finish(result, cli.json)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_formats_refused() {
        let err = check_distinct_formats(RasterFormat::Png, RasterFormat::Png).unwrap_err();
        assert!(err.to_string().contains("nothing to convert"));
        assert!(check_distinct_formats(RasterFormat::Png, RasterFormat::Bmp).is_ok());
    }

    #[test]
    fn test_zero_max_dimension_disables_limit() {
        assert_eq!(max_dimension_limit(0), None);
        assert_eq!(max_dimension_limit(4096), Some(4096));
    }

    #[test]
    fn test_default_max_dimension_is_unbounded() {
        let cli = Cli::try_parse_from(["gis-raster", "info", "in.png"]).unwrap();
        assert_eq!(max_dimension_limit(cli.max_dimension), None);
    }

    #[test]
    fn test_keep_aspect_derives_height_from_source() {
        let height = resolve_height(50, None, true, || Ok((200, 100))).unwrap();
        assert_eq!(height, 25);

        let height = resolve_height(50, Some(7), true, || Ok((100, 300))).unwrap();
        assert_eq!(height, 150);
    }

    #[test]
    fn test_explicit_height_skips_source_read() {
        let height = resolve_height(50, Some(7), false, || -> Result<(usize, usize)> {
            panic!("source should not be read")
        })
        .unwrap();
        assert_eq!(height, 7);
    }

    #[test]
    fn test_missing_height_without_keep_aspect() {
        let err = resolve_height(50, None, false, || Ok((10, 10))).unwrap_err();
        assert!(err.to_string().contains("--height is required"));
    }

    #[test]
    fn test_keep_aspect_propagates_read_failure() {
        let result = resolve_height(50, None, true, || bail!("failed to read in.png"));
        assert!(result.is_err());
    }
}
