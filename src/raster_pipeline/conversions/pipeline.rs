use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::time::Instant;

use tracing::{info, instrument, warn};

use crate::raster_pipeline::{
    codec::{self, BitmapReader, BitmapWriter, RasterReader, RasterWriter},
    common::error::{RasterError, Result},
    conversions::{
        progress::ProgressSink,
        result::ProcessingResult,
        timing::PipelineTimings,
        types::{PipelineConfig, ResampleParams},
    },
    model::{RasterFormat, RasterImage},
    resample,
};

const CONVERT_FAILED: &str = "Raster format conversion failed";
const RESAMPLE_FAILED: &str = "Raster resampling failed";

pub struct ConversionPipeline<R: RasterReader, W: RasterWriter> {
    reader: R,
    writer: W,
    config: PipelineConfig,
}

impl ConversionPipeline<BitmapReader, BitmapWriter> {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            reader: BitmapReader,
            writer: BitmapWriter::with_jpeg_quality(config.jpeg_quality),
            config,
        }
    }
}

impl Default for ConversionPipeline<BitmapReader, BitmapWriter> {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

fn report(progress: Option<&dyn ProgressSink>, percent: u8) {
    if let Some(sink) = progress {
        sink.report(percent);
    }
}

fn check_cancelled(progress: Option<&dyn ProgressSink>) -> Result<()> {
    match progress {
        Some(sink) if sink.is_cancelled() => Err(RasterError::Cancelled),
        _ => Ok(()),
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

impl<R: RasterReader, W: RasterWriter> ConversionPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: PipelineConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(RasterError::Validation(format!(
                "raster dimensions must be positive, got {width}x{height}"
            )));
        }

        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                warn!("Raster dimensions {}x{} exceed maximum {}", width, height, max);
                return Err(RasterError::Validation(format!(
                    "raster dimensions {width}x{height} exceed maximum {max}"
                )));
            }
        }

        Ok(())
    }

    fn load(&self, path: &Path, format: RasterFormat) -> Result<RasterImage> {
        let _span = tracing::info_span!("load_raster", path = %path.display(), %format).entered();
        let data = codec::read_file(path)?;
        let image = self.reader.read_raster(&data, format)?;
        self.validate_dimensions(image.width, image.height)?;
        Ok(image)
    }

    fn save(&self, image: &RasterImage, path: &Path, format: RasterFormat) -> Result<()> {
        let _span = tracing::info_span!("save_raster", path = %path.display(), %format).entered();
        let mut buffer = Vec::new();
        self.writer.write_raster(image, &mut buffer, format)?;
        codec::write_file(path, &buffer)
    }

    /// Loads `input_path` and writes it back out as `output_format`.
    ///
    /// Progress milestones: 10 before loading, 50 before saving, 100 when done.
    #[instrument(skip_all, fields(input = %input_path.as_ref().display(), output = %output_path.as_ref().display()))]
    pub fn convert_format(
        &self,
        input_path: impl AsRef<Path>,
        input_format: RasterFormat,
        output_path: impl AsRef<Path>,
        output_format: RasterFormat,
        progress: Option<&dyn ProgressSink>,
    ) -> ProcessingResult {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();
        info!("Converting raster {} -> {}", input_format, output_format);

        self.run(CONVERT_FAILED, |timings| {
            check_cancelled(progress)?;
            report(progress, 10);
            let raster = timings.time("load", || self.load(input_path, input_format))?;

            check_cancelled(progress)?;
            report(progress, 50);
            timings.time("save", || self.save(&raster, output_path, output_format))?;

            report(progress, 100);
            Ok(ProcessingResult::success("Raster format conversion succeeded", 1)
                .with_output(output_path)
                .with_detail("input_format", input_format.to_string())
                .with_detail("output_format", output_format.to_string())
                .with_detail("width", raster.width)
                .with_detail("height", raster.height)
                .with_detail("band_count", raster.band_count))
        })
    }

    /// Loads `input_path`, resamples it to `params` and saves it in the
    /// input's own format.
    ///
    /// Progress milestones: 10 before loading, 30 before resampling, 80 before
    /// saving, 100 when done.
    #[instrument(skip_all, fields(input = %input_path.as_ref().display(), output = %output_path.as_ref().display()))]
    pub fn resample_raster(
        &self,
        input_path: impl AsRef<Path>,
        input_format: RasterFormat,
        output_path: impl AsRef<Path>,
        params: ResampleParams,
        progress: Option<&dyn ProgressSink>,
    ) -> ProcessingResult {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();
        info!(
            "Resampling raster to {}x{} ({})",
            params.width, params.height, params.method
        );

        self.run(RESAMPLE_FAILED, |timings| {
            check_cancelled(progress)?;
            report(progress, 10);
            let raster = timings.time("load", || self.load(input_path, input_format))?;

            check_cancelled(progress)?;
            report(progress, 30);
            let resampled = timings.time("resample", || {
                let _span = tracing::info_span!("resample", method = %params.method).entered();
                self.validate_dimensions(params.width, params.height)?;
                let resampled = resample::resample(&raster, params.width, params.height, params.method)?;
                Ok::<_, RasterError>(if self.config.preserve_georeference {
                    resampled.with_georeference_of(&raster)
                } else {
                    resampled
                })
            })?;

            check_cancelled(progress)?;
            report(progress, 80);
            timings.time("save", || self.save(&resampled, output_path, input_format))?;

            report(progress, 100);
            let message = format!(
                "Raster resampled ({}x{} → {}x{})",
                raster.width, raster.height, resampled.width, resampled.height
            );
            Ok(ProcessingResult::success(message, 1)
                .with_output(output_path)
                .with_detail("input_width", raster.width)
                .with_detail("input_height", raster.height)
                .with_detail("output_width", resampled.width)
                .with_detail("output_height", resampled.height)
                .with_detail("band_count", resampled.band_count)
                .with_detail("method", params.method.to_string()))
        })
    }

    /// Runs one operation and folds its outcome, panics included, into a
    /// `ProcessingResult` stamped with elapsed time and step timings.
    fn run<F>(&self, failure_message: &str, operation: F) -> ProcessingResult
    where
        F: FnOnce(&mut PipelineTimings) -> Result<ProcessingResult>,
    {
        let started = Instant::now();
        let mut timings = PipelineTimings::new();

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| operation(&mut timings)))
            .unwrap_or_else(|payload| Err(RasterError::Unhandled(panic_message(payload))));

        let elapsed = started.elapsed();
        timings.log_summary();

        let result = match outcome {
            Ok(result) => {
                info!("{} in {:.3}ms", result.message, elapsed.as_secs_f64() * 1000.0);
                result
            }
            Err(e) => {
                warn!("{}: {}", failure_message, e);
                ProcessingResult::failure(e.to_string(), failure_message)
            }
        };

        let mut result = result.with_detail("timings", timings.to_json());
        result.elapsed_milliseconds = elapsed.as_millis() as u64;
        result
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}

