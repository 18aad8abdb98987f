//! Background execution of pipeline operations.
//!
//! Each job runs on its own thread; the work inside stays sequential.

use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::debug;

use crate::raster_pipeline::{
    codec::{RasterReader, RasterWriter},
    common::error::{RasterError, Result},
    conversions::{
        pipeline::ConversionPipeline, progress::ProgressSink, result::ProcessingResult,
        types::ResampleParams,
    },
    model::RasterFormat,
};

/// A self-contained pipeline request.
#[derive(Debug, Clone)]
pub enum RasterJob {
    Convert {
        input_path: PathBuf,
        input_format: RasterFormat,
        output_path: PathBuf,
        output_format: RasterFormat,
    },
    Resample {
        input_path: PathBuf,
        input_format: RasterFormat,
        output_path: PathBuf,
        params: ResampleParams,
    },
}

impl RasterJob {
    pub fn run<R: RasterReader, W: RasterWriter>(
        &self,
        pipeline: &ConversionPipeline<R, W>,
        progress: Option<&dyn ProgressSink>,
    ) -> ProcessingResult {
        match self {
            RasterJob::Convert {
                input_path,
                input_format,
                output_path,
                output_format,
            } => pipeline.convert_format(input_path, *input_format, output_path, *output_format, progress),
            RasterJob::Resample {
                input_path,
                input_format,
                output_path,
                params,
            } => pipeline.resample_raster(input_path, *input_format, output_path, *params, progress),
        }
    }
}

impl<R, W> ConversionPipeline<R, W>
where
    R: RasterReader + Send + Sync + 'static,
    W: RasterWriter + Send + Sync + 'static,
{
    /// Runs `job` on a dedicated thread. Join the handle for the result.
    pub fn spawn(
        pipeline: &Arc<Self>,
        job: RasterJob,
        progress: Option<Arc<dyn ProgressSink + Send + Sync>>,
    ) -> Result<JoinHandle<ProcessingResult>> {
        let pipeline = Arc::clone(pipeline);
        debug!("Spawning raster job: {:?}", job);
        thread::Builder::new()
            .name("raster-job".to_string())
            .spawn(move || {
                let sink = progress.as_deref().map(|s| s as &dyn ProgressSink);
                job.run(&pipeline, sink)
            })
            .map_err(|e| RasterError::Unhandled(format!("failed to spawn raster job: {e}")))
    }
}
