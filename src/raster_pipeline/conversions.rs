//! Pipeline conversions module
//!
//! Orchestrates codec and resampler into the two end-to-end operations,
//! with progress reporting, step timing and uniform result reporting.

mod job;
mod pipeline;
mod progress;
mod result;
mod timing;
pub mod types;


pub use job::RasterJob;
pub use pipeline::ConversionPipeline;
pub use progress::{Cancellable, CancellationToken, ProgressSink};
pub use result::ProcessingResult;
pub use timing::{PipelineTimings, StepTiming, Timer};
pub use types::{PipelineConfig, PipelineConfigBuilder, ResampleParams};
