//! Raster processing pipeline module
//!
//! Decodes bitmap files into band planes, resamples them with one of three
//! interpolation kernels and encodes them back, reporting progress and timing
//! through a uniform result object.

pub mod common;
pub mod model;
pub mod codec;
pub mod resample;
pub mod conversions;

pub use common::{
    RasterError,
    Result,
};

pub use model::{
    GeoTransform,
    RasterFormat,
    RasterImage,
};

pub use codec::{
    BitmapReader,
    BitmapWriter,
    RasterReader,
    RasterWriter,
    load_raster,
    probe_dimensions,
    save_raster,
};

pub use resample::{
    ResampleMethod,
    cubic_weight,
    height_for_aspect,
    resample,
};

pub use conversions::{
    Cancellable,
    CancellationToken,
    ConversionPipeline,
    PipelineConfig,
    PipelineConfigBuilder,
    ProcessingResult,
    ProgressSink,
    RasterJob,
    ResampleParams,
};
