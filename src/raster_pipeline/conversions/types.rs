//! Pipeline configuration types

use crate::raster_pipeline::codec::DEFAULT_JPEG_QUALITY;
use crate::raster_pipeline::resample::ResampleMethod;

/// Configuration for the conversion pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Quality used by the JPEG encoder (1-100)
    pub jpeg_quality: u8,
    /// Whether to check loaded and target dimensions against `max_dimension`
    pub validate_dimensions: bool,
    /// Largest accepted width or height, unbounded when `None`
    pub max_dimension: Option<usize>,
    /// Whether a resize copies projection, no-data and metadata onto its
    /// result and rescales the geo-transform
    pub preserve_georeference: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            validate_dimensions: true,
            max_dimension: None,
            preserve_georeference: false,
        }
    }
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }
}

/// Builder for PipelineConfig
#[derive(Default)]
pub struct PipelineConfigBuilder {
    jpeg_quality: Option<u8>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<usize>>,
    preserve_georeference: Option<bool>,
}

impl PipelineConfigBuilder {
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = Some(quality.clamp(1, 100));
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<usize>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn preserve_georeference(mut self, preserve: bool) -> Self {
        self.preserve_georeference = Some(preserve);
        self
    }

    pub fn build(self) -> PipelineConfig {
        let default = PipelineConfig::default();
        PipelineConfig {
            jpeg_quality: self.jpeg_quality.unwrap_or(default.jpeg_quality),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
            preserve_georeference: self
                .preserve_georeference
                .unwrap_or(default.preserve_georeference),
        }
    }
}

/// Target grid and kernel for a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResampleParams {
    pub width: usize,
    pub height: usize,
    pub method: ResampleMethod,
}

impl ResampleParams {
    pub fn new(width: usize, height: usize, method: ResampleMethod) -> Self {
        Self { width, height, method }
    }
}
