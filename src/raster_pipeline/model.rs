//! Raster data model
//!
//! Band-separated pixel planes plus the georeferencing fields that travel
//! with them through the pipeline.

mod format;
pub mod types;

pub use format::RasterFormat;
pub use types::{DEFAULT_NO_DATA, GeoTransform, RasterImage, scale_geo_transform};
