pub mod logger;
pub mod raster_pipeline;
