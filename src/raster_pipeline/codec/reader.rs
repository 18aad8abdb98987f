use crate::raster_pipeline::common::error::Result;
use crate::raster_pipeline::model::{RasterFormat, RasterImage};

pub trait RasterReader {
    fn read_raster(&self, data: &[u8], format: RasterFormat) -> Result<RasterImage>;
}
