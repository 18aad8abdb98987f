use std::io::Write;

use crate::raster_pipeline::common::error::Result;
use crate::raster_pipeline::model::{RasterFormat, RasterImage};

pub trait RasterWriter {
    fn write_raster(&self, image: &RasterImage, output: &mut dyn Write, format: RasterFormat) -> Result<()>;
}
