//! Raster codec module
//!
//! Decodes bitmap containers into band planes and encodes band planes back
//! into PNG/JPEG/BMP files.

mod reader;
mod writer;
mod bitmap_reader;
mod bitmap_writer;


use std::path::Path;

use tracing::{debug, instrument};

use crate::raster_pipeline::common::error::{RasterError, Result};
use crate::raster_pipeline::model::{RasterFormat, RasterImage};

pub use reader::RasterReader;
pub use writer::RasterWriter;
pub use bitmap_reader::BitmapReader;
pub use bitmap_writer::{BitmapWriter, DEFAULT_JPEG_QUALITY};

/// Reads and decodes the raster at `path` with the default reader.
#[instrument(skip_all, fields(path = %path.as_ref().display(), %format))]
pub fn load_raster(path: impl AsRef<Path>, format: RasterFormat) -> Result<RasterImage> {
    let path = path.as_ref();
    let data = read_file(path)?;
    BitmapReader.read_raster(&data, format)
}

/// Encodes `image` and writes it to `path` with the default writer.
#[instrument(skip_all, fields(path = %path.as_ref().display(), %format))]
pub fn save_raster(image: &RasterImage, path: impl AsRef<Path>, format: RasterFormat) -> Result<()> {
    let path = path.as_ref();
    let mut buffer = Vec::new();
    BitmapWriter::default().write_raster(image, &mut buffer, format)?;
    write_file(path, &buffer)
}

/// Native pixel size of the raster at `path`.
pub fn probe_dimensions(path: impl AsRef<Path>, format: RasterFormat) -> Result<(usize, usize)> {
    let image = load_raster(path, format)?;
    Ok((image.width, image.height))
}

pub(crate) fn read_file(path: &Path) -> Result<Vec<u8>> {
    let data = std::fs::read(path)
        .map_err(|e| RasterError::Decode(format!("{}: {}", path.display(), e)))?;
    debug!("Read {} bytes from {}", data.len(), path.display());
    Ok(data)
}

pub(crate) fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    std::fs::write(path, data)
        .map_err(|e| RasterError::Encode(format!("{}: {}", path.display(), e)))?;
    debug!("Wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}
