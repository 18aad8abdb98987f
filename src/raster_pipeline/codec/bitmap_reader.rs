//! Bitmap reader built on the `image` crate.
//!
//! Every supported container (TIFF, PNG, JPEG, BMP) is treated as a plain
//! bitmap: the pixels are converted to 8-bit RGB and split into three band
//! planes. No format-specific metadata, GeoTIFF tags included, is extracted.

use tracing::{debug, warn};

use crate::raster_pipeline::codec::reader::RasterReader;
use crate::raster_pipeline::common::error::{RasterError, Result};
use crate::raster_pipeline::model::{RasterFormat, RasterImage};

/// Number of planes produced by every decode (R, G, B).
const DECODED_BANDS: usize = 3;

pub struct BitmapReader;

impl RasterReader for BitmapReader {
    /// Decodes `data` into a 3-band raster.
    ///
    /// The container is sniffed from the content; `format` is only checked
    /// against it and a mismatch is logged, not rejected.
    fn read_raster(&self, data: &[u8], format: RasterFormat) -> Result<RasterImage> {
        debug!("Decoding raster, {} bytes, declared {}", data.len(), format);

        let detected = image::guess_format(data)
            .map_err(|e| RasterError::Decode(e.to_string()))?;
        if !format.matches_content(detected) {
            warn!("Declared format {} but content looks like {:?}", format, detected);
        }

        let decoded = image::load_from_memory_with_format(data, detected)
            .map_err(|e| RasterError::Decode(e.to_string()))?
            .into_rgb8();

        let width = decoded.width() as usize;
        let height = decoded.height() as usize;
        debug!("Decoded raster: {}x{}", width, height);

        let mut planes: Vec<Vec<u8>> = (0..DECODED_BANDS)
            .map(|_| Vec::with_capacity(width * height))
            .collect();
        for pixel in decoded.as_raw().chunks_exact(DECODED_BANDS) {
            for (plane, &sample) in planes.iter_mut().zip(pixel) {
                plane.push(sample);
            }
        }

        RasterImage::from_planes(width, height, planes)
            .map_err(|e| RasterError::Decode(e.to_string()))
    }
}
