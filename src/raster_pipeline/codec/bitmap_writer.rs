use std::io::{Cursor, Write};

use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat};
use tracing::debug;

use crate::raster_pipeline::codec::writer::RasterWriter;
use crate::raster_pipeline::common::error::{RasterError, Result};
use crate::raster_pipeline::model::{RasterFormat, RasterImage};

/// JPEG quality used when none is configured.
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Writes rasters as interleaved 8-bit RGB bitmaps.
#[derive(Debug, Clone, Copy)]
pub struct BitmapWriter {
    jpeg_quality: u8,
}

impl Default for BitmapWriter {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl BitmapWriter {
    pub fn with_jpeg_quality(quality: u8) -> Self {
        Self {
            jpeg_quality: quality.clamp(1, 100),
        }
    }

    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }
}

/// Interleaves band planes into RGB triples.
///
/// Band 0 feeds red. Green and blue take bands 1 and 2 when present and fall
/// back to band 0 otherwise, so one band renders as grey and two bands reuse
/// red for blue.
fn interleave_rgb(image: &RasterImage) -> Vec<u8> {
    let red = &image.planes[0];
    let green = if image.band_count > 1 { &image.planes[1] } else { red };
    let blue = if image.band_count > 2 { &image.planes[2] } else { red };

    let mut rgb = Vec::with_capacity(red.len() * 3);
    for ((&r, &g), &b) in red.iter().zip(green).zip(blue) {
        rgb.extend_from_slice(&[r, g, b]);
    }
    rgb
}

impl RasterWriter for BitmapWriter {
    fn write_raster(&self, image: &RasterImage, output: &mut dyn Write, format: RasterFormat) -> Result<()> {
        image
            .validate()
            .map_err(|e| RasterError::Encode(e.to_string()))?;

        let encoder_format = format.encoder_format();
        debug!(
            "Encoding raster: {}x{}, {} bands as {:?}",
            image.width, image.height, image.band_count, encoder_format
        );

        let width = u32::try_from(image.width)
            .map_err(|_| RasterError::Encode(format!("width {} too large", image.width)))?;
        let height = u32::try_from(image.height)
            .map_err(|_| RasterError::Encode(format!("height {} too large", image.height)))?;
        let rgb = interleave_rgb(image);

        let mut buffer = Cursor::new(Vec::new());
        let encoded = match encoder_format {
            ImageFormat::Jpeg => JpegEncoder::new_with_quality(&mut buffer, self.jpeg_quality)
                .write_image(&rgb, width, height, ExtendedColorType::Rgb8),
            ImageFormat::Bmp => BmpEncoder::new(&mut buffer)
                .write_image(&rgb, width, height, ExtendedColorType::Rgb8),
            _ => PngEncoder::new(&mut buffer)
                .write_image(&rgb, width, height, ExtendedColorType::Rgb8),
        };
        encoded.map_err(|e| RasterError::Encode(e.to_string()))?;

        output
            .write_all(buffer.get_ref())
            .map_err(|e| RasterError::Encode(e.to_string()))?;

        debug!("Raster encoding complete");
        Ok(())
    }
}
