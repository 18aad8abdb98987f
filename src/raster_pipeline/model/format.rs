use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::raster_pipeline::common::error::RasterError;

/// Container formats accepted by the codec.
///
/// GeoTIFF is a label only: it decodes as a plain TIFF bitmap and is written
/// with the PNG encoder, since no GeoTIFF writer exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RasterFormat {
    GeoTiff,
    Png,
    Jpeg,
    Bmp,
}

impl RasterFormat {
    pub const ALL: [RasterFormat; 4] = [
        RasterFormat::GeoTiff,
        RasterFormat::Png,
        RasterFormat::Jpeg,
        RasterFormat::Bmp,
    ];

    /// Detects the format from a file extension.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?;
        ext.parse().ok()
    }

    /// Encoder actually used when writing this format.
    pub fn encoder_format(self) -> image::ImageFormat {
        match self {
            RasterFormat::Png | RasterFormat::GeoTiff => image::ImageFormat::Png,
            RasterFormat::Jpeg => image::ImageFormat::Jpeg,
            RasterFormat::Bmp => image::ImageFormat::Bmp,
        }
    }

    /// Whether decoded content of `format` is what this label promises.
    pub fn matches_content(self, format: image::ImageFormat) -> bool {
        matches!(
            (self, format),
            (RasterFormat::GeoTiff, image::ImageFormat::Tiff)
                | (RasterFormat::Png, image::ImageFormat::Png)
                | (RasterFormat::Jpeg, image::ImageFormat::Jpeg)
                | (RasterFormat::Bmp, image::ImageFormat::Bmp)
        )
    }
}

impl fmt::Display for RasterFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RasterFormat::GeoTiff => "geotiff",
            RasterFormat::Png => "png",
            RasterFormat::Jpeg => "jpeg",
            RasterFormat::Bmp => "bmp",
        };
        f.write_str(name)
    }
}

impl FromStr for RasterFormat {
    type Err = RasterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "geotiff" | "tif" | "tiff" => Ok(RasterFormat::GeoTiff),
            "png" => Ok(RasterFormat::Png),
            "jpeg" | "jpg" => Ok(RasterFormat::Jpeg),
            "bmp" => Ok(RasterFormat::Bmp),
            other => Err(RasterError::Validation(format!(
                "unsupported raster format: {other}"
            ))),
        }
    }
}
