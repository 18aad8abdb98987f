//! Raster image types

use std::collections::HashMap;

use crate::raster_pipeline::common::error::{RasterError, Result};

/// Six affine coefficients mapping pixel/line to world coordinates, in GDAL
/// order: `[origin_x, pixel_width, row_rotation, origin_y, col_rotation, pixel_height]`.
pub type GeoTransform = [f64; 6];

/// Sentinel used for "no data" pixels when the source does not define one.
pub const DEFAULT_NO_DATA: f64 = -9999.0;

/// Decoded raster with one byte plane per band.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Number of band planes
    pub band_count: usize,
    /// One row-major plane per band, `index = y * width + x`
    pub planes: Vec<Vec<u8>>,
    pub geo_transform: GeoTransform,
    /// Opaque spatial reference string
    pub projection: String,
    pub no_data_value: f64,
    pub metadata: HashMap<String, String>,
}

impl RasterImage {
    /// Builds an image from its planes, with default georeferencing.
    pub fn from_planes(width: usize, height: usize, planes: Vec<Vec<u8>>) -> Result<Self> {
        let image = Self {
            width,
            height,
            band_count: planes.len(),
            planes,
            geo_transform: [0.0; 6],
            projection: String::new(),
            no_data_value: DEFAULT_NO_DATA,
            metadata: HashMap::new(),
        };
        image.validate()?;
        Ok(image)
    }

    /// Checks the plane layout: `band_count` planes of `width * height` bytes each.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RasterError::Validation(format!(
                "raster dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.band_count == 0 || self.planes.len() != self.band_count {
            return Err(RasterError::Validation(format!(
                "expected {} band planes, found {}",
                self.band_count,
                self.planes.len()
            )));
        }
        let expected = self.pixel_count().ok_or_else(|| {
            RasterError::Validation(format!(
                "raster dimensions {}x{} overflow the addressable size",
                self.width, self.height
            ))
        })?;
        if let Some((band, plane)) = self
            .planes
            .iter()
            .enumerate()
            .find(|(_, plane)| plane.len() != expected)
        {
            return Err(RasterError::Validation(format!(
                "band {} holds {} samples, expected {} ({}x{})",
                band,
                plane.len(),
                expected,
                self.width,
                self.height
            )));
        }
        Ok(())
    }

    /// `width * height`, or `None` when the product overflows.
    pub fn pixel_count(&self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }

    /// Copies projection, no-data value and metadata from `source`, and scales
    /// its geo-transform to this image's pixel grid.
    pub fn with_georeference_of(mut self, source: &RasterImage) -> Self {
        let sx = source.width as f64 / self.width as f64;
        let sy = source.height as f64 / self.height as f64;
        self.geo_transform = scale_geo_transform(&source.geo_transform, sx, sy);
        self.projection = source.projection.clone();
        self.no_data_value = source.no_data_value;
        self.metadata = source.metadata.clone();
        self
    }
}

/// Scales the per-pixel terms of a geo-transform; the origin is unchanged.
pub fn scale_geo_transform(gt: &GeoTransform, sx: f64, sy: f64) -> GeoTransform {
    [gt[0], gt[1] * sx, gt[2] * sy, gt[3], gt[4] * sx, gt[5] * sy]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_planes_defaults() {
        let image = RasterImage::from_planes(2, 2, vec![vec![1, 2, 3, 4]]).unwrap();
        assert_eq!(image.band_count, 1);
        assert_eq!(image.geo_transform, [0.0; 6]);
        assert_eq!(image.no_data_value, DEFAULT_NO_DATA);
        assert!(image.projection.is_empty());
        assert!(image.metadata.is_empty());
    }

    #[test]
    fn test_plane_length_mismatch_rejected() {
        let result = RasterImage::from_planes(3, 2, vec![vec![0; 6], vec![0; 5]]);
        assert!(matches!(result, Err(RasterError::Validation(_))));
    }

    #[test]
    fn test_band_count_mismatch_rejected() {
        let mut image = RasterImage::from_planes(1, 1, vec![vec![0]]).unwrap();
        image.band_count = 3;
        assert!(matches!(image.validate(), Err(RasterError::Validation(_))));
    }

    #[test]
    fn test_overflowing_dimensions_rejected() {
        let mut image = RasterImage::from_planes(1, 1, vec![vec![0]]).unwrap();
        image.width = usize::MAX;
        image.height = 2;
        assert_eq!(image.pixel_count(), None);
        assert!(matches!(image.validate(), Err(RasterError::Validation(_))));
    }

    #[test]
    fn test_no_planes_rejected() {
        assert!(RasterImage::from_planes(4, 4, Vec::new()).is_err());
    }

    #[test]
    fn test_georeference_scaled_to_new_grid() {
        let mut source = RasterImage::from_planes(4, 2, vec![vec![0; 8]]).unwrap();
        source.geo_transform = [100.0, 10.0, 0.0, 50.0, 0.0, -10.0];
        source.projection = "EPSG:4326".to_string();
        source.metadata.insert("sensor".to_string(), "demo".to_string());

        let target = RasterImage::from_planes(2, 1, vec![vec![0; 2]])
            .unwrap()
            .with_georeference_of(&source);

        assert_eq!(target.geo_transform, [100.0, 20.0, 0.0, 50.0, 0.0, -20.0]);
        assert_eq!(target.projection, "EPSG:4326");
        assert_eq!(target.metadata.get("sensor").map(String::as_str), Some("demo"));
    }
}
