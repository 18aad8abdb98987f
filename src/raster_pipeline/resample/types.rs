//! Resampling method types

use std::fmt;
use std::str::FromStr;

use crate::raster_pipeline::common::error::RasterError;

/// Interpolation kernels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResampleMethod {
    /// Copy the source pixel under the sampling point
    NearestNeighbor,
    /// Weighted blend of the 2x2 neighbourhood (default)
    #[default]
    Bilinear,
    /// Normalised cubic convolution over the 4x4 neighbourhood
    Cubic,
}

impl ResampleMethod {
    pub const ALL: [ResampleMethod; 3] = [
        ResampleMethod::NearestNeighbor,
        ResampleMethod::Bilinear,
        ResampleMethod::Cubic,
    ];
}

impl fmt::Display for ResampleMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResampleMethod::NearestNeighbor => "nearest",
            ResampleMethod::Bilinear => "bilinear",
            ResampleMethod::Cubic => "cubic",
        };
        f.write_str(name)
    }
}

impl FromStr for ResampleMethod {
    type Err = RasterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" | "nearestneighbor" | "nearest-neighbor" => Ok(ResampleMethod::NearestNeighbor),
            "bilinear" => Ok(ResampleMethod::Bilinear),
            "cubic" => Ok(ResampleMethod::Cubic),
            other => Err(RasterError::Validation(format!(
                "unknown resample method: {other}"
            ))),
        }
    }
}
