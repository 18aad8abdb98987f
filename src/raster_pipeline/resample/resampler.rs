use tracing::debug;

use crate::raster_pipeline::common::error::{RasterError, Result};
use crate::raster_pipeline::model::RasterImage;
use crate::raster_pipeline::resample::kernels::{self, Kernel, Plane};
use crate::raster_pipeline::resample::types::ResampleMethod;

fn kernel_for(method: ResampleMethod) -> Kernel {
    match method {
        ResampleMethod::NearestNeighbor => kernels::nearest,
        ResampleMethod::Bilinear => kernels::bilinear,
        ResampleMethod::Cubic => kernels::cubic,
    }
}

/// Resamples every band of `image` to `new_width` x `new_height`.
///
/// The sampling point of destination pixel `(x, y)` is
/// `(x * src_w / new_w, y * src_h / new_h)`. The result keeps the band count
/// but carries default georeferencing and empty metadata.
pub fn resample(
    image: &RasterImage,
    new_width: usize,
    new_height: usize,
    method: ResampleMethod,
) -> Result<RasterImage> {
    if new_width == 0 || new_height == 0 {
        return Err(RasterError::Validation(format!(
            "target dimensions must be positive, got {}x{}",
            new_width, new_height
        )));
    }
    let pixel_count = new_width.checked_mul(new_height).ok_or_else(|| {
        RasterError::Validation(format!(
            "target dimensions {}x{} overflow the addressable size",
            new_width, new_height
        ))
    })?;
    image.validate()?;

    debug!(
        "Resampling {} bands {}x{} -> {}x{} ({})",
        image.band_count, image.width, image.height, new_width, new_height, method
    );

    let x_ratio = image.width as f64 / new_width as f64;
    let y_ratio = image.height as f64 / new_height as f64;
    let kernel = kernel_for(method);

    let planes = image
        .planes
        .iter()
        .map(|data| {
            let plane = Plane {
                data,
                width: image.width,
                height: image.height,
            };
            let mut out = Vec::with_capacity(pixel_count);
            for y in 0..new_height {
                let src_y = y as f64 * y_ratio;
                for x in 0..new_width {
                    out.push(kernel(&plane, x as f64 * x_ratio, src_y));
                }
            }
            out
        })
        .collect();

    RasterImage::from_planes(new_width, new_height, planes)
}

/// Height that keeps the source aspect ratio for a given width, rounded down.
pub fn height_for_aspect(new_width: usize, src_width: usize, src_height: usize) -> usize {
    if src_width == 0 {
        return 0;
    }
    (new_width as f64 * src_height as f64 / src_width as f64) as usize
}
