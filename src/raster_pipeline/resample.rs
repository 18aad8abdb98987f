//! Raster resampling module
//!
//! Re-grids every band plane independently with one of three interpolation
//! kernels.

mod kernels;
mod resampler;
pub mod types;

#[cfg(test)]
mod tests;

pub use kernels::{clamp_to_byte, cubic_weight};
pub use resampler::{height_for_aspect, resample};
pub use types::ResampleMethod;
