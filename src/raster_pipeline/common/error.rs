use thiserror::Error;

#[derive(Error, Debug)]
pub enum RasterError {
    #[error("Failed to decode raster: {0}")]
    Decode(String),

    #[error("Failed to encode raster: {0}")]
    Encode(String),

    #[error("Invalid raster parameters: {0}")]
    Validation(String),

    #[error("operation cancelled")]
    Cancelled,

    #[error("Unexpected raster processing failure: {0}")]
    Unhandled(String),
}

pub type Result<T> = std::result::Result<T, RasterError>;
