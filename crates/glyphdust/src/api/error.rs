use thiserror::Error;

/// Everything that can go wrong in the engine. None of it is fatal:
/// the scheduler logs the error and keeps animating what it already has.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SwarmError {
    /// The rasterizer produced no pixel above the ink threshold.
    #[error("rasterizing {text:?} at {width}x{height} produced no ink pixels")]
    RasterizationEmpty { text: String, width: u32, height: u32 },

    /// Canvas size is zero, negative or not a number.
    #[error("invalid canvas dimensions {width}x{height}")]
    InvalidDimensions { width: f32, height: f32 },

    /// The host rasterizer (e.g. a 2D canvas) refused an operation.
    #[error("raster backend failure: {0}")]
    RasterBackend(String),
}
