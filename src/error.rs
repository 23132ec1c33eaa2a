use thiserror::Error;

/// Top-level error type for the Geoloft spline kernel.
#[derive(Debug, Error)]
pub enum GeoloftError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Curve(#[from] CurveError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to spline construction and sampling.
#[derive(Debug, Error)]
pub enum CurveError {
    #[error("invalid sample distance: {0}")]
    InvalidSampleDistance(f64),

    #[error("spline has no sampled points")]
    Empty,

    #[error("spline has zero length")]
    ZeroLength,

    #[error("node index {index} is out of range for {len} nodes")]
    NodeIndexOutOfRange { index: usize, len: usize },
}

/// Errors related to mesh generation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("invalid tessellation parameters: {0}")]
    InvalidParameters(String),

    #[error("tessellation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`GeoloftError`].
pub type Result<T> = std::result::Result<T, GeoloftError>;
