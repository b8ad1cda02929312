//! Error types for surface generation.

use thiserror::Error;

/// Result type for isosurface extraction.
pub type ExtractionResult<T> = Result<T, ExtractionError>;

/// Result type for surface building.
pub type SurfaceResultOf<T> = Result<T, SurfaceError>;

/// Errors raised by an [`IsosurfaceExtractor`](crate::IsosurfaceExtractor).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtractionError {
    /// The sample buffer does not match the stated dimensions.
    #[error("field has {actual} samples but dimensions {dims:?} need {expected}")]
    DimensionMismatch {
        /// Stated dimensions.
        dims: [usize; 3],
        /// Samples implied by the dimensions.
        expected: usize,
        /// Samples supplied.
        actual: usize,
    },

    /// Fewer than two samples along some axis; no cube fits.
    #[error("grid {0:?} is too small to contain a cube")]
    GridTooSmall([usize; 3]),

    /// The sample spacing is non-positive or not finite.
    #[error("sample spacing must be positive, got {0}")]
    InvalidSpacing(f64),

    /// The extractor produced more triangles than its budget allows.
    #[error("triangle budget of {limit} exceeded")]
    TriangleBudgetExceeded {
        /// The configured budget.
        limit: usize,
    },
}

/// Errors raised while building a surface.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SurfaceError {
    /// The grid spacing is non-positive or not finite.
    #[error("grid spacing must be positive, got {0}")]
    InvalidSpacing(f64),

    /// The grid half extent is zero or would exceed the sample limit.
    #[error("grid half extent {half_extent} is invalid (must be 1..={max})")]
    InvalidGridSize {
        /// Requested half extent.
        half_extent: usize,
        /// Largest supported half extent.
        max: usize,
    },

    /// The blend radius lies outside the supported range.
    #[error("blend radius must be in [{min}, {max}], got {value}")]
    InvalidBlendRadius {
        /// Requested value.
        value: f64,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// The isovalue is not finite.
    #[error("isovalue must be finite, got {0}")]
    InvalidIsovalue(f64),

    /// Isosurface extraction failed.
    #[error("isosurface extraction failed: {0}")]
    Extraction(#[from] ExtractionError),
}
