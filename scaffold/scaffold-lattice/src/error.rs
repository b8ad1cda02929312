//! Error types for lattice synthesis.

use thiserror::Error;

/// Errors that can occur during lattice synthesis.
///
/// All variants describe invalid configuration; synthesis itself cannot fail
/// once the parameters validate.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LatticeError {
    /// The lattice spacing is non-positive or not finite.
    #[error("lattice spacing must be positive, got {0}")]
    InvalidSpacing(f64),

    /// The obstacle test radius is negative or not finite.
    #[error("test radius must be non-negative, got {0}")]
    InvalidTestRadius(f64),

    /// A porosity probability lies outside `[0, 1)`.
    #[error("porosity probability must be in [0, 1), got {0}")]
    InvalidPorosity(f64),

    /// The search cube would hold more cells than `u32` node ids can address.
    #[error("max radius {radius} exceeds the supported limit of {limit} cells")]
    RadiusTooLarge {
        /// Requested radius.
        radius: u32,
        /// Largest supported radius.
        limit: u32,
    },
}

/// Result type for lattice synthesis.
pub type SynthesisResult<T> = Result<T, LatticeError>;
