//! Pipeline errors.

use scaffold_graph::GraphError;
use scaffold_lattice::LatticeError;
use scaffold_surface::{ExtractionError, SurfaceError};
use thiserror::Error;

/// Result type for pipeline operations.
pub type ScaffoldResult<T> = Result<T, ScaffoldError>;

/// Errors that abort a regeneration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScaffoldError {
    /// Lattice synthesis rejected its parameters.
    #[error("lattice synthesis failed: {0}")]
    Lattice(#[from] LatticeError),

    /// Connectivity repair rejected its parameters or input.
    #[error("connectivity repair failed: {0}")]
    Graph(#[from] GraphError),

    /// Surface generation failed.
    #[error("surface generation failed: {0}")]
    Surface(#[from] SurfaceError),

    /// Isosurface extraction failed outside of a surface build.
    #[error("isosurface extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    /// Another regeneration is running on the same regenerator.
    #[error("a regeneration is already in progress")]
    RegenerationInProgress,
}

impl ScaffoldError {
    /// True for errors caused by invalid parameters, which retrying with
    /// the same configuration cannot fix.
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        match self {
            Self::Lattice(_) | Self::Graph(_) => true,
            Self::Surface(e) => !matches!(e, SurfaceError::Extraction(_)),
            Self::Extraction(_) | Self::RegenerationInProgress => false,
        }
    }
}
