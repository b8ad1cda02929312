//! Error types for connectivity repair.

use thiserror::Error;

/// Errors that can occur while building a connectivity graph.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GraphError {
    /// The lattice spacing is non-positive or not finite.
    #[error("spacing must be positive, got {0}")]
    InvalidSpacing(f64),

    /// A distance multiplier is non-positive or not finite.
    #[error("{name} must be positive, got {value}")]
    InvalidMultiplier {
        /// Parameter name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A count parameter is zero where at least one is required.
    #[error("{name} must be at least 1")]
    InvalidCount {
        /// Parameter name.
        name: &'static str,
    },

    /// A node position has a NaN or infinite coordinate.
    #[error("node {index} has a non-finite position")]
    NonFinitePosition {
        /// Index of the offending node.
        index: usize,
    },
}

/// Result type for connectivity operations.
pub type GraphResult<T> = Result<T, GraphError>;
