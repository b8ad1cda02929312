//! Error types for obstacle backends.

/// Errors raised when building an obstacle backend.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ObstacleError {
    /// The voxel size must be positive and finite.
    #[error("voxel size must be positive, got {0}")]
    InvalidVoxelSize(f64),

    /// Obstacle radii must be non-negative and finite.
    #[error("obstacle radius must be non-negative, got {0}")]
    InvalidRadius(f64),
}
