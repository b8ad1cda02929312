//! Core types for scaffold lattice synthesis.
//!
//! This crate provides the data model shared by every stage of the
//! scaffold pipeline:
//!
//! - [`VoxelCoord`] - Integer lattice cell coordinates
//! - [`Node`] - A lattice node with a stable id and world position
//! - [`Strut`] - A realized edge: a capsule between two points
//! - [`Aabb`] - Axis-aligned bounding box
//! - [`SurfaceMesh`] - Extracted isosurface (vertices + triangle indices)
//! - [`ObstacleQuery`] - Injected obstacle capability, with reference backends
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. Nothing here is
//! tied to a render loop or a physics engine; obstacle queries are a trait so
//! any spatial backend (BVH, occupancy grid, analytic SDF) can be plugged in.
//!
//! # Example
//!
//! ```
//! use scaffold_types::{ObstacleQuery, SphereObstacles, Strut, VoxelCoord};
//! use nalgebra::Point3;
//!
//! let cell = VoxelCoord::new(1, 2, 3);
//! assert_eq!(cell.chebyshev_distance(VoxelCoord::origin()), 3);
//!
//! let strut = Strut::new(Point3::origin(), Point3::new(10.0, 0.0, 0.0), 1.0);
//! assert!((strut.length() - 10.0).abs() < 1e-12);
//!
//! let obstacles = SphereObstacles::new().with_sphere(Point3::new(5.0, 0.0, 0.0), 1.0);
//! assert!(obstacles.is_blocked(Point3::new(5.5, 0.0, 0.0), 0.0));
//! assert!(obstacles.is_segment_blocked(strut.start, strut.end, 0.1));
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod bounds;
mod error;
mod mesh;
mod node;
mod obstacle;
mod strut;
mod traversal;
mod voxel;

pub use bounds::Aabb;
pub use error::ObstacleError;
pub use mesh::SurfaceMesh;
pub use node::Node;
pub use obstacle::{
    FnObstacles, MAX_SEGMENT_SAMPLES, NoObstacles, ObstacleQuery, SphereObstacles, VoxelObstacles,
};
pub use strut::{Strut, point_segment_distance_squared};
pub use traversal::SegmentTraversal;
pub use voxel::VoxelCoord;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
