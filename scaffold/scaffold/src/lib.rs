//! Obstacle-aware scaffold generation.
//!
//! This umbrella crate re-exports the scaffold-* crates and wires them into
//! one pipeline:
//!
//! 1. [`lattice`] grows a node lattice through the free space around
//!    obstacles.
//! 2. [`graph`] links the nodes and repairs the network until it is a
//!    single component.
//! 3. [`surface`] blends the struts into one solid and extracts its
//!    boundary mesh.
//!
//! [`Regenerator::regenerate`] runs all three from scratch, rejects
//! overlapping calls and keeps the last good result.
//!
//! # Quick Start
//!
//! ```
//! use scaffold::prelude::*;
//! use std::sync::Arc;
//!
//! let obstacles = SphereObstacles::new().with_sphere(Point3::new(0.0, 0.0, 3.0), 1.0);
//! let regenerator = Regenerator::new(ScaffoldConfig::preview())
//!     .with_obstacles(Arc::new(obstacles));
//!
//! let scaffold = regenerator.regenerate()?;
//! println!(
//!     "{} nodes, {} struts, {} triangles",
//!     scaffold.nodes.len(),
//!     scaffold.struts.len(),
//!     scaffold.mesh.triangle_count(),
//! );
//! for warning in &scaffold.report.warnings {
//!     println!("warning: {warning}");
//! }
//! # Ok::<(), scaffold::ScaffoldError>(())
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - Shared data model and the obstacle query service
//! - [`lattice`] - Flood-fill lattice synthesis
//! - [`graph`] - Connectivity repair
//! - [`surface`] - Density field, blur and isosurface extraction
//!
//! # Feature Flags
//!
//! - `serde` - Derive `Serialize`/`Deserialize` for parameter and data types

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod config;
mod error;
mod pipeline;
mod regenerate;

// =============================================================================
// Re-exports
// =============================================================================

/// Shared data model and obstacle services.
pub use scaffold_types as types;

/// Flood-fill lattice synthesis.
pub use scaffold_lattice as lattice;

/// Connectivity repair.
pub use scaffold_graph as graph;

/// Density field, blur and isosurface extraction.
pub use scaffold_surface as surface;

pub use config::ScaffoldConfig;
pub use error::{ScaffoldError, ScaffoldResult};
pub use pipeline::{PipelineWarning, RegenerationReport, Scaffold, Stage, generate_scaffold};
pub use regenerate::{Regenerator, SharedExtractor, SharedObstacles};

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for scaffold generation.
///
/// # Usage
///
/// ```
/// use scaffold::prelude::*;
/// ```
pub mod prelude {
    pub use nalgebra::{Point3, Vector3};

    pub use scaffold_types::{
        FnObstacles, NoObstacles, ObstacleQuery, SphereObstacles, Strut, SurfaceMesh,
        VoxelObstacles,
    };

    pub use scaffold_lattice::{Porosity, SynthesisParams, synthesize_lattice};

    pub use scaffold_graph::{ConnectivityGraphBuilder, ConnectivityParams, StrutGraph};

    pub use scaffold_surface::{
        IsosurfaceExtractor, MarchingCubes, SurfaceParams, build_surface,
    };

    pub use crate::{
        PipelineWarning, Regenerator, Scaffold, ScaffoldConfig, ScaffoldError, generate_scaffold,
    };
}
