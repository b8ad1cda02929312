//! Obstacle-aware lattice synthesis.
//!
//! Grows a regular grid of nodes outward from an origin by breadth-first
//! flood fill. The fill treats obstacles as impermeable: a blocked cell is
//! neither emitted nor expanded, so the lattice conforms to the free space
//! reachable from the origin.
//!
//! # Quick Start
//!
//! ```
//! use scaffold_lattice::{synthesize_lattice, SynthesisParams};
//! use scaffold_types::SphereObstacles;
//! use nalgebra::Point3;
//!
//! let obstacles = SphereObstacles::new().with_sphere(Point3::new(3.0, 0.0, 0.0), 1.5);
//! let params = SynthesisParams::new().with_spacing(1.0).with_max_radius(5);
//!
//! let lattice = synthesize_lattice(&params, &obstacles)?;
//! assert!(lattice.blocked > 0);
//! assert!(lattice.node_count() > 0);
//! # Ok::<(), scaffold_lattice::LatticeError>(())
//! ```
//!
//! # Porosity
//!
//! A [`Porosity`] filter withholds nodes at random free cells (seeded, so
//! runs are reproducible) without blocking the fill through them.
//!
//! # Architecture
//!
//! This is a Layer 0 crate with no Bevy dependencies. Obstacles are any
//! [`ObstacleQuery`](scaffold_types::ObstacleQuery) implementation.

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod params;
mod porosity;
mod synthesize;

pub use error::{LatticeError, SynthesisResult};
pub use params::{MAX_SEARCH_RADIUS, SynthesisParams};
pub use porosity::Porosity;
pub use synthesize::{LatticeResult, synthesize_lattice};
