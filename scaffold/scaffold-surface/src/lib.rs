//! Organic surface generation for strut networks.
//!
//! Turns a list of struts into a closed, blended solid:
//!
//! 1. Every strut is a capsule signed distance field. The capsules are
//!    combined with a polynomial [`smooth_min`] so junctions fillet instead
//!    of creasing.
//! 2. The negated distance is sampled on a cubic [`DensityField`]
//!    (positive inside material), in parallel over z-slices.
//! 3. A separable `[1, 4, 6, 4, 1] / 16` blur smooths the field.
//! 4. An [`IsosurfaceExtractor`] turns the zero level set into a mesh.
//!    [`MarchingCubes`] is the built-in CPU implementation.
//!
//! # Quick Start
//!
//! ```
//! use scaffold_surface::{build_surface, MarchingCubes, SurfaceParams};
//! use scaffold_types::Strut;
//! use nalgebra::Point3;
//!
//! let hub = Point3::new(0.0, 0.0, 0.0);
//! let struts = vec![
//!     Strut::new(hub, Point3::new(1.5, 0.0, 0.0), 0.4),
//!     Strut::new(hub, Point3::new(0.0, 1.5, 0.0), 0.4),
//! ];
//! let params = SurfaceParams::preview()
//!     .with_spacing(0.2)
//!     .with_half_extent(10)
//!     .with_center(hub);
//!
//! let result = build_surface(&struts, &params, &MarchingCubes::new())?;
//! assert!(!result.mesh.is_empty());
//! # Ok::<(), scaffold_surface::SurfaceError>(())
//! ```
//!
//! # Grid layout
//!
//! Samples are flattened with x varying fastest:
//! `index = x + nx * (y + ny * z)`. The same order is used for sampling,
//! blurring and extraction.
//!
//! # Architecture
//!
//! This is a Layer 0 crate with no Bevy dependencies. Extraction is a
//! trait so a GPU implementation can replace [`MarchingCubes`].

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod blur;
mod builder;
mod error;
mod extract;
mod field;
mod marching_cubes;
mod params;
mod sdf;
mod tables;

pub use blur::{BLUR_KERNEL, gaussian_blur};
pub use builder::{SurfaceResult, SurfaceStats, VolumetricSurfaceBuilder, build_surface};
pub use error::{ExtractionError, ExtractionResult, SurfaceError, SurfaceResultOf};
pub use extract::{IsosurfaceExtractor, validate_grid};
pub use field::{DensityField, GridSpec};
pub use marching_cubes::MarchingCubes;
pub use params::{MAX_BLEND_RADIUS, MAX_HALF_EXTENT, MIN_BLEND_RADIUS, SurfaceParams};
pub use sdf::{capsule_sdf, network_sdf, smooth_min, sphere_sdf, strut_sdf};
