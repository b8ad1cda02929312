//! Connectivity repair for scaffold lattices.
//!
//! Turns a cloud of lattice nodes into one traversable strut network. Four
//! passes run in order, each a public function over a [`StrutGraph`] so it
//! can be used on its own:
//!
//! 1. [`connect_proximity`] - link every pair closer than the link length
//! 2. [`fill_gaps`] - give isolated and sparse nodes extra edges
//! 3. [`bridge_islands`] - attach every other component to the largest
//! 4. [`close_loops`] - shortcut nearby nodes that are many hops apart
//!
//! [`ConnectivityGraphBuilder`] runs them all and realizes each edge as a
//! [`Strut`](scaffold_types::Strut).
//!
//! # Quick Start
//!
//! ```
//! use scaffold_graph::{ConnectivityGraphBuilder, ConnectivityParams};
//! use scaffold_lattice::{synthesize_lattice, SynthesisParams};
//! use scaffold_types::NoObstacles;
//!
//! let lattice = synthesize_lattice(&SynthesisParams::new().with_max_radius(2), &NoObstacles)?;
//! let result = ConnectivityGraphBuilder::new(ConnectivityParams::new())
//!     .with_obstacles(&NoObstacles)
//!     .build(&lattice.positions())?;
//!
//! assert!(result.graph.is_connected());
//! assert!(!result.struts.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Architecture
//!
//! This is a Layer 0 crate with no Bevy dependencies. Radius queries go
//! through a uniform hash grid; candidate gathering for the proximity pass
//! runs on rayon.

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod builder;
mod error;
mod gap_fill;
mod gate;
mod graph;
mod islands;
mod loops;
mod params;
mod proximity;
mod report;
mod spatial;

pub use builder::ConnectivityGraphBuilder;
pub use error::{GraphError, GraphResult};
pub use gap_fill::fill_gaps;
pub use graph::StrutGraph;
pub use islands::{BridgeOutcome, UnresolvedIsland, bridge_islands};
pub use loops::close_loops;
pub use params::ConnectivityParams;
pub use proximity::connect_proximity;
pub use report::{ConnectivityReport, ConnectivityResult};
