//! Connectivity results.

use scaffold_types::Strut;

use crate::{StrutGraph, UnresolvedIsland};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-pass statistics of a connectivity build.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConnectivityReport {
    /// Number of nodes.
    pub nodes: usize,
    /// Edges added by proximity linking.
    pub proximity_edges: usize,
    /// Edges added by gap filling.
    pub gap_fill_edges: usize,
    /// Edges added by island bridging, including fallback bridges.
    pub bridge_edges: usize,
    /// Of `bridge_edges`, how many came from the unrestricted fallback.
    pub fallback_bridges: usize,
    /// Edges added by loop closing.
    pub loop_edges: usize,
    /// Components before island bridging.
    pub components_before: usize,
    /// Components after all passes.
    pub components_after: usize,
    /// Islands left detached.
    pub unresolved_islands: Vec<UnresolvedIsland>,
}

impl ConnectivityReport {
    /// Total edges in the final graph.
    #[must_use]
    pub const fn total_edges(&self) -> usize {
        self.proximity_edges + self.gap_fill_edges + self.bridge_edges + self.loop_edges
    }

    /// True when the final graph is a single component (or empty).
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.components_after <= 1
    }
}

/// Output of [`ConnectivityGraphBuilder::build`](crate::ConnectivityGraphBuilder::build).
#[derive(Debug, Clone)]
pub struct ConnectivityResult {
    /// The repaired graph.
    pub graph: StrutGraph,
    /// One strut per edge, in sorted `(i, j)` order.
    pub struts: Vec<Strut>,
    /// Pass statistics.
    pub report: ConnectivityReport,
}

impl ConnectivityResult {
    /// Number of struts.
    #[must_use]
    pub fn strut_count(&self) -> usize {
        self.struts.len()
    }
}
