//! Connectivity repair parameters.

use crate::GraphError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for every connectivity pass.
///
/// Distances are expressed as multiples of the lattice `spacing`. The base
/// link length is `max_dist = spacing × connection_multiplier`; the other
/// search radii scale `max_dist`.
///
/// # Examples
///
/// ```
/// use scaffold_graph::ConnectivityParams;
///
/// let params = ConnectivityParams::new()
///     .with_spacing(2.0)
///     .with_connection_multiplier(1.6)
///     .with_bridge_count(3);
///
/// assert!((params.max_dist() - 3.2).abs() < 1e-12);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConnectivityParams {
    /// Lattice spacing.
    pub spacing: f64,

    /// Proximity link length as a multiple of `spacing`.
    pub connection_multiplier: f64,

    /// Strut radius as a multiple of `spacing`.
    pub radius_multiplier: f64,

    /// A node whose closest neighbor is farther than
    /// `max_dist × gap_multiplier` is considered under-connected.
    pub gap_multiplier: f64,

    /// Nodes below this degree are under-connected.
    pub min_degree: usize,

    /// Most edges the gap fill adds to one node.
    pub max_new_edges: usize,

    /// Gap fill search radius as a multiple of `max_dist`.
    pub search_radius_multiplier: f64,

    /// Island bridge search radius as a multiple of `max_dist`.
    pub island_search_radius_multiplier: f64,

    /// Bridges added per island when candidates exist within the search
    /// radius.
    pub bridge_count: usize,

    /// Attach an island with no candidate in range through the globally
    /// closest island/main pair, regardless of distance.
    pub unrestricted_fallback: bool,

    /// Run the loop closing pass.
    pub close_loops: bool,

    /// Loop closing search radius as a multiple of `max_dist`.
    pub loop_search_radius_multiplier: f64,

    /// Hop bound of the loop closing graph search.
    pub max_hops: usize,

    /// Two nearby nodes at least this many hops apart get a direct edge.
    pub loop_hop_threshold: usize,

    /// Never add an edge whose strut would intersect an obstacle.
    pub respect_obstacles: bool,
}

impl Default for ConnectivityParams {
    fn default() -> Self {
        Self {
            spacing: 1.0,
            connection_multiplier: 1.5,
            radius_multiplier: 0.15,
            gap_multiplier: 1.5,
            min_degree: 2,
            max_new_edges: 3,
            search_radius_multiplier: 2.0,
            island_search_radius_multiplier: 4.0,
            bridge_count: 2,
            unrestricted_fallback: true,
            close_loops: true,
            loop_search_radius_multiplier: 1.5,
            max_hops: 6,
            loop_hop_threshold: 4,
            respect_obstacles: true,
        }
    }
}

impl ConnectivityParams {
    /// Creates parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Proximity link length, `spacing × connection_multiplier`.
    #[must_use]
    pub fn max_dist(&self) -> f64 {
        self.spacing * self.connection_multiplier
    }

    /// Strut radius, `spacing × radius_multiplier`.
    #[must_use]
    pub fn strut_radius(&self) -> f64 {
        self.spacing * self.radius_multiplier
    }

    /// Sets the lattice spacing.
    #[must_use]
    pub const fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    /// Sets the proximity link multiplier.
    #[must_use]
    pub const fn with_connection_multiplier(mut self, multiplier: f64) -> Self {
        self.connection_multiplier = multiplier;
        self
    }

    /// Sets the strut radius multiplier.
    #[must_use]
    pub const fn with_radius_multiplier(mut self, multiplier: f64) -> Self {
        self.radius_multiplier = multiplier;
        self
    }

    /// Sets the gap fill thresholds.
    #[must_use]
    pub const fn with_gap_fill(
        mut self,
        gap_multiplier: f64,
        min_degree: usize,
        max_new_edges: usize,
    ) -> Self {
        self.gap_multiplier = gap_multiplier;
        self.min_degree = min_degree;
        self.max_new_edges = max_new_edges;
        self
    }

    /// Sets the gap fill search radius multiplier.
    #[must_use]
    pub const fn with_search_radius_multiplier(mut self, multiplier: f64) -> Self {
        self.search_radius_multiplier = multiplier;
        self
    }

    /// Sets the island bridge search radius multiplier.
    #[must_use]
    pub const fn with_island_search_radius_multiplier(mut self, multiplier: f64) -> Self {
        self.island_search_radius_multiplier = multiplier;
        self
    }

    /// Sets the number of bridges per island.
    #[must_use]
    pub const fn with_bridge_count(mut self, count: usize) -> Self {
        self.bridge_count = count;
        self
    }

    /// Enables or disables the unrestricted island fallback.
    #[must_use]
    pub const fn with_unrestricted_fallback(mut self, enable: bool) -> Self {
        self.unrestricted_fallback = enable;
        self
    }

    /// Configures loop closing. `enable = false` skips the pass.
    #[must_use]
    pub const fn with_loop_closing(
        mut self,
        enable: bool,
        max_hops: usize,
        loop_hop_threshold: usize,
    ) -> Self {
        self.close_loops = enable;
        self.max_hops = max_hops;
        self.loop_hop_threshold = loop_hop_threshold;
        self
    }

    /// Sets the loop closing search radius multiplier.
    #[must_use]
    pub const fn with_loop_search_radius_multiplier(mut self, multiplier: f64) -> Self {
        self.loop_search_radius_multiplier = multiplier;
        self
    }

    /// Enables or disables obstacle checks on new edges.
    #[must_use]
    pub const fn with_respect_obstacles(mut self, enable: bool) -> Self {
        self.respect_obstacles = enable;
        self
    }

    /// Validates the parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the spacing or any multiplier is not positive and
    /// finite, or if `bridge_count`, `max_new_edges` or (with loop closing
    /// enabled) `max_hops` is zero.
    pub fn validate(&self) -> Result<(), GraphError> {
        if !self.spacing.is_finite() || self.spacing <= 0.0 {
            return Err(GraphError::InvalidSpacing(self.spacing));
        }

        let multipliers = [
            ("connection_multiplier", self.connection_multiplier),
            ("radius_multiplier", self.radius_multiplier),
            ("gap_multiplier", self.gap_multiplier),
            ("search_radius_multiplier", self.search_radius_multiplier),
            (
                "island_search_radius_multiplier",
                self.island_search_radius_multiplier,
            ),
            (
                "loop_search_radius_multiplier",
                self.loop_search_radius_multiplier,
            ),
        ];
        for (name, value) in multipliers {
            if !value.is_finite() || value <= 0.0 {
                return Err(GraphError::InvalidMultiplier { name, value });
            }
        }

        if self.bridge_count == 0 {
            return Err(GraphError::InvalidCount {
                name: "bridge_count",
            });
        }
        if self.max_new_edges == 0 {
            return Err(GraphError::InvalidCount {
                name: "max_new_edges",
            });
        }
        if self.close_loops && self.max_hops == 0 {
            return Err(GraphError::InvalidCount { name: "max_hops" });
        }

        Ok(())
    }
}
