//! Full connectivity pipeline.

use nalgebra::Point3;
use scaffold_types::{NoObstacles, Node, ObstacleQuery};
use tracing::{info, warn};

use crate::error::GraphResult;
use crate::{
    ConnectivityParams, ConnectivityReport, ConnectivityResult, GraphError, StrutGraph,
    bridge_islands, close_loops, connect_proximity, fill_gaps,
};

/// Runs the four connectivity passes over a set of node positions.
///
/// # Example
///
/// ```
/// use scaffold_graph::{ConnectivityGraphBuilder, ConnectivityParams};
/// use nalgebra::Point3;
///
/// let positions = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(2.0, 0.0, 0.0),
///     Point3::new(30.0, 0.0, 0.0),
/// ];
///
/// let result = ConnectivityGraphBuilder::new(ConnectivityParams::new()).build(&positions)?;
///
/// assert!(result.report.is_connected());
/// assert_eq!(result.report.fallback_bridges, 1);
/// # Ok::<(), scaffold_graph::GraphError>(())
/// ```
#[derive(Clone)]
pub struct ConnectivityGraphBuilder<'a> {
    params: ConnectivityParams,
    obstacles: &'a dyn ObstacleQuery,
}

impl std::fmt::Debug for ConnectivityGraphBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectivityGraphBuilder")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl<'a> ConnectivityGraphBuilder<'a> {
    /// Creates a builder with no obstacles.
    #[must_use]
    pub fn new(params: ConnectivityParams) -> Self {
        Self {
            params,
            obstacles: &NoObstacles,
        }
    }

    /// Attaches an obstacle query. New edges whose strut would intersect
    /// an obstacle are skipped when `respect_obstacles` is set.
    #[must_use]
    pub fn with_obstacles(mut self, obstacles: &'a dyn ObstacleQuery) -> Self {
        self.obstacles = obstacles;
        self
    }

    /// Builds the graph over the positions of `nodes`.
    ///
    /// # Errors
    ///
    /// See [`build`](Self::build).
    pub fn build_from_nodes(&self, nodes: &[Node]) -> GraphResult<ConnectivityResult> {
        let positions: Vec<Point3<f64>> = nodes.iter().map(|n| n.position).collect();
        self.build(&positions)
    }

    /// The parameters in use.
    #[must_use]
    pub const fn params(&self) -> &ConnectivityParams {
        &self.params
    }

    /// Links, repairs and realizes the graph.
    ///
    /// Runs proximity linking, gap filling, island bridging and (when
    /// enabled) loop closing, then emits one strut per edge.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError`] if the parameters do not validate or a
    /// position is not finite.
    pub fn build(&self, positions: &[Point3<f64>]) -> GraphResult<ConnectivityResult> {
        let params = &self.params;
        params.validate()?;
        if let Some(index) = positions
            .iter()
            .position(|p| !p.coords.iter().all(|c| c.is_finite()))
        {
            return Err(GraphError::NonFinitePosition { index });
        }

        info!(
            nodes = positions.len(),
            max_dist = params.max_dist(),
            strut_radius = params.strut_radius(),
            "Building connectivity graph"
        );

        let mut graph = StrutGraph::new(positions.to_vec());
        let obstacles = self.obstacles;

        let proximity_edges = connect_proximity(&mut graph, params, obstacles);
        let gap_fill_edges = fill_gaps(&mut graph, params, obstacles);
        let bridges = bridge_islands(&mut graph, params, obstacles);
        let loop_edges = close_loops(&mut graph, params, obstacles);

        let report = ConnectivityReport {
            nodes: graph.node_count(),
            proximity_edges,
            gap_fill_edges,
            bridge_edges: bridges.total_bridges(),
            fallback_bridges: bridges.fallback_bridges,
            loop_edges,
            components_before: bridges.components_before,
            components_after: graph.component_count(),
            unresolved_islands: bridges.unresolved,
        };

        let struts = graph.to_struts(params.strut_radius());

        if struts.is_empty() {
            warn!(
                nodes = report.nodes,
                "Connectivity graph has no edges; nothing to build a surface from"
            );
        } else {
            info!(
                edges = struts.len(),
                components = report.components_after,
                unresolved = report.unresolved_islands.len(),
                "Connectivity graph built"
            );
        }

        Ok(ConnectivityResult {
            graph,
            struts,
            report,
        })
    }
}
