//! Pass 2: gap filling for under-connected nodes.

use scaffold_types::ObstacleQuery;
use tracing::debug;

use crate::gate::EdgeGate;
use crate::spatial::NeighborIndex;
use crate::{ConnectivityParams, StrutGraph};

/// Adds edges to under-connected nodes, visiting nodes in index order.
///
/// A node is under-connected when it is isolated, when its degree is below
/// `min_degree`, or when its closest neighbor is farther than
/// `max_dist × gap_multiplier`. Candidates are non-neighbors within
/// `max_dist × search_radius_multiplier`, tried nearest first (ties by
/// index). How many edges a node accepts:
///
/// - isolated: up to `max_new_edges`
/// - below `min_degree`: until its degree reaches `min_degree`
/// - only a distant closest neighbor: one
///
/// and never more than `max_new_edges`. Returns the number of edges added.
///
/// # Example
///
/// ```
/// use scaffold_graph::{fill_gaps, ConnectivityParams, StrutGraph};
/// use scaffold_types::NoObstacles;
/// use nalgebra::Point3;
///
/// let mut graph = StrutGraph::new(vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(2.0, 0.0, 0.0),
/// ]);
/// let params = ConnectivityParams::new(); // max_dist 1.5, search radius 3.0
///
/// assert_eq!(fill_gaps(&mut graph, &params, &NoObstacles), 1);
/// assert!(graph.has_edge(0, 1));
/// ```
pub fn fill_gaps(
    graph: &mut StrutGraph,
    params: &ConnectivityParams,
    obstacles: &dyn ObstacleQuery,
) -> usize {
    let max_dist = params.max_dist();
    let gap_threshold = max_dist * params.gap_multiplier;
    let search_radius = max_dist * params.search_radius_multiplier;

    let index = NeighborIndex::build(graph.positions(), search_radius);
    let gate = EdgeGate::new(params, obstacles);

    let mut added = 0;
    let mut touched = 0;
    for i in 0..graph.node_count() {
        let degree = graph.degree(i);
        let closest = graph
            .neighbors(i)
            .iter()
            .map(|&j| graph.distance(i, j))
            .fold(f64::INFINITY, f64::min);

        let isolated = degree == 0;
        let sparse = degree < params.min_degree;
        let distant = closest > gap_threshold;

        let quota = if isolated {
            params.max_new_edges
        } else if sparse {
            (params.min_degree - degree).min(params.max_new_edges)
        } else if distant {
            1
        } else {
            continue;
        };

        let mut candidates: Vec<(f64, usize)> = index
            .within(graph.positions(), graph.positions()[i], search_radius)
            .into_iter()
            .filter(|&j| j != i && !graph.has_edge(i, j))
            .map(|j| (graph.distance(i, j), j))
            .collect();
        candidates.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        let mut accepted = 0;
        for (_, j) in candidates {
            if accepted == quota {
                break;
            }
            if gate.allows(graph, i, j) && graph.add_edge(i, j) {
                accepted += 1;
            }
        }

        if accepted > 0 {
            touched += 1;
            added += accepted;
        }
    }

    debug!(added, nodes = touched, search_radius, "Gap fill pass");
    added
}
