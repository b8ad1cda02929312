//! Pass 4: loop closing.

use scaffold_types::ObstacleQuery;
use tracing::debug;

use crate::gate::EdgeGate;
use crate::spatial::NeighborIndex;
use crate::{ConnectivityParams, StrutGraph};

/// Adds shortcut edges between nearby nodes that are far apart in the graph.
///
/// For each non-adjacent pair `(i, j)`, `i < j`, within
/// `max_dist × loop_search_radius_multiplier`, a breadth-first search from
/// `i` bounded by `max_hops` measures their hop distance. The edge is added
/// when `j` is not reached within the bound or the hop count is at least
/// `loop_hop_threshold`. Pairs are visited in `(i, j)` order and each
/// search sees the edges added before it.
///
/// Does nothing when `close_loops` is off. Returns the number of edges
/// added.
///
/// # Example
///
/// ```
/// use nalgebra::Point3;
/// use scaffold_graph::{close_loops, ConnectivityParams, StrutGraph};
/// use scaffold_types::NoObstacles;
///
/// // A "U": the two tips are close in space but five hops apart.
/// let mut graph = StrutGraph::new(vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
///     Point3::new(0.0, 2.0, 0.0),
///     Point3::new(1.0, 2.0, 0.0),
///     Point3::new(2.0, 2.0, 0.0),
///     Point3::new(2.0, 1.0, 0.0),
///     Point3::new(2.0, 0.0, 0.0),
/// ]);
/// for i in 0..6 {
///     graph.add_edge(i, i + 1);
/// }
///
/// let params = ConnectivityParams::new()
///     .with_connection_multiplier(1.0)
///     .with_loop_search_radius_multiplier(2.0)
///     .with_loop_closing(true, 6, 4);
///
/// assert!(close_loops(&mut graph, &params, &NoObstacles) >= 1);
/// assert!(graph.has_edge(0, 6));
/// ```
pub fn close_loops(
    graph: &mut StrutGraph,
    params: &ConnectivityParams,
    obstacles: &dyn ObstacleQuery,
) -> usize {
    if !params.close_loops {
        return 0;
    }

    let search_radius = params.max_dist() * params.loop_search_radius_multiplier;
    let index = NeighborIndex::build(graph.positions(), search_radius);
    let gate = EdgeGate::new(params, obstacles);

    let mut added = 0;
    let mut examined = 0;
    for i in 0..graph.node_count() {
        let nearby = index.within(graph.positions(), graph.positions()[i], search_radius);
        for j in nearby {
            if j <= i || graph.has_edge(i, j) {
                continue;
            }
            examined += 1;
            let far_apart = graph
                .hop_distance(i, j, params.max_hops)
                .is_none_or(|hops| hops >= params.loop_hop_threshold);
            if far_apart && gate.allows(graph, i, j) && graph.add_edge(i, j) {
                added += 1;
            }
        }
    }

    debug!(added, examined, search_radius, "Loop closing pass");
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;
    use scaffold_types::NoObstacles;

    fn square_ring() -> StrutGraph {
        // 4 nodes on a unit square, linked as a path 0-1-2-3.
        let mut graph = StrutGraph::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]);
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);
        graph.add_edge(2, 3);
        graph
    }

    #[test]
    fn disabled_pass_is_a_no_op() {
        let mut graph = square_ring();
        let params = ConnectivityParams::new().with_loop_closing(false, 6, 2);
        assert_eq!(close_loops(&mut graph, &params, &NoObstacles), 0);
    }

    #[test]
    fn short_cycles_are_left_alone() {
        // 0 and 3 are 3 hops apart; threshold 4 keeps them unlinked.
        let mut graph = square_ring();
        let params = ConnectivityParams::new()
            .with_connection_multiplier(1.0)
            .with_loop_closing(true, 6, 4);
        assert_eq!(close_loops(&mut graph, &params, &NoObstacles), 0);
    }

    #[test]
    fn threshold_closes_the_ring() {
        let mut graph = square_ring();
        let params = ConnectivityParams::new()
            .with_connection_multiplier(1.0)
            .with_loop_closing(true, 6, 3);
        assert_eq!(close_loops(&mut graph, &params, &NoObstacles), 1);
        assert!(graph.has_edge(0, 3));
    }

    #[test]
    fn unreachable_within_bound_is_linked() {
        // Separate components count as unreachable.
        let mut graph = StrutGraph::new(vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)]);
        let params = ConnectivityParams::new().with_loop_closing(true, 2, 100);
        assert_eq!(close_loops(&mut graph, &params, &NoObstacles), 1);
    }
}
