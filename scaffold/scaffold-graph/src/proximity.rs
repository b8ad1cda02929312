//! Pass 1: proximity linking.

use rayon::prelude::*;
use scaffold_types::ObstacleQuery;
use tracing::debug;

use crate::gate::EdgeGate;
use crate::spatial::NeighborIndex;
use crate::{ConnectivityParams, StrutGraph};

/// Links every pair of nodes whose distance is at most
/// [`max_dist`](ConnectivityParams::max_dist).
///
/// Equivalent to testing all `n²/2` pairs; candidates are gathered through
/// a hash grid in parallel and added in `(i, j)` order, so the result does
/// not depend on thread scheduling. Returns the number of edges added.
///
/// # Example
///
/// ```
/// use scaffold_graph::{connect_proximity, ConnectivityParams, StrutGraph};
/// use scaffold_types::NoObstacles;
/// use nalgebra::Point3;
///
/// let mut graph = StrutGraph::new(vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(3.0, 0.0, 0.0),
/// ]);
/// let params = ConnectivityParams::new().with_connection_multiplier(1.6);
///
/// assert_eq!(connect_proximity(&mut graph, &params, &NoObstacles), 1);
/// assert!(graph.has_edge(0, 1));
/// ```
pub fn connect_proximity(
    graph: &mut StrutGraph,
    params: &ConnectivityParams,
    obstacles: &dyn ObstacleQuery,
) -> usize {
    let max_dist = params.max_dist();
    let candidates: Vec<(usize, usize)> = {
        let positions = graph.positions();
        let index = NeighborIndex::build(positions, max_dist);
        (0..positions.len())
            .into_par_iter()
            .flat_map_iter(|i| {
                index
                    .within(positions, positions[i], max_dist)
                    .into_iter()
                    .filter(move |&j| j > i)
                    .map(move |j| (i, j))
            })
            .collect()
    };

    let gate = EdgeGate::new(params, obstacles);
    let mut added = 0;
    let mut rejected = 0;
    for (i, j) in candidates {
        if !gate.allows(graph, i, j) {
            rejected += 1;
            continue;
        }
        if graph.add_edge(i, j) {
            added += 1;
        }
    }

    debug!(added, rejected, max_dist, "Proximity pass");
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;
    use scaffold_types::{NoObstacles, SphereObstacles};

    fn grid(n: i32) -> StrutGraph {
        let mut positions = Vec::new();
        for z in 0..n {
            for y in 0..n {
                for x in 0..n {
                    positions.push(Point3::new(f64::from(x), f64::from(y), f64::from(z)));
                }
            }
        }
        StrutGraph::new(positions)
    }

    #[test]
    fn face_links_only_below_diagonal() {
        let mut graph = grid(3);
        let params = ConnectivityParams::new().with_connection_multiplier(1.2);
        let added = connect_proximity(&mut graph, &params, &NoObstacles);
        // 3 axes * 3*3 lines * 2 links
        assert_eq!(added, 54);
    }

    #[test]
    fn face_diagonals_included() {
        let mut graph = grid(2);
        let params = ConnectivityParams::new().with_connection_multiplier(1.5);
        // 12 cube edges + 12 face diagonals
        assert_eq!(connect_proximity(&mut graph, &params, &NoObstacles), 24);
    }

    #[test]
    fn obstacles_block_links() {
        let mut graph = StrutGraph::new(vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)]);
        let wall = SphereObstacles::new().with_sphere(Point3::new(0.5, 0.0, 0.0), 0.1);
        let params = ConnectivityParams::new();
        assert_eq!(connect_proximity(&mut graph, &params, &wall), 0);

        let ignoring = params.with_respect_obstacles(false);
        assert_eq!(connect_proximity(&mut graph, &ignoring, &wall), 1);
    }

    #[test]
    fn rerun_adds_nothing() {
        let mut graph = grid(3);
        let params = ConnectivityParams::new();
        assert!(connect_proximity(&mut graph, &params, &NoObstacles) > 0);
        assert_eq!(connect_proximity(&mut graph, &params, &NoObstacles), 0);
    }
}
