//! Obstacle-aware flood fill.

use std::collections::VecDeque;

use hashbrown::HashSet;
use nalgebra::Point3;
use scaffold_types::{Node, ObstacleQuery, VoxelCoord};
use tracing::{debug, info, warn};

use crate::error::SynthesisResult;
use crate::params::SynthesisParams;
use crate::porosity::PorosityFilter;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Output of [`synthesize_lattice`].
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LatticeResult {
    /// Emitted nodes, in breadth-first order. `nodes[i].id == i`.
    pub nodes: Vec<Node>,

    /// Distinct cells visited (dequeued) by the fill.
    pub visited: usize,

    /// Visited cells rejected by the obstacle test.
    pub blocked: usize,

    /// Free cells whose emission the porosity filter withheld.
    pub withheld: usize,

    /// Neighbor steps dropped because the neighbor lies beyond the search
    /// radius.
    pub out_of_range: usize,

    /// Neighbor steps dropped by the line-of-sight check.
    pub occluded: usize,
}

impl LatticeResult {
    /// Number of emitted nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// True when no node was emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node positions, indexed like `nodes`.
    #[must_use]
    pub fn positions(&self) -> Vec<Point3<f64>> {
        self.nodes.iter().map(|n| n.position).collect()
    }
}

/// Grows a lattice from `params.origin` by breadth-first flood fill over the
/// six face neighbors of each cell.
///
/// - A cell is visited at most once.
/// - Cells beyond Chebyshev distance `max_radius` of the origin cell are
///   never entered.
/// - A cell whose position is blocked (with `test_radius`) is neither
///   emitted nor expanded, so obstacles are impermeable walls.
/// - A cell withheld by the porosity filter still expands.
/// - With `check_line_of_sight`, the fill also refuses to step across an
///   obstructed segment between two cell positions.
///
/// Node ids follow emission order. A blocked origin yields an empty result,
/// which is logged as a warning rather than returned as an error.
///
/// # Errors
///
/// Returns [`LatticeError`](crate::LatticeError) if the parameters do not
/// validate.
///
/// # Example
///
/// ```
/// use scaffold_lattice::{synthesize_lattice, SynthesisParams};
/// use scaffold_types::NoObstacles;
///
/// let params = SynthesisParams::new().with_max_radius(2);
/// let result = synthesize_lattice(&params, &NoObstacles)?;
///
/// assert_eq!(result.node_count(), 125);
/// assert_eq!(result.nodes[0].position, params.origin);
/// # Ok::<(), scaffold_lattice::LatticeError>(())
/// ```
pub fn synthesize_lattice<O>(params: &SynthesisParams, obstacles: &O) -> SynthesisResult<LatticeResult>
where
    O: ObstacleQuery + ?Sized,
{
    params.validate()?;

    info!(
        spacing = params.spacing,
        max_radius = params.max_radius,
        test_radius = params.test_radius,
        line_of_sight = params.check_line_of_sight,
        "Synthesizing lattice"
    );

    let origin_cell = VoxelCoord::origin();
    let mut filter = PorosityFilter::new(params.porosity, params.max_radius, params.seed);
    let mut result = LatticeResult::default();

    let mut seen: HashSet<VoxelCoord> = HashSet::new();
    let mut queue: VecDeque<VoxelCoord> = VecDeque::new();
    seen.insert(origin_cell);
    queue.push_back(origin_cell);

    while let Some(cell) = queue.pop_front() {
        result.visited += 1;
        let position = cell.to_world(params.origin, params.spacing);

        if obstacles.is_blocked(position, params.test_radius) {
            result.blocked += 1;
            continue;
        }

        if filter.withholds(cell) {
            result.withheld += 1;
        } else {
            // Bounded by the search cube, which validate() keeps within u32.
            #[allow(clippy::cast_possible_truncation)]
            let id = result.nodes.len() as u32;
            result.nodes.push(Node::new(id, cell, position));
        }

        for neighbor in cell.face_neighbors() {
            if seen.contains(&neighbor) {
                continue;
            }
            if neighbor.chebyshev_distance(origin_cell) > params.max_radius {
                result.out_of_range += 1;
                continue;
            }
            if params.check_line_of_sight {
                let target = neighbor.to_world(params.origin, params.spacing);
                if obstacles.is_segment_blocked(position, target, params.test_radius) {
                    // Left unmarked: another free neighbor may still reach it.
                    result.occluded += 1;
                    continue;
                }
            }
            seen.insert(neighbor);
            queue.push_back(neighbor);
        }
    }

    debug!(
        visited = result.visited,
        blocked = result.blocked,
        withheld = result.withheld,
        out_of_range = result.out_of_range,
        occluded = result.occluded,
        "Flood fill finished"
    );

    if result.nodes.is_empty() {
        warn!(
            origin = ?params.origin,
            "Lattice synthesis produced no nodes; the origin cell is blocked"
        );
    } else {
        info!(nodes = result.nodes.len(), "Lattice synthesized");
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LatticeError, Porosity};
    use scaffold_types::{FnObstacles, NoObstacles, SphereObstacles};

    #[test]
    fn radius_zero_emits_origin_only() {
        let params = SynthesisParams::new().with_max_radius(0);
        let result = synthesize_lattice(&params, &NoObstacles).unwrap();
        assert_eq!(result.node_count(), 1);
        assert_eq!(result.visited, 1);
        assert_eq!(result.out_of_range, 6);
    }

    #[test]
    fn ids_match_indices_and_bfs_order() {
        let params = SynthesisParams::new().with_max_radius(3);
        let result = synthesize_lattice(&params, &NoObstacles).unwrap();
        let origin = VoxelCoord::origin();
        let mut last_distance = 0;
        for (i, node) in result.nodes.iter().enumerate() {
            assert_eq!(node.index(), i);
            // Manhattan distance never decreases in BFS order.
            let d = node.cell.x.abs() + node.cell.y.abs() + node.cell.z.abs();
            assert!(d >= last_distance);
            last_distance = d;
            assert!(node.cell.chebyshev_distance(origin) <= 3);
        }
    }

    #[test]
    fn positions_use_origin_and_spacing() {
        let params = SynthesisParams::new()
            .with_origin(Point3::new(10.0, -5.0, 2.0))
            .with_spacing(0.5)
            .with_max_radius(1);
        let result = synthesize_lattice(&params, &NoObstacles).unwrap();
        for node in &result.nodes {
            let expected = node.cell.to_world(params.origin, 0.5);
            assert_eq!(node.position, expected);
        }
        // First neighbor is +x.
        assert_eq!(result.nodes[1].position, Point3::new(10.5, -5.0, 2.0));
    }

    #[test]
    fn blocked_origin_gives_empty_result() {
        let obstacles = SphereObstacles::new().with_sphere(Point3::origin(), 0.5);
        let params = SynthesisParams::new().with_max_radius(4);
        let result = synthesize_lattice(&params, &obstacles).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.visited, 1);
        assert_eq!(result.blocked, 1);
    }

    #[test]
    fn wall_stops_the_fill() {
        // Solid half-space x >= 2.
        let wall = FnObstacles::new(|p: Point3<f64>, r: f64| p.x + r >= 2.0);
        let params = SynthesisParams::new().with_max_radius(4).with_test_radius(0.0);
        let result = synthesize_lattice(&params, &wall).unwrap();
        assert!(result.nodes.iter().all(|n| n.position.x < 2.0));
        assert!(result.blocked > 0);
        // x in [-4, 1] times a 9x9 cross-section.
        assert_eq!(result.node_count(), 6 * 81);
    }

    #[test]
    fn porosity_thins_but_keeps_origin() {
        let params = SynthesisParams::new()
            .with_max_radius(4)
            .with_porosity(Porosity::Uniform(0.5))
            .with_seed(3);
        let dense = synthesize_lattice(&params.clone().with_porosity(Porosity::None), &NoObstacles)
            .unwrap();
        let sparse = synthesize_lattice(&params, &NoObstacles).unwrap();

        assert!(sparse.node_count() < dense.node_count());
        assert_eq!(sparse.nodes[0].cell, VoxelCoord::origin());
        // Withheld cells still expand.
        assert_eq!(sparse.visited, dense.visited);
        assert_eq!(sparse.node_count() + sparse.withheld, dense.node_count());
    }

    #[test]
    fn same_seed_is_deterministic() {
        let params = SynthesisParams::new()
            .with_max_radius(5)
            .with_porosity(Porosity::RadialGradient {
                inner: 0.0,
                outer: 0.6,
            })
            .with_seed(99);
        let a = synthesize_lattice(&params, &NoObstacles).unwrap();
        let b = synthesize_lattice(&params, &NoObstacles).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_params_are_rejected() {
        let params = SynthesisParams::new().with_spacing(0.0);
        assert!(matches!(
            synthesize_lattice(&params, &NoObstacles),
            Err(LatticeError::InvalidSpacing(_))
        ));
    }

    #[test]
    fn accepts_trait_objects() {
        let obstacles: Box<dyn ObstacleQuery> = Box::new(NoObstacles);
        let params = SynthesisParams::new().with_max_radius(1);
        let result = synthesize_lattice(&params, obstacles.as_ref()).unwrap();
        assert_eq!(result.node_count(), 27);
    }
}
