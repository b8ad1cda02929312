//! Obstacle gate for candidate edges.

use scaffold_types::ObstacleQuery;

use crate::{ConnectivityParams, StrutGraph};

/// Decides whether a candidate edge may be realized.
///
/// With `respect_obstacles` off every edge passes. Otherwise the strut the
/// edge would become (capsule of the strut radius) must be unobstructed.
#[derive(Clone, Copy)]
pub(crate) struct EdgeGate<'a> {
    obstacles: Option<&'a dyn ObstacleQuery>,
    radius: f64,
}

impl<'a> EdgeGate<'a> {
    pub(crate) fn new(params: &ConnectivityParams, obstacles: &'a dyn ObstacleQuery) -> Self {
        Self {
            obstacles: params.respect_obstacles.then_some(obstacles),
            radius: params.strut_radius(),
        }
    }

    pub(crate) fn allows(&self, graph: &StrutGraph, i: usize, j: usize) -> bool {
        let Some(obstacles) = self.obstacles else {
            return true;
        };
        let positions = graph.positions();
        !obstacles.is_segment_blocked(positions[i], positions[j], self.radius)
    }
}
