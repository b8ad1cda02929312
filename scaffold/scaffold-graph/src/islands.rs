//! Pass 3: island bridging.

use scaffold_types::ObstacleQuery;
use tracing::{debug, warn};

use crate::gate::EdgeGate;
use crate::spatial::NeighborIndex;
use crate::{ConnectivityParams, StrutGraph};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A component that could not be attached to the main component.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnresolvedIsland {
    /// Number of nodes in the island.
    pub component_size: usize,
    /// Distance to the nearest main-component node, ignoring obstacles.
    pub nearest_distance: f64,
}

/// What [`bridge_islands`] did.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BridgeOutcome {
    /// Components before bridging.
    pub components_before: usize,
    /// Bridges added within the island search radius.
    pub bridges_added: usize,
    /// Bridges added by the unrestricted fallback.
    pub fallback_bridges: usize,
    /// Islands left detached.
    pub unresolved: Vec<UnresolvedIsland>,
}

impl BridgeOutcome {
    /// Total edges added.
    #[must_use]
    pub const fn total_bridges(&self) -> usize {
        self.bridges_added + self.fallback_bridges
    }
}

/// Attaches every island to the main component.
///
/// The main component is the largest; ties go to the component holding the
/// lowest node index. Islands are processed in component order. For each
/// island the candidate pairs `(island node, main node)` within
/// `max_dist × island_search_radius_multiplier` are sorted by distance and
/// up to `bridge_count` of them become edges. An attached island joins the
/// main component, so later islands may bridge to it.
///
/// An island with no usable candidate in range is attached through the
/// single globally closest usable pair when `unrestricted_fallback` is on.
/// Otherwise, or when every pair is obstructed, it is recorded as an
/// [`UnresolvedIsland`] and logged.
pub fn bridge_islands(
    graph: &mut StrutGraph,
    params: &ConnectivityParams,
    obstacles: &dyn ObstacleQuery,
) -> BridgeOutcome {
    let components = graph.connected_components();
    let mut outcome = BridgeOutcome {
        components_before: components.len(),
        ..BridgeOutcome::default()
    };
    if components.len() <= 1 {
        return outcome;
    }

    let mut main = 0;
    for (k, component) in components.iter().enumerate() {
        if component.len() > components[main].len() {
            main = k;
        }
    }

    let search_radius = params.max_dist() * params.island_search_radius_multiplier;
    let index = NeighborIndex::build(graph.positions(), search_radius);
    let gate = EdgeGate::new(params, obstacles);

    let mut in_main = vec![false; graph.node_count()];
    let mut main_nodes = components[main].clone();
    for &i in &main_nodes {
        in_main[i] = true;
    }

    for (k, island) in components.iter().enumerate() {
        if k == main {
            continue;
        }

        let mut candidates: Vec<(f64, usize, usize)> = Vec::new();
        for &a in island {
            for b in index.within(graph.positions(), graph.positions()[a], search_radius) {
                if in_main[b] {
                    candidates.push((graph.distance(a, b), a, b));
                }
            }
        }
        candidates.sort_by(|x, y| {
            x.0.total_cmp(&y.0)
                .then(x.1.cmp(&y.1))
                .then(x.2.cmp(&y.2))
        });

        let mut attached = 0;
        for &(_, a, b) in &candidates {
            if attached == params.bridge_count {
                break;
            }
            if gate.allows(graph, a, b) && graph.add_edge(a, b) {
                attached += 1;
            }
        }
        outcome.bridges_added += attached;

        if attached == 0 && params.unrestricted_fallback {
            if let Some((a, b)) = closest_usable_pair(graph, &gate, island, &main_nodes) {
                if graph.add_edge(a, b) {
                    debug!(
                        island_size = island.len(),
                        distance = graph.distance(a, b),
                        "Island attached by unrestricted fallback"
                    );
                    outcome.fallback_bridges += 1;
                    attached = 1;
                }
            }
        }

        if attached == 0 {
            let nearest_distance = island
                .iter()
                .flat_map(|&a| main_nodes.iter().map(move |&b| (a, b)))
                .map(|(a, b)| graph.distance(a, b))
                .fold(f64::INFINITY, f64::min);
            warn!(
                island_size = island.len(),
                nearest_distance,
                fallback = params.unrestricted_fallback,
                "Island could not be bridged to the main component"
            );
            outcome.unresolved.push(UnresolvedIsland {
                component_size: island.len(),
                nearest_distance,
            });
            continue;
        }

        for &i in island {
            in_main[i] = true;
        }
        main_nodes.extend_from_slice(island);
    }

    debug!(
        components = outcome.components_before,
        bridges = outcome.bridges_added,
        fallback = outcome.fallback_bridges,
        unresolved = outcome.unresolved.len(),
        "Island bridging pass"
    );
    outcome
}

/// The closest island/main pair whose edge passes the gate, at any
/// distance.
fn closest_usable_pair(
    graph: &StrutGraph,
    gate: &EdgeGate<'_>,
    island: &[usize],
    main_nodes: &[usize],
) -> Option<(usize, usize)> {
    let mut pairs: Vec<(f64, usize, usize)> = island
        .iter()
        .flat_map(|&a| main_nodes.iter().map(move |&b| (a, b)))
        .map(|(a, b)| (graph.distance(a, b), a, b))
        .collect();
    pairs.sort_by(|x, y| {
        x.0.total_cmp(&y.0)
            .then(x.1.cmp(&y.1))
            .then(x.2.cmp(&y.2))
    });
    pairs
        .into_iter()
        .find(|&(_, a, b)| gate.allows(graph, a, b))
        .map(|(_, a, b)| (a, b))
}
