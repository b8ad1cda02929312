//! Scenario and property tests for connectivity repair.

use nalgebra::Point3;
use proptest::prelude::*;
use scaffold_graph::{
    ConnectivityGraphBuilder, ConnectivityParams, StrutGraph, bridge_islands, connect_proximity,
    fill_gaps,
};
use scaffold_lattice::{SynthesisParams, synthesize_lattice};
use scaffold_types::{NoObstacles, ObstacleQuery, SphereObstacles};

fn cluster(center: Point3<f64>) -> Vec<Point3<f64>> {
    let mut points = Vec::new();
    for z in 0..2 {
        for y in 0..2 {
            for x in 0..2 {
                points.push(center + nalgebra::Vector3::new(f64::from(x), f64::from(y), f64::from(z)));
            }
        }
    }
    points
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn five_collinear_nodes_gap_fill_restores_middle() {
    let positions: Vec<_> = (0..5)
        .map(|i| Point3::new(f64::from(i), 0.0, 0.0))
        .collect();
    let mut graph = StrutGraph::new(positions);
    let params = ConnectivityParams::new()
        .with_spacing(1.0)
        .with_connection_multiplier(1.6)
        .with_gap_fill(1.5, 2, 3)
        .with_search_radius_multiplier(1.0);

    connect_proximity(&mut graph, &params, &NoObstacles);
    assert_eq!(graph.edges(), vec![(0, 1), (1, 2), (2, 3), (3, 4)]);

    graph.remove_edges_of(2);
    assert_eq!(graph.degree(2), 0);

    fill_gaps(&mut graph, &params, &NoObstacles);
    assert!(graph.has_edge(1, 2));
    assert!(graph.has_edge(2, 3));
    assert!(graph.is_connected());
}

#[test]
fn two_clusters_fifty_apart_get_bridge_count_bridges() {
    let mut positions = cluster(Point3::origin());
    positions.extend(cluster(Point3::new(50.0, 0.0, 0.0)));
    let mut graph = StrutGraph::new(positions);

    let params = ConnectivityParams::new()
        .with_connection_multiplier(1.5)
        .with_island_search_radius_multiplier(40.0)
        .with_bridge_count(3);

    connect_proximity(&mut graph, &params, &NoObstacles);
    assert_eq!(graph.component_count(), 2);
    let before = graph.edge_count();

    let outcome = bridge_islands(&mut graph, &params, &NoObstacles);
    assert_eq!(outcome.bridges_added, 3);
    assert_eq!(outcome.fallback_bridges, 0);
    assert_eq!(graph.edge_count(), before + 3);
    assert_eq!(graph.component_count(), 1);
}

#[test]
fn full_pipeline_on_synthesized_lattice() {
    let obstacles = SphereObstacles::new().with_sphere(Point3::new(2.0, 0.0, 0.0), 1.2);
    let lattice = synthesize_lattice(
        &SynthesisParams::new().with_max_radius(4).with_test_radius(0.1),
        &obstacles,
    )
    .unwrap();

    let result = ConnectivityGraphBuilder::new(ConnectivityParams::new())
        .with_obstacles(&obstacles)
        .build_from_nodes(&lattice.nodes)
        .unwrap();

    assert!(result.report.is_connected());
    assert!(result.report.unresolved_islands.is_empty());
    for strut in &result.struts {
        assert!(!obstacles.is_segment_blocked(strut.start, strut.end, strut.radius));
    }
}

#[test]
fn struts_use_spacing_scaled_radius() {
    let positions: Vec<_> = (0..4)
        .map(|i| Point3::new(f64::from(i) * 2.0, 0.0, 0.0))
        .collect();
    let params = ConnectivityParams::new()
        .with_spacing(2.0)
        .with_radius_multiplier(0.2);
    let result = ConnectivityGraphBuilder::new(params).build(&positions).unwrap();
    assert!(!result.struts.is_empty());
    for strut in &result.struts {
        assert!((strut.radius - 0.4).abs() < 1e-12);
        assert!(strut.start.x < strut.end.x);
    }
}

// =============================================================================
// Properties
// =============================================================================

fn arb_points() -> impl Strategy<Value = Vec<Point3<f64>>> {
    prop::collection::vec(
        (-20.0..20.0f64, -20.0..20.0f64, -20.0..20.0f64).prop_map(|(x, y, z)| Point3::new(x, y, z)),
        1..60,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn proximity_links_every_close_pair(points in arb_points()) {
        let params = ConnectivityParams::new().with_spacing(3.0);
        let mut graph = StrutGraph::new(points.clone());
        connect_proximity(&mut graph, &params, &NoObstacles);
        let max_dist = params.max_dist();
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                let close = (points[i] - points[j]).norm() <= max_dist;
                prop_assert_eq!(graph.has_edge(i, j), close);
            }
        }
    }

    #[test]
    fn pipeline_yields_one_component(points in arb_points()) {
        let result = ConnectivityGraphBuilder::new(ConnectivityParams::new())
            .build(&points)
            .unwrap();
        prop_assert_eq!(result.graph.component_count(), 1);
        prop_assert!(result.report.unresolved_islands.is_empty());
    }

    #[test]
    fn edges_are_normalized_and_unique(points in arb_points()) {
        let result = ConnectivityGraphBuilder::new(ConnectivityParams::new())
            .build(&points)
            .unwrap();
        let edges = result.graph.edges();
        for pair in edges.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
        for &(i, j) in &edges {
            prop_assert!(i < j);
        }
        prop_assert_eq!(edges.len(), result.struts.len());
    }
}
