//! Strut graph arena.

use std::collections::VecDeque;

use hashbrown::HashSet;
use nalgebra::Point3;
use scaffold_types::{Node, Strut};

/// An undirected graph over lattice node positions.
///
/// Nodes are addressed by index into the position arena. Edges are stored
/// normalized as `(i, j)` with `i < j`; self-loops and duplicates are
/// rejected.
///
/// # Example
///
/// ```
/// use scaffold_graph::StrutGraph;
/// use nalgebra::Point3;
///
/// let mut graph = StrutGraph::new(vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(5.0, 0.0, 0.0),
/// ]);
///
/// assert!(graph.add_edge(0, 1));
/// assert!(!graph.add_edge(1, 0)); // duplicate
/// assert!(!graph.add_edge(2, 2)); // self-loop
///
/// assert_eq!(graph.component_count(), 2);
/// assert_eq!(graph.hop_distance(0, 1, 4), Some(1));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StrutGraph {
    positions: Vec<Point3<f64>>,
    adjacency: Vec<Vec<usize>>,
    edges: HashSet<(usize, usize)>,
}

impl StrutGraph {
    /// Creates an edgeless graph over `positions`.
    #[must_use]
    pub fn new(positions: Vec<Point3<f64>>) -> Self {
        let adjacency = vec![Vec::new(); positions.len()];
        Self {
            positions,
            adjacency,
            edges: HashSet::new(),
        }
    }

    /// Creates an edgeless graph over the positions of `nodes`.
    #[must_use]
    pub fn from_nodes(nodes: &[Node]) -> Self {
        Self::new(nodes.iter().map(|n| n.position).collect())
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Node positions.
    #[must_use]
    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    /// Position of node `i`.
    #[must_use]
    pub fn position(&self, i: usize) -> Option<Point3<f64>> {
        self.positions.get(i).copied()
    }

    /// Euclidean distance between nodes `i` and `j`.
    ///
    /// Both indices must be in range.
    #[must_use]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        (self.positions[i] - self.positions[j]).norm()
    }

    /// Degree of node `i` (0 for an out-of-range index).
    #[must_use]
    pub fn degree(&self, i: usize) -> usize {
        self.adjacency.get(i).map_or(0, Vec::len)
    }

    /// Neighbors of node `i` in insertion order.
    #[must_use]
    pub fn neighbors(&self, i: usize) -> &[usize] {
        self.adjacency.get(i).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `i` and `j` are adjacent.
    #[must_use]
    pub fn has_edge(&self, i: usize, j: usize) -> bool {
        self.edges.contains(&normalize_edge(i, j))
    }

    /// Adds the edge `{i, j}`.
    ///
    /// Returns `false` and leaves the graph unchanged for a self-loop, a
    /// duplicate, or an out-of-range index.
    pub fn add_edge(&mut self, i: usize, j: usize) -> bool {
        let n = self.positions.len();
        if i == j || i >= n || j >= n {
            return false;
        }
        if !self.edges.insert(normalize_edge(i, j)) {
            return false;
        }
        self.adjacency[i].push(j);
        self.adjacency[j].push(i);
        true
    }

    /// Removes the edge `{i, j}`. Returns whether it existed.
    pub fn remove_edge(&mut self, i: usize, j: usize) -> bool {
        if !self.edges.remove(&normalize_edge(i, j)) {
            return false;
        }
        self.adjacency[i].retain(|&k| k != j);
        self.adjacency[j].retain(|&k| k != i);
        true
    }

    /// Removes every edge incident to `node`, returning how many were
    /// removed.
    pub fn remove_edges_of(&mut self, node: usize) -> usize {
        let Some(neighbors) = self.adjacency.get_mut(node).map(std::mem::take) else {
            return 0;
        };
        for &other in &neighbors {
            self.edges.remove(&normalize_edge(node, other));
            self.adjacency[other].retain(|&k| k != node);
        }
        neighbors.len()
    }

    /// All edges as `(i, j)` with `i < j`, sorted.
    #[must_use]
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut edges: Vec<_> = self.edges.iter().copied().collect();
        edges.sort_unstable();
        edges
    }

    /// Connected components, each sorted ascending, ordered by their lowest
    /// node index.
    #[must_use]
    pub fn connected_components(&self) -> Vec<Vec<usize>> {
        let n = self.positions.len();
        let mut seen = vec![false; n];
        let mut components = Vec::new();
        let mut queue = VecDeque::new();

        for start in 0..n {
            if seen[start] {
                continue;
            }
            seen[start] = true;
            queue.push_back(start);
            let mut component = Vec::new();
            while let Some(current) = queue.pop_front() {
                component.push(current);
                for &next in &self.adjacency[current] {
                    if !seen[next] {
                        seen[next] = true;
                        queue.push_back(next);
                    }
                }
            }
            component.sort_unstable();
            components.push(component);
        }

        components
    }

    /// Number of connected components (0 for an empty graph).
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.connected_components().len()
    }

    /// True when the graph has at most one component.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.component_count() <= 1
    }

    /// Fewest hops from `from` to `to`, if reachable within `max_hops`.
    #[must_use]
    pub fn hop_distance(&self, from: usize, to: usize, max_hops: usize) -> Option<usize> {
        let n = self.positions.len();
        if from >= n || to >= n {
            return None;
        }
        if from == to {
            return Some(0);
        }

        let mut seen: HashSet<usize> = HashSet::new();
        let mut queue = VecDeque::new();
        seen.insert(from);
        queue.push_back((from, 0usize));

        while let Some((current, hops)) = queue.pop_front() {
            if hops == max_hops {
                continue;
            }
            for &next in &self.adjacency[current] {
                if next == to {
                    return Some(hops + 1);
                }
                if seen.insert(next) {
                    queue.push_back((next, hops + 1));
                }
            }
        }

        None
    }

    /// Realizes every edge as a strut of `radius`, in sorted edge order.
    #[must_use]
    pub fn to_struts(&self, radius: f64) -> Vec<Strut> {
        self.edges()
            .into_iter()
            .map(|(i, j)| Strut::new(self.positions[i], self.positions[j], radius))
            .collect()
    }
}

/// Normalize edge so smaller index comes first.
const fn normalize_edge(i: usize, j: usize) -> (usize, usize) {
    if i < j { (i, j) } else { (j, i) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize) -> StrutGraph {
        #[allow(clippy::cast_precision_loss)]
        let positions = (0..n).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect();
        StrutGraph::new(positions)
    }

    #[test]
    fn add_and_remove_edges() {
        let mut graph = line(3);
        assert!(graph.add_edge(2, 0));
        assert!(graph.has_edge(0, 2));
        assert_eq!(graph.edges(), vec![(0, 2)]);
        assert!(graph.remove_edge(0, 2));
        assert!(!graph.remove_edge(0, 2));
        assert_eq!(graph.degree(0), 0);
        assert_eq!(graph.degree(2), 0);
    }

    #[test]
    fn out_of_range_edges_are_rejected() {
        let mut graph = line(2);
        assert!(!graph.add_edge(0, 5));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn remove_edges_of_middle_node() {
        let mut graph = line(5);
        for i in 0..4 {
            graph.add_edge(i, i + 1);
        }
        assert_eq!(graph.remove_edges_of(2), 2);
        assert_eq!(graph.degree(2), 0);
        assert_eq!(graph.degree(1), 1);
        assert_eq!(graph.degree(3), 1);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(
            graph.connected_components(),
            vec![vec![0, 1], vec![2], vec![3, 4]]
        );
    }

    #[test]
    fn components_ordered_by_lowest_index() {
        let mut graph = line(6);
        graph.add_edge(5, 1);
        graph.add_edge(0, 3);
        let components = graph.connected_components();
        assert_eq!(components, vec![vec![0, 3], vec![1, 5], vec![2], vec![4]]);
        assert!(!graph.is_connected());
    }

    #[test]
    fn hop_distance_respects_bound() {
        let mut graph = line(6);
        for i in 0..5 {
            graph.add_edge(i, i + 1);
        }
        assert_eq!(graph.hop_distance(0, 5, 10), Some(5));
        assert_eq!(graph.hop_distance(0, 5, 5), Some(5));
        assert_eq!(graph.hop_distance(0, 5, 4), None);
        assert_eq!(graph.hop_distance(3, 3, 0), Some(0));
    }

    #[test]
    fn struts_follow_sorted_edges() {
        let mut graph = line(3);
        graph.add_edge(2, 1);
        graph.add_edge(1, 0);
        let struts = graph.to_struts(0.25);
        assert_eq!(struts.len(), 2);
        assert_eq!(struts[0].start, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(struts[1].end, Point3::new(2.0, 0.0, 0.0));
        assert!(struts.iter().all(|s| (s.radius - 0.25).abs() < f64::EPSILON));
    }

    #[test]
    fn empty_graph() {
        let graph = StrutGraph::default();
        assert_eq!(graph.component_count(), 0);
        assert!(graph.is_connected());
    }
}
