//! Lattice nodes.

use crate::VoxelCoord;
use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A lattice node.
///
/// Nodes live in a flat arena (`Vec<Node>`) and are addressed by index. The
/// `id` equals that index for nodes produced by the synthesizer, so graph
/// code can use either interchangeably. Nodes are immutable once created; a
/// regeneration replaces the whole arena.
///
/// # Example
///
/// ```
/// use scaffold_types::{Node, VoxelCoord};
/// use nalgebra::Point3;
///
/// let node = Node::new(0, VoxelCoord::origin(), Point3::new(1.0, 2.0, 3.0));
/// assert_eq!(node.index(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    /// Stable id, equal to the node's index in its arena.
    pub id: u32,
    /// Lattice cell the node was generated from.
    pub cell: VoxelCoord,
    /// World-space position.
    pub position: Point3<f64>,
}

impl Node {
    /// Creates a node.
    #[must_use]
    pub const fn new(id: u32, cell: VoxelCoord, position: Point3<f64>) -> Self {
        Self { id, cell, position }
    }

    /// The node id as an arena index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.id as usize
    }
}
