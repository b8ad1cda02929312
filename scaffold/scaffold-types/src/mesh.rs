//! Extracted surface meshes.

use crate::Aabb;
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An indexed triangle mesh produced by isosurface extraction.
///
/// Triangles index into `vertices`. Vertices shared between triangles are
/// stored once.
///
/// # Example
///
/// ```
/// use scaffold_types::SurfaceMesh;
/// use nalgebra::Point3;
///
/// let mut mesh = SurfaceMesh::new();
/// mesh.vertices.push(Point3::new(0.0, 0.0, 0.0));
/// mesh.vertices.push(Point3::new(1.0, 0.0, 0.0));
/// mesh.vertices.push(Point3::new(0.0, 1.0, 0.0));
/// mesh.triangles.push([0, 1, 2]);
///
/// assert_eq!(mesh.triangle_count(), 1);
/// assert!(!mesh.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SurfaceMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3<f64>>,
    /// Triangles as vertex index triples.
    pub triangles: Vec<[u32; 3]>,
}

impl SurfaceMesh {
    /// Creates an empty mesh.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
        }
    }

    /// Creates a mesh from parts.
    #[must_use]
    pub const fn from_parts(vertices: Vec<Point3<f64>>, triangles: Vec<[u32; 3]>) -> Self {
        Self {
            vertices,
            triangles,
        }
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// True when the mesh has no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Moves every vertex by `offset`.
    pub fn translate(&mut self, offset: Vector3<f64>) {
        for v in &mut self.vertices {
            *v += offset;
        }
    }

    /// Bounding box of the vertices, `None` for an empty mesh.
    #[must_use]
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.vertices.iter())
    }

    /// Total surface area.
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        self.triangles
            .iter()
            .filter_map(|t| self.triangle_positions(*t))
            .map(|[a, b, c]| (b - a).cross(&(c - a)).norm() * 0.5)
            .sum()
    }

    /// Signed enclosed volume (divergence theorem). Positive for outward
    /// facing closed surfaces.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        self.triangles
            .iter()
            .filter_map(|t| self.triangle_positions(*t))
            .map(|[a, b, c]| a.coords.dot(&b.coords.cross(&c.coords)) / 6.0)
            .sum()
    }

    fn triangle_positions(&self, [i, j, k]: [u32; 3]) -> Option<[Point3<f64>; 3]> {
        Some([
            *self.vertices.get(i as usize)?,
            *self.vertices.get(j as usize)?,
            *self.vertices.get(k as usize)?,
        ])
    }
}
