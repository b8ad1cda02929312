//! CPU marching cubes.

use hashbrown::HashMap;
use nalgebra::Point3;
use scaffold_types::SurfaceMesh;
use tracing::debug;

use crate::error::{ExtractionError, ExtractionResult};
use crate::extract::{IsosurfaceExtractor, validate_grid};
use crate::tables::{CORNER_OFFSETS, EDGE_TABLE, EDGE_VERTICES, TRI_TABLE};

/// Marching cubes over a dense grid.
///
/// Vertices on a grid edge are shared by every cube touching that edge, so
/// the output is an indexed mesh without duplicates. The lookup table
/// resolves ambiguous faces consistently between neighboring cubes, which
/// keeps the surface closed wherever the level set does not leave the grid.
///
/// # Example
///
/// ```
/// use scaffold_surface::{IsosurfaceExtractor, MarchingCubes};
///
/// // A single solid sample in the middle of a 3x3x3 grid.
/// let mut field = vec![-1.0; 27];
/// field[13] = 1.0;
///
/// let mesh = MarchingCubes::new().extract(&field, [3, 3, 3], 0.0, 1.0)?;
/// assert_eq!(mesh.vertex_count(), 6);
/// assert_eq!(mesh.triangle_count(), 8);
/// assert!(mesh.signed_volume() > 0.0);
/// # Ok::<(), scaffold_surface::ExtractionError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarchingCubes {
    /// Largest number of triangles to emit before failing.
    pub max_triangles: Option<usize>,
}

impl MarchingCubes {
    /// Creates an extractor without a triangle budget.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_triangles: None,
        }
    }

    /// Fails extraction once more than `limit` triangles would be emitted.
    #[must_use]
    pub const fn with_max_triangles(mut self, limit: usize) -> Self {
        self.max_triangles = Some(limit);
        self
    }
}

impl IsosurfaceExtractor for MarchingCubes {
    fn extract(
        &self,
        field: &[f64],
        dims: [usize; 3],
        isovalue: f64,
        spacing: f64,
    ) -> ExtractionResult<SurfaceMesh> {
        validate_grid(field, dims, spacing)?;

        let [nx, ny, nz] = dims;
        let mut mesh = SurfaceMesh::new();
        // Keyed by (linear index of the lower endpoint, axis).
        let mut edge_vertices: HashMap<(usize, usize), u32> = HashMap::new();
        let mut active_cubes = 0usize;

        for z in 0..nz - 1 {
            for y in 0..ny - 1 {
                for x in 0..nx - 1 {
                    let corners = CORNER_OFFSETS.map(|[dx, dy, dz]| [x + dx, y + dy, z + dz]);
                    let values = corners.map(|[cx, cy, cz]| field[cx + nx * (cy + ny * cz)]);

                    let case = values
                        .iter()
                        .enumerate()
                        .filter(|&(_, &v)| v < isovalue)
                        .fold(0usize, |acc, (i, _)| acc | (1 << i));
                    if EDGE_TABLE[case] == 0 {
                        continue;
                    }
                    active_cubes += 1;

                    for tri in TRI_TABLE[case].chunks_exact(3) {
                        if tri[0] < 0 {
                            break;
                        }
                        if let Some(limit) = self.max_triangles {
                            if mesh.triangles.len() >= limit {
                                return Err(ExtractionError::TriangleBudgetExceeded { limit });
                            }
                        }

                        let mut indices = [0u32; 3];
                        for (slot, &edge) in indices.iter_mut().zip(tri) {
                            #[allow(clippy::cast_sign_loss)]
                            let [a, b] = EDGE_VERTICES[edge as usize];
                            *slot = edge_vertex(
                                &mut mesh,
                                &mut edge_vertices,
                                (corners[a], values[a]),
                                (corners[b], values[b]),
                                dims,
                                isovalue,
                                spacing,
                            );
                        }
                        mesh.triangles.push(indices);
                    }
                }
            }
        }

        debug!(
            active_cubes,
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "Marching cubes finished"
        );

        Ok(mesh)
    }
}

/// Returns the vertex on the grid edge between two adjacent samples,
/// creating it on first use.
fn edge_vertex(
    mesh: &mut SurfaceMesh,
    cache: &mut HashMap<(usize, usize), u32>,
    (mut p, mut vp): ([usize; 3], f64),
    (mut q, mut vq): ([usize; 3], f64),
    dims: [usize; 3],
    isovalue: f64,
    spacing: f64,
) -> u32 {
    // Interpolate from the lower endpoint so every cube computes the same
    // position for a shared edge.
    if q < p {
        std::mem::swap(&mut p, &mut q);
        std::mem::swap(&mut vp, &mut vq);
    }
    let axis = (0..3).find(|&i| p[i] != q[i]).unwrap_or(0);
    let key = (p[0] + dims[0] * (p[1] + dims[1] * p[2]), axis);

    *cache.entry(key).or_insert_with(|| {
        let delta = vq - vp;
        let t = if delta.abs() < 1e-12 {
            0.5
        } else {
            ((isovalue - vp) / delta).clamp(0.0, 1.0)
        };
        #[allow(clippy::cast_precision_loss)]
        let lerp = |i: usize| (p[i] as f64 + t * (q[i] as f64 - p[i] as f64)) * spacing;
        #[allow(clippy::cast_possible_truncation)]
        let id = mesh.vertices.len() as u32;
        mesh.vertices.push(Point3::new(lerp(0), lerp(1), lerp(2)));
        id
    })
}
