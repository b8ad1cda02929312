//! Uniform hash grid for radius queries over node positions.

use hashbrown::HashMap;
use nalgebra::{Point3, Vector3};
use scaffold_types::VoxelCoord;

/// Buckets node indices by the cell of a uniform grid containing them.
///
/// With a cell size equal to the query radius a query touches at most 27
/// buckets, which keeps the passes close to linear on lattice inputs. The
/// index stores indices only, so the graph can be mutated while it is in
/// use as long as positions do not change.
#[derive(Debug, Clone)]
pub(crate) struct NeighborIndex {
    cell_size: f64,
    cells: HashMap<VoxelCoord, Vec<usize>>,
}

impl NeighborIndex {
    pub(crate) fn build(positions: &[Point3<f64>], cell_size: f64) -> Self {
        let cell_size = cell_size.max(f64::EPSILON);
        let mut cells: HashMap<VoxelCoord, Vec<usize>> = HashMap::new();
        for (i, p) in positions.iter().enumerate() {
            cells
                .entry(VoxelCoord::containing(*p, Point3::origin(), cell_size))
                .or_default()
                .push(i);
        }
        Self { cell_size, cells }
    }

    /// Indices within `radius` of `center` (inclusive), ascending.
    pub(crate) fn within(
        &self,
        positions: &[Point3<f64>],
        center: Point3<f64>,
        radius: f64,
    ) -> Vec<usize> {
        let reach = Vector3::repeat(radius);
        let lo = VoxelCoord::containing(center - reach, Point3::origin(), self.cell_size);
        let hi = VoxelCoord::containing(center + reach, Point3::origin(), self.cell_size);

        let mut found = Vec::new();
        for z in lo.z..=hi.z {
            for y in lo.y..=hi.y {
                for x in lo.x..=hi.x {
                    let Some(bucket) = self.cells.get(&VoxelCoord::new(x, y, z)) else {
                        continue;
                    };
                    found.extend(
                        bucket
                            .iter()
                            .copied()
                            .filter(|&j| (positions[j] - center).norm() <= radius),
                    );
                }
            }
        }
        found.sort_unstable();
        found
    }
}
