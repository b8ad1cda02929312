//! Voxel traversal along a bounded segment.
//!
//! Uses the DDA (Digital Differential Analyzer) algorithm of Amanatides & Woo.
//! Unlike an unbounded ray walk, the traversal stops at the cell containing
//! the segment end, so it can be exhausted with `for` or `any`.

use crate::VoxelCoord;
use nalgebra::Point3;

/// Iterator over every cell a segment passes through, in order from start
/// to end.
///
/// Yields `(cell, t)` pairs where `t` in `[0, 1]` is the segment parameter
/// at which the segment enters the cell.
///
/// # Example
///
/// ```
/// use scaffold_types::{SegmentTraversal, VoxelCoord};
/// use nalgebra::Point3;
///
/// let cells: Vec<_> = SegmentTraversal::new(
///     Point3::new(0.5, 0.5, 0.5),
///     Point3::new(3.5, 0.5, 0.5),
///     1.0,
///     Point3::origin(),
/// )
/// .map(|(cell, _)| cell)
/// .collect();
///
/// assert_eq!(cells.len(), 4);
/// assert_eq!(cells[3], VoxelCoord::new(3, 0, 0));
/// ```
#[derive(Debug, Clone)]
pub struct SegmentTraversal {
    current: VoxelCoord,
    last: VoxelCoord,
    step: [i32; 3],
    t_max: [f64; 3],
    t_delta: [f64; 3],
    t_current: f64,
    first: bool,
    done: bool,
}

impl SegmentTraversal {
    /// Creates a traversal of the segment `start → end` over a grid with
    /// cells of edge `voxel_size` anchored at `grid_origin`.
    #[must_use]
    pub fn new(
        start: Point3<f64>,
        end: Point3<f64>,
        voxel_size: f64,
        grid_origin: Point3<f64>,
    ) -> Self {
        let voxel_size = voxel_size.abs().max(f64::EPSILON);
        let current = VoxelCoord::containing(start, grid_origin, voxel_size);
        let last = VoxelCoord::containing(end, grid_origin, voxel_size);

        let relative = start - grid_origin;
        let dir = end - start;

        let mut step = [0i32; 3];
        let mut t_max = [f64::INFINITY; 3];
        let mut t_delta = [f64::INFINITY; 3];

        let coord = [current.x, current.y, current.z];
        for i in 0..3 {
            if dir[i].abs() > f64::EPSILON {
                step[i] = if dir[i] > 0.0 { 1 } else { -1 };
                t_delta[i] = (voxel_size / dir[i]).abs();

                let boundary = if dir[i] > 0.0 {
                    (f64::from(coord[i]) + 1.0) * voxel_size
                } else {
                    f64::from(coord[i]) * voxel_size
                };
                t_max[i] = (boundary - relative[i]) / dir[i];
            }
        }

        Self {
            current,
            last,
            step,
            t_max,
            t_delta,
            t_current: 0.0,
            first: true,
            done: false,
        }
    }
}

impl Iterator for SegmentTraversal {
    type Item = (VoxelCoord, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.first {
            self.first = false;
            self.done = self.current == self.last;
            return Some((self.current, 0.0));
        }

        let min_axis = if self.t_max[0] < self.t_max[1] {
            if self.t_max[0] < self.t_max[2] { 0 } else { 2 }
        } else if self.t_max[1] < self.t_max[2] {
            1
        } else {
            2
        };

        // Past the end point: the last cell was missed by rounding.
        if self.t_max[min_axis] > 1.0 {
            self.done = true;
            return None;
        }

        self.t_current = self.t_max[min_axis];
        match min_axis {
            0 => self.current.x = self.current.x.wrapping_add(self.step[0]),
            1 => self.current.y = self.current.y.wrapping_add(self.step[1]),
            _ => self.current.z = self.current.z.wrapping_add(self.step[2]),
        }
        self.t_max[min_axis] += self.t_delta[min_axis];
        self.done = self.current == self.last;

        Some((self.current, self.t_current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_length_segment_yields_one_cell() {
        let p = Point3::new(2.3, -0.4, 7.9);
        let cells: Vec<_> = SegmentTraversal::new(p, p, 1.0, Point3::origin()).collect();
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].0, VoxelCoord::new(2, -1, 7));
    }

    #[test]
    fn negative_direction() {
        let cells: Vec<_> = SegmentTraversal::new(
            Point3::new(0.5, 0.5, 0.5),
            Point3::new(-2.5, 0.5, 0.5),
            1.0,
            Point3::origin(),
        )
        .map(|(c, _)| c)
        .collect();
        assert_eq!(
            cells,
            vec![
                VoxelCoord::new(0, 0, 0),
                VoxelCoord::new(-1, 0, 0),
                VoxelCoord::new(-2, 0, 0),
                VoxelCoord::new(-3, 0, 0),
            ]
        );
    }

    #[test]
    fn diagonal_cells_are_face_connected() {
        let cells: Vec<_> = SegmentTraversal::new(
            Point3::new(0.1, 0.2, 0.3),
            Point3::new(4.7, 3.9, 2.2),
            0.5,
            Point3::origin(),
        )
        .map(|(c, _)| c)
        .collect();
        for pair in cells.windows(2) {
            assert_eq!(pair[0].chebyshev_distance(pair[1]), 1);
            let d = pair[1] - pair[0];
            assert_eq!(d.x.abs() + d.y.abs() + d.z.abs(), 1);
        }
        assert_eq!(
            *cells.last().unwrap(),
            VoxelCoord::containing(Point3::new(4.7, 3.9, 2.2), Point3::origin(), 0.5)
        );
    }

    #[test]
    fn parameters_are_monotonic_and_bounded() {
        let ts: Vec<f64> = SegmentTraversal::new(
            Point3::new(-3.2, 1.0, 0.0),
            Point3::new(5.0, -2.0, 1.5),
            0.7,
            Point3::new(0.1, 0.1, 0.1),
        )
        .map(|(_, t)| t)
        .collect();
        for pair in ts.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
        assert!(ts.iter().all(|t| (0.0..=1.0).contains(t)));
    }
}
