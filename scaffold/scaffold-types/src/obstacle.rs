//! Obstacle queries.
//!
//! The pipeline never owns a collision world. It asks an injected
//! [`ObstacleQuery`] whether a position (inflated by a test radius) or a
//! swept segment intersects solid geometry. Four reference backends are
//! provided:
//!
//! - [`NoObstacles`] - empty space
//! - [`SphereObstacles`] - analytic spheres, exact tests
//! - [`VoxelObstacles`] - sparse occupied-cell set
//! - [`FnObstacles`] - adapter for a closure

use crate::{Aabb, ObstacleError, SegmentTraversal, VoxelCoord, point_segment_distance_squared};
use hashbrown::HashSet;
use nalgebra::{Point3, Vector3};
use std::sync::Arc;

/// Upper bound on point samples used by the default segment test.
pub const MAX_SEGMENT_SAMPLES: usize = 1 << 16;

/// Smallest sampling step used by the default segment test.
const MIN_SEGMENT_STEP: f64 = 1e-3;

/// Capability to test positions and segments against solid geometry.
///
/// Implementations must be deterministic for the duration of a
/// regeneration: the same query returns the same answer.
pub trait ObstacleQuery {
    /// Whether a sphere of `test_radius` centered at `position` overlaps an
    /// obstacle. A radius of zero tests the point itself.
    fn is_blocked(&self, position: Point3<f64>, test_radius: f64) -> bool;

    /// Whether a capsule of `radius` swept from `start` to `end` overlaps an
    /// obstacle.
    ///
    /// The default samples [`is_blocked`](Self::is_blocked) along the
    /// segment at a step of half the radius (at least `1e-3`), both endpoints
    /// included. The sample count grows with the segment length up to
    /// [`MAX_SEGMENT_SAMPLES`]. Past that cap the step widens, and an obstacle
    /// thinner than `length / MAX_SEGMENT_SAMPLES - 2 * radius` can fall
    /// between samples. Backends with an exact test should override it.
    fn is_segment_blocked(&self, start: Point3<f64>, end: Point3<f64>, radius: f64) -> bool {
        let length = (end - start).norm();
        let step = (radius * 0.5).max(MIN_SEGMENT_STEP);
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let samples = ((length / step).ceil() as usize).clamp(1, MAX_SEGMENT_SAMPLES);
        #[allow(clippy::cast_precision_loss)]
        (0..=samples).any(|i| {
            let t = i as f64 / samples as f64;
            self.is_blocked(start + (end - start) * t, radius)
        })
    }
}

impl<T: ObstacleQuery + ?Sized> ObstacleQuery for &T {
    fn is_blocked(&self, position: Point3<f64>, test_radius: f64) -> bool {
        (**self).is_blocked(position, test_radius)
    }

    fn is_segment_blocked(&self, start: Point3<f64>, end: Point3<f64>, radius: f64) -> bool {
        (**self).is_segment_blocked(start, end, radius)
    }
}

impl<T: ObstacleQuery + ?Sized> ObstacleQuery for Box<T> {
    fn is_blocked(&self, position: Point3<f64>, test_radius: f64) -> bool {
        (**self).is_blocked(position, test_radius)
    }

    fn is_segment_blocked(&self, start: Point3<f64>, end: Point3<f64>, radius: f64) -> bool {
        (**self).is_segment_blocked(start, end, radius)
    }
}

impl<T: ObstacleQuery + ?Sized> ObstacleQuery for Arc<T> {
    fn is_blocked(&self, position: Point3<f64>, test_radius: f64) -> bool {
        (**self).is_blocked(position, test_radius)
    }

    fn is_segment_blocked(&self, start: Point3<f64>, end: Point3<f64>, radius: f64) -> bool {
        (**self).is_segment_blocked(start, end, radius)
    }
}

/// Empty space: nothing is ever blocked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoObstacles;

impl ObstacleQuery for NoObstacles {
    fn is_blocked(&self, _position: Point3<f64>, _test_radius: f64) -> bool {
        false
    }

    fn is_segment_blocked(&self, _start: Point3<f64>, _end: Point3<f64>, _radius: f64) -> bool {
        false
    }
}

/// A set of solid spheres.
///
/// # Example
///
/// ```
/// use scaffold_types::{ObstacleQuery, SphereObstacles};
/// use nalgebra::Point3;
///
/// let obstacles = SphereObstacles::new().with_sphere(Point3::origin(), 2.0);
/// assert!(obstacles.is_blocked(Point3::new(2.5, 0.0, 0.0), 0.6));
/// assert!(!obstacles.is_blocked(Point3::new(2.5, 0.0, 0.0), 0.4));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SphereObstacles {
    spheres: Vec<(Point3<f64>, f64)>,
}

impl SphereObstacles {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            spheres: Vec::new(),
        }
    }

    /// Adds a sphere (builder form). Negative radii are clamped to zero.
    #[must_use]
    pub fn with_sphere(mut self, center: Point3<f64>, radius: f64) -> Self {
        self.spheres.push((center, radius.max(0.0)));
        self
    }

    /// Adds a sphere.
    ///
    /// # Errors
    ///
    /// Returns [`ObstacleError::InvalidRadius`] for a negative or non-finite
    /// radius.
    pub fn add_sphere(&mut self, center: Point3<f64>, radius: f64) -> Result<(), ObstacleError> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(ObstacleError::InvalidRadius(radius));
        }
        self.spheres.push((center, radius));
        Ok(())
    }

    /// Number of spheres.
    #[must_use]
    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    /// True when there are no spheres.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }

    /// Iterates over `(center, radius)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = &(Point3<f64>, f64)> {
        self.spheres.iter()
    }
}

impl ObstacleQuery for SphereObstacles {
    fn is_blocked(&self, position: Point3<f64>, test_radius: f64) -> bool {
        self.spheres.iter().any(|(center, r)| {
            let reach = r + test_radius.max(0.0);
            (position - center).norm_squared() <= reach * reach
        })
    }

    fn is_segment_blocked(&self, start: Point3<f64>, end: Point3<f64>, radius: f64) -> bool {
        self.spheres.iter().any(|(center, r)| {
            let reach = r + radius.max(0.0);
            point_segment_distance_squared(*center, start, end) <= reach * reach
        })
    }
}

/// A sparse set of solid cubic cells.
///
/// A cell `c` occupies `[origin + c·size, origin + (c+1)·size)` on each axis.
///
/// # Example
///
/// ```
/// use scaffold_types::{ObstacleQuery, VoxelCoord, VoxelObstacles};
/// use nalgebra::Point3;
///
/// let obstacles = VoxelObstacles::new(1.0)?.with_cell(VoxelCoord::new(2, 0, 0));
///
/// assert!(obstacles.is_blocked(Point3::new(2.5, 0.5, 0.5), 0.0));
/// assert!(obstacles.is_segment_blocked(
///     Point3::new(0.5, 0.5, 0.5),
///     Point3::new(5.5, 0.5, 0.5),
///     0.0,
/// ));
/// # Ok::<(), scaffold_types::ObstacleError>(())
/// ```
#[derive(Debug, Clone)]
pub struct VoxelObstacles {
    voxel_size: f64,
    origin: Point3<f64>,
    cells: HashSet<VoxelCoord>,
}

impl VoxelObstacles {
    /// Creates an empty occupancy set with the given cell size.
    ///
    /// # Errors
    ///
    /// Returns [`ObstacleError::InvalidVoxelSize`] when `voxel_size` is not
    /// positive and finite.
    pub fn new(voxel_size: f64) -> Result<Self, ObstacleError> {
        if !voxel_size.is_finite() || voxel_size <= 0.0 {
            return Err(ObstacleError::InvalidVoxelSize(voxel_size));
        }
        Ok(Self {
            voxel_size,
            origin: Point3::origin(),
            cells: HashSet::new(),
        })
    }

    /// Sets the world position of cell `(0, 0, 0)`'s minimum corner.
    #[must_use]
    pub const fn with_origin(mut self, origin: Point3<f64>) -> Self {
        self.origin = origin;
        self
    }

    /// Marks a cell solid (builder form).
    #[must_use]
    pub fn with_cell(mut self, cell: VoxelCoord) -> Self {
        self.cells.insert(cell);
        self
    }

    /// Marks a cell solid. Returns `false` if it already was.
    pub fn insert(&mut self, cell: VoxelCoord) -> bool {
        self.cells.insert(cell)
    }

    /// Marks every cell touched by the world-space box `[min, max]` solid.
    pub fn fill_box(&mut self, min: Point3<f64>, max: Point3<f64>) {
        let bounds = Aabb::new(min, max);
        let lo = VoxelCoord::containing(bounds.min, self.origin, self.voxel_size);
        let hi = VoxelCoord::containing(bounds.max, self.origin, self.voxel_size);
        for z in lo.z..=hi.z {
            for y in lo.y..=hi.y {
                for x in lo.x..=hi.x {
                    self.cells.insert(VoxelCoord::new(x, y, z));
                }
            }
        }
    }

    /// Whether `cell` is solid.
    #[must_use]
    pub fn contains(&self, cell: VoxelCoord) -> bool {
        self.cells.contains(&cell)
    }

    /// Number of solid cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when no cell is solid.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell edge length.
    #[must_use]
    pub const fn voxel_size(&self) -> f64 {
        self.voxel_size
    }

    fn cell_box(&self, cell: VoxelCoord) -> Aabb {
        let min = cell.to_world(self.origin, self.voxel_size);
        Aabb::new(min, min + Vector3::repeat(self.voxel_size))
    }
}

impl ObstacleQuery for VoxelObstacles {
    fn is_blocked(&self, position: Point3<f64>, test_radius: f64) -> bool {
        let home = VoxelCoord::containing(position, self.origin, self.voxel_size);
        if test_radius <= 0.0 {
            return self.contains(home);
        }

        #[allow(clippy::cast_possible_truncation)]
        let reach = (test_radius / self.voxel_size).ceil() as i32;
        for dz in -reach..=reach {
            for dy in -reach..=reach {
                for dx in -reach..=reach {
                    let cell = home + VoxelCoord::new(dx, dy, dz);
                    if self.contains(cell)
                        && self.cell_box(cell).distance_to_point(&position) <= test_radius
                    {
                        return true;
                    }
                }
            }
        }
        false
    }

    fn is_segment_blocked(&self, start: Point3<f64>, end: Point3<f64>, radius: f64) -> bool {
        if self.cells.is_empty() {
            return false;
        }
        if radius <= 0.0 {
            return SegmentTraversal::new(start, end, self.voxel_size, self.origin)
                .any(|(cell, _)| self.contains(cell));
        }

        let length = (end - start).norm();
        let step = self.voxel_size * 0.5;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let samples = ((length / step).ceil() as usize).max(1);
        #[allow(clippy::cast_precision_loss)]
        (0..=samples).any(|i| {
            let t = i as f64 / samples as f64;
            self.is_blocked(start + (end - start) * t, radius)
        })
    }
}

/// Adapts a closure `(position, test_radius) -> bool` into an obstacle
/// query. Segment tests use the sampled default.
///
/// # Example
///
/// ```
/// use scaffold_types::{FnObstacles, ObstacleQuery};
/// use nalgebra::Point3;
///
/// // Everything below the floor plane z = 0 is solid.
/// let floor = FnObstacles::new(|p: Point3<f64>, r: f64| p.z - r < 0.0);
/// assert!(floor.is_blocked(Point3::new(0.0, 0.0, 0.5), 1.0));
/// assert!(!floor.is_blocked(Point3::new(0.0, 0.0, 2.0), 1.0));
/// ```
#[derive(Clone, Copy)]
pub struct FnObstacles<F> {
    test: F,
}

impl<F> FnObstacles<F>
where
    F: Fn(Point3<f64>, f64) -> bool,
{
    /// Wraps `test`.
    pub const fn new(test: F) -> Self {
        Self { test }
    }
}

impl<F> std::fmt::Debug for FnObstacles<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnObstacles").finish_non_exhaustive()
    }
}

impl<F> ObstacleQuery for FnObstacles<F>
where
    F: Fn(Point3<f64>, f64) -> bool,
{
    fn is_blocked(&self, position: Point3<f64>, test_radius: f64) -> bool {
        (self.test)(position, test_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_obstacles_never_blocks() {
        let obs = NoObstacles;
        assert!(!obs.is_blocked(Point3::origin(), 100.0));
        assert!(!obs.is_segment_blocked(Point3::origin(), Point3::new(1e6, 0.0, 0.0), 5.0));
    }

    #[test]
    fn sphere_point_test_includes_radius() {
        let obs = SphereObstacles::new().with_sphere(Point3::new(0.0, 0.0, 0.0), 1.0);
        assert!(obs.is_blocked(Point3::new(1.0, 0.0, 0.0), 0.0));
        assert!(!obs.is_blocked(Point3::new(1.5, 0.0, 0.0), 0.4));
        assert!(obs.is_blocked(Point3::new(1.5, 0.0, 0.0), 0.5));
    }

    #[test]
    fn sphere_segment_passes_beside() {
        let obs = SphereObstacles::new().with_sphere(Point3::new(5.0, 2.0, 0.0), 1.0);
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(10.0, 0.0, 0.0);
        assert!(!obs.is_segment_blocked(a, b, 0.5));
        assert!(obs.is_segment_blocked(a, b, 1.0));
    }

    #[test]
    fn add_sphere_rejects_negative_radius() {
        let mut obs = SphereObstacles::new();
        assert!(matches!(
            obs.add_sphere(Point3::origin(), -1.0),
            Err(ObstacleError::InvalidRadius(_))
        ));
        assert!(obs.add_sphere(Point3::origin(), 0.0).is_ok());
        assert_eq!(obs.len(), 1);
    }

    #[test]
    fn voxel_rejects_bad_size() {
        assert!(VoxelObstacles::new(0.0).is_err());
        assert!(VoxelObstacles::new(f64::NAN).is_err());
    }

    #[test]
    fn voxel_inflated_point_test() {
        let obs = VoxelObstacles::new(1.0).unwrap().with_cell(VoxelCoord::new(0, 0, 0));
        // 0.5 from the +x face
        let p = Point3::new(1.5, 0.5, 0.5);
        assert!(!obs.is_blocked(p, 0.0));
        assert!(!obs.is_blocked(p, 0.4));
        assert!(obs.is_blocked(p, 0.5));
    }

    #[test]
    fn voxel_segment_zero_radius_uses_traversal() {
        let obs = VoxelObstacles::new(1.0).unwrap().with_cell(VoxelCoord::new(3, 2, 0));
        let a = Point3::new(0.5, 0.5, 0.5);
        assert!(!obs.is_segment_blocked(a, Point3::new(6.5, 0.5, 0.5), 0.0));
        assert!(obs.is_segment_blocked(a, Point3::new(6.5, 4.5, 0.5), 0.0));
    }

    #[test]
    fn voxel_segment_with_radius() {
        let obs = VoxelObstacles::new(1.0).unwrap().with_cell(VoxelCoord::new(3, 2, 0));
        let a = Point3::new(0.5, 0.5, 0.5);
        let b = Point3::new(6.5, 0.5, 0.5);
        // The cell's lower face is 1.5 above the segment.
        assert!(!obs.is_segment_blocked(a, b, 1.0));
        assert!(obs.is_segment_blocked(a, b, 1.6));
    }

    #[test]
    fn voxel_fill_box() {
        let mut obs = VoxelObstacles::new(0.5).unwrap();
        obs.fill_box(Point3::new(0.0, 0.0, 0.0), Point3::new(0.9, 0.4, 0.4));
        assert_eq!(obs.len(), 2);
        assert!(obs.contains(VoxelCoord::new(1, 0, 0)));
    }

    #[test]
    fn fn_obstacles_default_segment_sampling() {
        let wall = FnObstacles::new(|p: Point3<f64>, r: f64| (p.x - 5.0).abs() <= r + 0.05);
        assert!(wall.is_segment_blocked(Point3::origin(), Point3::new(10.0, 0.0, 0.0), 0.0));
        assert!(!wall.is_segment_blocked(Point3::origin(), Point3::new(4.0, 0.0, 0.0), 0.0));
    }

    #[test]
    fn default_segment_sampling_scales_with_length() {
        // A 1 cm sheet far along a 100 m segment, narrower than 100 / 256.
        let sheet = FnObstacles::new(|p: Point3<f64>, r: f64| {
            p.x + r >= 37.30 && p.x - r <= 37.31
        });
        let start = Point3::origin();
        let end = Point3::new(100.0, 0.0, 0.0);
        assert!(sheet.is_segment_blocked(start, end, 0.05));
        assert!(sheet.is_segment_blocked(end, start, 0.05));
        assert!(!sheet.is_segment_blocked(start, Point3::new(37.0, 0.0, 0.0), 0.05));
    }

    #[test]
    fn trait_objects_and_references() {
        let spheres = SphereObstacles::new().with_sphere(Point3::origin(), 1.0);
        let boxed: Box<dyn ObstacleQuery> = Box::new(spheres.clone());
        let shared: Arc<dyn ObstacleQuery + Send + Sync> = Arc::new(spheres.clone());
        assert!(boxed.is_blocked(Point3::origin(), 0.0));
        assert!(shared.is_blocked(Point3::origin(), 0.0));
        assert!((&spheres).is_blocked(Point3::origin(), 0.0));
    }
}
