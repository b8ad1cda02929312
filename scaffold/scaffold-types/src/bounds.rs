//! Axis-aligned bounding box.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box.
///
/// # Example
///
/// ```
/// use scaffold_types::Aabb;
/// use nalgebra::Point3;
///
/// let points = [Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 4.0, 6.0)];
/// let aabb = Aabb::from_points(points.iter()).unwrap();
/// assert_eq!(aabb.center(), Point3::new(1.0, 2.0, 3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point3<f64>,
    /// Maximum corner.
    pub max: Point3<f64>,
}

impl Aabb {
    /// Creates a box from two corners, ordering them per axis.
    #[must_use]
    pub fn new(a: Point3<f64>, b: Point3<f64>) -> Self {
        Self {
            min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Smallest box containing every point, or `None` for an empty iterator.
    pub fn from_points<'a>(mut points: impl Iterator<Item = &'a Point3<f64>>) -> Option<Self> {
        let first = *points.next()?;
        let mut aabb = Self::new(first, first);
        for p in points {
            aabb.expand_to_include(p);
        }
        Some(aabb)
    }

    /// Grows the box to contain `point`.
    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min = Point3::new(
            self.min.x.min(point.x),
            self.min.y.min(point.y),
            self.min.z.min(point.z),
        );
        self.max = Point3::new(
            self.max.x.max(point.x),
            self.max.y.max(point.y),
            self.max.z.max(point.z),
        );
    }

    /// Smallest box containing both boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut out = *self;
        out.expand_to_include(&other.min);
        out.expand_to_include(&other.max);
        out
    }

    /// The box grown by `margin` on every side.
    #[must_use]
    pub fn expanded(&self, margin: f64) -> Self {
        let m = Vector3::repeat(margin);
        Self {
            min: self.min - m,
            max: self.max + m,
        }
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Edge lengths.
    #[must_use]
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Whether `point` lies inside or on the box.
    #[must_use]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Euclidean distance from `point` to the box (0 inside).
    #[must_use]
    pub fn distance_to_point(&self, point: &Point3<f64>) -> f64 {
        let dx = (self.min.x - point.x).max(0.0).max(point.x - self.max.x);
        let dy = (self.min.y - point.y).max(0.0).max(point.y - self.max.y);
        let dz = (self.min.z - point.z).max(0.0).max(point.z - self.max.z);
        Vector3::new(dx, dy, dz).norm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn new_orders_corners() {
        let aabb = Aabb::new(Point3::new(1.0, 5.0, -1.0), Point3::new(0.0, 2.0, 3.0));
        assert_eq!(aabb.min, Point3::new(0.0, 2.0, -1.0));
        assert_eq!(aabb.max, Point3::new(1.0, 5.0, 3.0));
    }

    #[test]
    fn from_points_empty() {
        let points: Vec<Point3<f64>> = Vec::new();
        assert!(Aabb::from_points(points.iter()).is_none());
    }

    #[test]
    fn union_covers_both() {
        let a = Aabb::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0));
        let b = Aabb::new(Point3::new(2.0, -1.0, 0.0), Point3::new(3.0, 0.0, 0.5));
        let u = a.union(&b);
        assert_eq!(u.min, Point3::new(0.0, -1.0, 0.0));
        assert_eq!(u.max, Point3::new(3.0, 1.0, 1.0));
    }

    #[test]
    fn distance_to_point() {
        let aabb = Aabb::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(aabb.distance_to_point(&Point3::new(0.5, 0.5, 0.5)), 0.0);
        assert_relative_eq!(aabb.distance_to_point(&Point3::new(3.0, 0.5, 0.5)), 2.0);
        assert_relative_eq!(
            aabb.distance_to_point(&Point3::new(2.0, 2.0, 0.5)),
            2.0_f64.sqrt()
        );
    }

    #[test]
    fn contains_boundary() {
        let aabb = Aabb::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0));
        assert!(aabb.contains(&Point3::new(1.0, 0.0, 0.5)));
        assert!(!aabb.contains(&Point3::new(1.0001, 0.0, 0.5)));
    }
}
