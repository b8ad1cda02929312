//! Realized lattice edges.

use crate::Aabb;
use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A strut: the capsule swept by a sphere of `radius` along `start → end`.
///
/// A strut with `start == end` is a sphere; downstream distance code treats
/// it that way instead of failing.
///
/// # Example
///
/// ```
/// use scaffold_types::Strut;
/// use nalgebra::Point3;
///
/// let strut = Strut::new(Point3::origin(), Point3::new(0.0, 0.0, 4.0), 0.5);
/// assert!((strut.length() - 4.0).abs() < 1e-12);
/// assert!(!strut.is_degenerate());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Strut {
    /// First endpoint.
    pub start: Point3<f64>,
    /// Second endpoint.
    pub end: Point3<f64>,
    /// Capsule radius (> 0).
    pub radius: f64,
}

impl Strut {
    /// Creates a strut.
    #[must_use]
    pub const fn new(start: Point3<f64>, end: Point3<f64>, radius: f64) -> Self {
        Self { start, end, radius }
    }

    /// Axis length.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// True when both endpoints coincide (within `f64::EPSILON` squared length).
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        (self.end - self.start).norm_squared() < f64::EPSILON
    }

    /// The same strut with its endpoints exchanged.
    #[must_use]
    pub const fn reversed(&self) -> Self {
        Self::new(self.end, self.start, self.radius)
    }

    /// Midpoint of the axis.
    #[must_use]
    pub fn midpoint(&self) -> Point3<f64> {
        nalgebra::center(&self.start, &self.end)
    }

    /// Bounding box of the capsule, including the radius.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.start, self.end).expanded(self.radius)
    }
}

/// Squared distance from `point` to the segment `a → b`.
///
/// A zero-length segment degenerates to the distance to `a`.
#[must_use]
pub fn point_segment_distance_squared(point: Point3<f64>, a: Point3<f64>, b: Point3<f64>) -> f64 {
    let ab = b - a;
    let ap = point - a;

    let t = ap.dot(&ab) / ab.norm_squared().max(f64::EPSILON);
    let closest = a + ab * t.clamp(0.0, 1.0);
    (point - closest).norm_squared()
}
