//! Signed distance primitives.
//!
//! Distances are negative inside the primitive and positive outside.

use nalgebra::Point3;
use scaffold_types::Strut;

/// Signed distance from `p` to a sphere of radius `r` centered at `center`.
#[must_use]
#[inline]
pub fn sphere_sdf(p: Point3<f64>, center: Point3<f64>, r: f64) -> f64 {
    (p - center).norm() - r
}

/// Signed distance from `p` to the capsule swept by a sphere of radius `r`
/// along the segment `a`–`b`.
///
/// A segment shorter than `sqrt(f64::EPSILON)` is treated as the sphere at
/// `a`.
///
/// # Example
///
/// ```
/// use scaffold_surface::capsule_sdf;
/// use nalgebra::Point3;
///
/// let a = Point3::new(0.0, 0.0, 0.0);
/// let b = Point3::new(10.0, 0.0, 0.0);
///
/// assert!((capsule_sdf(Point3::new(5.0, 0.0, 0.0), a, b, 1.0) + 1.0).abs() < 1e-12);
/// assert!((capsule_sdf(Point3::new(5.0, 2.0, 0.0), a, b, 1.0) - 1.0).abs() < 1e-12);
/// ```
#[must_use]
#[inline]
pub fn capsule_sdf(p: Point3<f64>, a: Point3<f64>, b: Point3<f64>, r: f64) -> f64 {
    let ab = b - a;
    let len_sq = ab.dot(&ab);
    if len_sq < f64::EPSILON {
        return sphere_sdf(p, a, r);
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm() - r
}

/// Signed distance from `p` to a strut.
#[must_use]
#[inline]
pub fn strut_sdf(p: Point3<f64>, strut: &Strut) -> f64 {
    capsule_sdf(p, strut.start, strut.end, strut.radius)
}

/// Polynomial smooth minimum with blend radius `k`.
///
/// Equals `min(d1, d2)` when the two distances differ by at least `k`, and
/// undercuts it by up to `k / 4` where they meet, which fillets the joint.
#[must_use]
#[inline]
pub fn smooth_min(d1: f64, d2: f64, k: f64) -> f64 {
    let h = (0.5 + 0.5 * (d2 - d1) / k).clamp(0.0, 1.0);
    (d1 - d2).mul_add(h, d2) - k * h * (1.0 - h)
}

/// Blended signed distance from `p` to a strut network.
///
/// Folds [`smooth_min`] over the struts in order, seeded with the first
/// strut's distance. Returns `f64::INFINITY` for an empty slice.
#[must_use]
pub fn network_sdf(p: Point3<f64>, struts: &[Strut], k: f64) -> f64 {
    let mut iter = struts.iter();
    let Some(first) = iter.next() else {
        return f64::INFINITY;
    };
    iter.fold(strut_sdf(p, first), |acc, strut| {
        smooth_min(acc, strut_sdf(p, strut), k)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn capsule_on_axis_and_surface() {
        let a = Point3::new(-2.0, 1.0, 0.0);
        let b = Point3::new(2.0, 1.0, 0.0);
        assert_relative_eq!(capsule_sdf(Point3::new(0.0, 1.0, 0.0), a, b, 0.5), -0.5);
        assert_relative_eq!(
            capsule_sdf(Point3::new(1.0, 1.5, 0.0), a, b, 0.5),
            0.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn capsule_caps_are_round() {
        let a = Point3::origin();
        let b = Point3::new(1.0, 0.0, 0.0);
        // Beyond the end the distance is measured to the endpoint.
        assert_relative_eq!(capsule_sdf(Point3::new(4.0, 0.0, 0.0), a, b, 1.0), 2.0);
        assert_relative_eq!(capsule_sdf(Point3::new(-1.0, 1.0, 0.0), a, b, 0.0), 2f64.sqrt());
    }

    #[test]
    fn zero_length_capsule_is_a_sphere() {
        let c = Point3::new(1.0, 2.0, 3.0);
        let p = Point3::new(4.0, 6.0, 3.0);
        assert_relative_eq!(capsule_sdf(p, c, c, 1.0), sphere_sdf(p, c, 1.0));
        assert_relative_eq!(capsule_sdf(p, c, c, 1.0), 4.0);
    }

    #[test]
    fn smooth_min_far_apart_is_min() {
        assert_relative_eq!(smooth_min(1.0, 5.0, 0.5), 1.0);
        assert_relative_eq!(smooth_min(5.0, 1.0, 0.5), 1.0);
    }

    #[test]
    fn smooth_min_equal_inputs() {
        assert_relative_eq!(smooth_min(2.0, 2.0, 0.4), 2.0 - 0.1, epsilon = 1e-12);
    }

    #[test]
    fn network_of_one_is_that_strut() {
        let strut = Strut::new(Point3::origin(), Point3::new(0.0, 0.0, 3.0), 0.5);
        let p = Point3::new(1.0, 0.0, 1.0);
        assert_relative_eq!(network_sdf(p, &[strut], 0.5), strut_sdf(p, &strut));
        assert!(network_sdf(p, &[], 0.5).is_infinite());
    }
}
