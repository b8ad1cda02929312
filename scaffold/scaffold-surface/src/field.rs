//! Dense density grid sampled from a strut network.

use nalgebra::{Point3, Vector3};
use rayon::prelude::*;
use scaffold_types::{Aabb, Strut};

use crate::blur;
use crate::sdf::network_sdf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A cubic sampling lattice centered on a point.
///
/// The grid has `2 * half_extent + 1` samples per axis, spaced `spacing`
/// apart, so `center` is always a sample.
///
/// # Example
///
/// ```
/// use scaffold_surface::GridSpec;
/// use nalgebra::Point3;
///
/// let spec = GridSpec::new(Point3::new(1.0, 0.0, 0.0), 0.5, 4);
/// assert_eq!(spec.dims(), [9, 9, 9]);
/// assert_eq!(spec.origin(), Point3::new(-1.0, -2.0, -2.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridSpec {
    /// Center sample.
    pub center: Point3<f64>,
    /// Distance between adjacent samples.
    pub spacing: f64,
    /// Samples on each side of the center along every axis.
    pub half_extent: usize,
}

impl GridSpec {
    /// Creates a grid specification.
    #[must_use]
    pub const fn new(center: Point3<f64>, spacing: f64, half_extent: usize) -> Self {
        Self {
            center,
            spacing,
            half_extent,
        }
    }

    /// Samples per axis.
    #[must_use]
    pub const fn dims(&self) -> [usize; 3] {
        let n = 2 * self.half_extent + 1;
        [n, n, n]
    }

    /// Total number of samples.
    #[must_use]
    pub const fn sample_count(&self) -> usize {
        let n = 2 * self.half_extent + 1;
        n * n * n
    }

    /// World position of sample `(0, 0, 0)`.
    #[must_use]
    pub fn origin(&self) -> Point3<f64> {
        #[allow(clippy::cast_precision_loss)]
        let offset = self.half_extent as f64 * self.spacing;
        self.center - Vector3::repeat(offset)
    }

    /// World-space box spanned by the outermost samples.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        let origin = self.origin();
        Aabb::new(origin, self.center + (self.center - origin))
    }
}

/// A dense scalar grid of material density.
///
/// Values are stored with x varying fastest: the sample at `(x, y, z)` lives
/// at `x + nx * (y + ny * z)`. Density is positive inside material, so the
/// zero level set is the solid boundary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DensityField {
    values: Vec<f64>,
    dims: [usize; 3],
    origin: Point3<f64>,
    spacing: f64,
}

impl DensityField {
    /// Creates a zero-filled field over `spec`.
    #[must_use]
    pub fn new(spec: &GridSpec) -> Self {
        Self {
            values: vec![0.0; spec.sample_count()],
            dims: spec.dims(),
            origin: spec.origin(),
            spacing: spec.spacing,
        }
    }

    /// Samples the blended density of `struts` over `spec`.
    ///
    /// Each sample is `-network_sdf(p)` with blend radius `blend_radius`.
    /// With `parallel` the z-slices are filled on the rayon pool; the result
    /// is identical to the sequential loop since every sample is computed
    /// independently.
    #[must_use]
    pub fn sample(spec: &GridSpec, struts: &[Strut], blend_radius: f64, parallel: bool) -> Self {
        let mut field = Self::new(spec);
        let [nx, ny, _] = field.dims;
        let slice_len = nx * ny;
        let origin = field.origin;
        let h = field.spacing;

        let fill_slice = |(z, slice): (usize, &mut [f64])| {
            for y in 0..ny {
                for x in 0..nx {
                    let p = sample_position(origin, h, x, y, z);
                    slice[x + nx * y] = -network_sdf(p, struts, blend_radius);
                }
            }
        };

        if parallel {
            field
                .values
                .par_chunks_mut(slice_len)
                .enumerate()
                .for_each(fill_slice);
        } else {
            field
                .values
                .chunks_mut(slice_len)
                .enumerate()
                .for_each(fill_slice);
        }

        field
    }

    /// Samples per axis.
    #[must_use]
    pub const fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// World position of sample `(0, 0, 0)`.
    #[must_use]
    pub const fn origin(&self) -> Point3<f64> {
        self.origin
    }

    /// Distance between adjacent samples.
    #[must_use]
    pub const fn spacing(&self) -> f64 {
        self.spacing
    }

    /// The flattened samples.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Total number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the field holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Linear index of `(x, y, z)`, or `None` when out of bounds.
    #[must_use]
    pub fn index(&self, x: usize, y: usize, z: usize) -> Option<usize> {
        let [nx, ny, nz] = self.dims;
        (x < nx && y < ny && z < nz).then(|| x + nx * (y + ny * z))
    }

    /// Density at `(x, y, z)`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<f64> {
        self.index(x, y, z).map(|i| self.values[i])
    }

    /// World position of sample `(x, y, z)`.
    #[must_use]
    pub fn position(&self, x: usize, y: usize, z: usize) -> Point3<f64> {
        sample_position(self.origin, self.spacing, x, y, z)
    }

    /// Number of samples with positive density.
    #[must_use]
    pub fn solid_count(&self) -> usize {
        self.values.iter().filter(|&&v| v > 0.0).count()
    }

    /// Smallest and largest density, `None` for an empty field.
    #[must_use]
    pub fn range(&self) -> Option<(f64, f64)> {
        let first = *self.values.first()?;
        Some(
            self.values
                .iter()
                .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
        )
    }

    /// Applies the separable `[1, 4, 6, 4, 1] / 16` blur along X, then Y,
    /// then Z.
    pub fn blur(&mut self, parallel: bool) {
        blur::gaussian_blur(&mut self.values, self.dims, parallel);
    }
}

#[inline]
fn sample_position(origin: Point3<f64>, h: f64, x: usize, y: usize, z: usize) -> Point3<f64> {
    #[allow(clippy::cast_precision_loss)]
    let offset = Vector3::new(x as f64, y as f64, z as f64) * h;
    origin + offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bar() -> Vec<Strut> {
        vec![Strut::new(
            Point3::new(-2.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            0.75,
        )]
    }

    #[test]
    fn layout_is_x_fastest() {
        let spec = GridSpec::new(Point3::origin(), 1.0, 1);
        let field = DensityField::new(&spec);
        assert_eq!(field.index(1, 0, 0), Some(1));
        assert_eq!(field.index(0, 1, 0), Some(3));
        assert_eq!(field.index(0, 0, 1), Some(9));
        assert_eq!(field.index(3, 0, 0), None);
        assert_eq!(field.position(2, 2, 2), Point3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn density_is_negated_distance() {
        let spec = GridSpec::new(Point3::origin(), 0.5, 4);
        let field = DensityField::sample(&spec, &bar(), 0.5, false);
        // The center sample lies on the strut axis.
        assert_relative_eq!(field.get(4, 4, 4).unwrap(), 0.75);
        // (0, 2, 0) is 1.25 outside the surface.
        assert_relative_eq!(field.get(4, 8, 4).unwrap(), -1.25);
        assert!(field.solid_count() > 0);
    }

    #[test]
    fn parallel_matches_sequential() {
        let struts = vec![
            Strut::new(Point3::origin(), Point3::new(1.5, 0.0, 0.0), 0.4),
            Strut::new(Point3::origin(), Point3::new(0.0, 1.5, 0.5), 0.4),
            Strut::new(Point3::new(1.5, 0.0, 0.0), Point3::new(0.0, 1.5, 0.5), 0.3),
        ];
        let spec = GridSpec::new(Point3::new(0.5, 0.5, 0.0), 0.25, 6);
        let seq = DensityField::sample(&spec, &struts, 0.4, false);
        let par = DensityField::sample(&spec, &struts, 0.4, true);
        assert_eq!(seq, par);
    }

    #[test]
    fn range_of_empty_field() {
        assert!(DensityField::default().range().is_none());
        let spec = GridSpec::new(Point3::origin(), 0.5, 2);
        let field = DensityField::sample(&spec, &bar(), 0.5, true);
        let (lo, hi) = field.range().unwrap();
        assert!(lo < 0.0 && hi > 0.0);
    }
}
