//! Strut network to surface mesh.

use nalgebra::Point3;
use scaffold_types::{Aabb, Strut, SurfaceMesh};
use tracing::{debug, info, warn};

use crate::error::SurfaceResultOf;
use crate::extract::IsosurfaceExtractor;
use crate::field::DensityField;
use crate::marching_cubes::MarchingCubes;
use crate::params::SurfaceParams;

/// Statistics from [`build_surface`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SurfaceStats {
    /// Struts sampled into the field.
    pub struts: usize,
    /// Samples in the density field.
    pub voxels: usize,
    /// Samples with positive density after smoothing.
    pub solid_voxels: usize,
    /// Whether the blur ran.
    pub blurred: bool,
    /// Whether the struts reach past the sampled grid, cutting the surface
    /// open at the grid boundary.
    pub clipped: bool,
    /// Vertices in the extracted mesh.
    pub vertices: usize,
    /// Triangles in the extracted mesh.
    pub triangles: usize,
}

/// Output of [`build_surface`].
#[derive(Debug, Clone, Default)]
pub struct SurfaceResult {
    /// Extracted surface in world coordinates.
    pub mesh: SurfaceMesh,
    /// The (smoothed) density field the mesh was extracted from.
    pub field: DensityField,
    /// Statistics.
    pub stats: SurfaceStats,
}

impl SurfaceResult {
    /// True when no triangle was produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mesh.is_empty()
    }
}

/// Converts a strut network into a blended solid surface.
///
/// 1. Samples `-smooth_min` of the capsule distances of all struts over the
///    grid described by `params` (centered on the struts' bounding box
///    unless `params.center` is set).
/// 2. Optionally blurs the field along X, Y, then Z.
/// 3. Hands the flattened field to `extractor` and moves the mesh from grid
///    to world coordinates.
///
/// An empty strut list is not an error: it logs a warning and returns an
/// empty mesh without calling the extractor. Struts reaching past the grid
/// are logged and flagged in [`SurfaceStats::clipped`].
///
/// # Errors
///
/// Returns [`SurfaceError`](crate::SurfaceError) if `params` do not
/// validate or the extractor fails.
///
/// # Example
///
/// ```
/// use scaffold_surface::{build_surface, MarchingCubes, SurfaceParams};
/// use scaffold_types::Strut;
/// use nalgebra::Point3;
///
/// let struts = vec![Strut::new(
///     Point3::new(-1.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     0.5,
/// )];
/// let params = SurfaceParams::new().with_spacing(0.2).with_half_extent(12);
///
/// let result = build_surface(&struts, &params, &MarchingCubes::new())?;
/// assert!(result.mesh.signed_volume() > 0.0);
/// # Ok::<(), scaffold_surface::SurfaceError>(())
/// ```
pub fn build_surface<E>(
    struts: &[Strut],
    params: &SurfaceParams,
    extractor: &E,
) -> SurfaceResultOf<SurfaceResult>
where
    E: IsosurfaceExtractor + ?Sized,
{
    params.validate()?;

    if struts.is_empty() {
        warn!("No struts to build a surface from; returning an empty mesh");
        return Ok(SurfaceResult::default());
    }

    let network = network_bounds(struts);
    let fallback_center = network.map_or_else(Point3::origin, |b| b.center());
    let spec = params.grid_spec(fallback_center);

    let grid = spec.bounds();
    let clipped = network.filter(|b| !grid.contains(&b.min) || !grid.contains(&b.max));
    if let Some(b) = clipped {
        warn!(
            network_min = ?b.min,
            network_max = ?b.max,
            grid_min = ?grid.min,
            grid_max = ?grid.max,
            "Struts extend past the sampling grid; the surface will be clipped"
        );
    }

    info!(
        struts = struts.len(),
        voxels = spec.sample_count(),
        spacing = spec.spacing,
        blend_radius = params.blend_radius,
        "Building density field"
    );

    let mut field = DensityField::sample(&spec, struts, params.blend_radius, params.parallel);
    if params.blur {
        field.blur(params.parallel);
        debug!("Density field blurred");
    }

    let solid_voxels = field.solid_count();
    if solid_voxels == 0 {
        warn!(
            center = ?spec.center,
            "Density field has no solid samples; the grid may not cover the struts"
        );
    }

    let mut mesh = extractor.extract(field.values(), field.dims(), params.isovalue, field.spacing())?;
    mesh.translate(field.origin().coords);

    let stats = SurfaceStats {
        struts: struts.len(),
        voxels: field.len(),
        solid_voxels,
        blurred: params.blur,
        clipped: clipped.is_some(),
        vertices: mesh.vertex_count(),
        triangles: mesh.triangle_count(),
    };

    info!(
        vertices = stats.vertices,
        triangles = stats.triangles,
        "Surface extracted"
    );

    Ok(SurfaceResult { mesh, field, stats })
}

/// Surface builder bundling parameters with an extractor.
///
/// Defaults to the CPU [`MarchingCubes`] extractor.
///
/// # Example
///
/// ```
/// use scaffold_surface::{MarchingCubes, SurfaceParams, VolumetricSurfaceBuilder};
///
/// let builder = VolumetricSurfaceBuilder::new(SurfaceParams::preview())
///     .with_extractor(MarchingCubes::new().with_max_triangles(1_000_000));
///
/// let result = builder.build(&[])?;
/// assert!(result.is_empty());
/// # Ok::<(), scaffold_surface::SurfaceError>(())
/// ```
#[derive(Debug, Clone)]
pub struct VolumetricSurfaceBuilder<E = MarchingCubes> {
    params: SurfaceParams,
    extractor: E,
}

impl VolumetricSurfaceBuilder<MarchingCubes> {
    /// Creates a builder using [`MarchingCubes`].
    #[must_use]
    pub fn new(params: SurfaceParams) -> Self {
        Self {
            params,
            extractor: MarchingCubes::new(),
        }
    }
}

impl<E: IsosurfaceExtractor> VolumetricSurfaceBuilder<E> {
    /// Replaces the extractor.
    #[must_use]
    pub fn with_extractor<F: IsosurfaceExtractor>(self, extractor: F) -> VolumetricSurfaceBuilder<F> {
        VolumetricSurfaceBuilder {
            params: self.params,
            extractor,
        }
    }

    /// The parameters.
    #[must_use]
    pub const fn params(&self) -> &SurfaceParams {
        &self.params
    }

    /// The extractor.
    #[must_use]
    pub const fn extractor(&self) -> &E {
        &self.extractor
    }

    /// Builds the surface of `struts`. See [`build_surface`].
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`](crate::SurfaceError) if the parameters do
    /// not validate or extraction fails.
    pub fn build(&self, struts: &[Strut]) -> SurfaceResultOf<SurfaceResult> {
        build_surface(struts, &self.params, &self.extractor)
    }
}

fn network_bounds(struts: &[Strut]) -> Option<Aabb> {
    struts
        .iter()
        .map(Strut::bounds)
        .reduce(|acc, b| acc.union(&b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExtractionError, SurfaceError};
    use std::cell::Cell;

    struct CountingExtractor {
        calls: Cell<usize>,
    }

    impl IsosurfaceExtractor for CountingExtractor {
        fn extract(
            &self,
            _field: &[f64],
            _dims: [usize; 3],
            _isovalue: f64,
            _spacing: f64,
        ) -> Result<SurfaceMesh, ExtractionError> {
            self.calls.set(self.calls.get() + 1);
            Ok(SurfaceMesh::new())
        }
    }

    struct FailingExtractor;

    impl IsosurfaceExtractor for FailingExtractor {
        fn extract(
            &self,
            _field: &[f64],
            _dims: [usize; 3],
            _isovalue: f64,
            _spacing: f64,
        ) -> Result<SurfaceMesh, ExtractionError> {
            Err(ExtractionError::TriangleBudgetExceeded { limit: 0 })
        }
    }

    fn strut() -> Strut {
        Strut::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0), 0.4)
    }

    #[test]
    fn empty_input_skips_extraction() {
        let extractor = CountingExtractor {
            calls: Cell::new(0),
        };
        let result = build_surface(&[], &SurfaceParams::preview(), &extractor).unwrap();
        assert!(result.is_empty());
        assert!(result.field.is_empty());
        assert_eq!(extractor.calls.get(), 0);
    }

    #[test]
    fn extractor_is_called_once() {
        let extractor = CountingExtractor {
            calls: Cell::new(0),
        };
        let params = SurfaceParams::preview().with_half_extent(4);
        let result = build_surface(&[strut()], &params, &extractor).unwrap();
        assert_eq!(extractor.calls.get(), 1);
        assert_eq!(result.stats.voxels, 9 * 9 * 9);
    }

    #[test]
    fn extraction_failure_propagates() {
        let params = SurfaceParams::preview().with_half_extent(4);
        let result = build_surface(&[strut()], &params, &FailingExtractor);
        assert!(matches!(
            result,
            Err(SurfaceError::Extraction(
                ExtractionError::TriangleBudgetExceeded { .. }
            ))
        ));
    }

    #[test]
    fn invalid_params_fail_before_sampling() {
        let params = SurfaceParams::new().with_blend_radius(0.1);
        let result = build_surface(&[strut()], &params, &MarchingCubes::new());
        assert!(matches!(
            result,
            Err(SurfaceError::InvalidBlendRadius { .. })
        ));
    }

    #[test]
    fn grid_is_centered_on_struts() {
        let params = SurfaceParams::new().with_spacing(0.25).with_half_extent(8);
        let result = build_surface(&[strut()], &params, &MarchingCubes::new()).unwrap();
        let bounds = result.mesh.bounds().unwrap();
        assert!((bounds.center().x - 1.0).abs() < 0.05);
        assert!(bounds.center().y.abs() < 0.05);
        assert!(result.stats.blurred);
        assert!(!result.stats.clipped);
        assert!(result.stats.solid_voxels > 0);
    }

    #[test]
    fn struts_past_the_grid_are_flagged_as_clipped() {
        let extractor = CountingExtractor {
            calls: Cell::new(0),
        };
        let long = Strut::new(Point3::new(-3.0, 0.0, 0.0), Point3::new(3.0, 0.0, 0.0), 0.4);
        let params = SurfaceParams::preview().with_half_extent(4);
        let result = build_surface(&[long], &params, &extractor).unwrap();
        assert!(result.stats.clipped);
        assert_eq!(extractor.calls.get(), 1);

        let covering = params.with_half_extent(8);
        let result = build_surface(&[long], &covering, &extractor).unwrap();
        assert!(!result.stats.clipped);
    }
}
