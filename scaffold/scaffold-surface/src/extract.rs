//! Isosurface extraction service.

use scaffold_types::SurfaceMesh;

use crate::error::{ExtractionError, ExtractionResult};

/// Turns a flattened scalar grid into a triangle mesh.
///
/// `field` is laid out `x + dims[0] * (y + dims[1] * z)`. Implementations
/// return vertices in grid-local coordinates, sample `(x, y, z)` sitting at
/// `(x, y, z) * spacing`, with triangles wound so their normals point from
/// values above `isovalue` toward values below it.
///
/// A field that never exceeds `isovalue` must produce an empty mesh.
pub trait IsosurfaceExtractor {
    /// Extracts the `isovalue` level set of `field`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError`] for malformed input or when the
    /// implementation runs out of resources.
    fn extract(
        &self,
        field: &[f64],
        dims: [usize; 3],
        isovalue: f64,
        spacing: f64,
    ) -> ExtractionResult<SurfaceMesh>;
}

impl<T: IsosurfaceExtractor + ?Sized> IsosurfaceExtractor for &T {
    fn extract(
        &self,
        field: &[f64],
        dims: [usize; 3],
        isovalue: f64,
        spacing: f64,
    ) -> ExtractionResult<SurfaceMesh> {
        (**self).extract(field, dims, isovalue, spacing)
    }
}

impl<T: IsosurfaceExtractor + ?Sized> IsosurfaceExtractor for Box<T> {
    fn extract(
        &self,
        field: &[f64],
        dims: [usize; 3],
        isovalue: f64,
        spacing: f64,
    ) -> ExtractionResult<SurfaceMesh> {
        (**self).extract(field, dims, isovalue, spacing)
    }
}

impl<T: IsosurfaceExtractor + ?Sized> IsosurfaceExtractor for std::sync::Arc<T> {
    fn extract(
        &self,
        field: &[f64],
        dims: [usize; 3],
        isovalue: f64,
        spacing: f64,
    ) -> ExtractionResult<SurfaceMesh> {
        (**self).extract(field, dims, isovalue, spacing)
    }
}

/// Checks the common extractor preconditions.
///
/// # Errors
///
/// - [`ExtractionError::InvalidSpacing`] if `spacing` is not positive and
///   finite.
/// - [`ExtractionError::GridTooSmall`] if any axis has fewer than two
///   samples.
/// - [`ExtractionError::DimensionMismatch`] if `field.len()` differs from
///   the product of `dims`.
pub fn validate_grid(field: &[f64], dims: [usize; 3], spacing: f64) -> ExtractionResult<()> {
    if !spacing.is_finite() || spacing <= 0.0 {
        return Err(ExtractionError::InvalidSpacing(spacing));
    }
    if dims.iter().any(|&n| n < 2) {
        return Err(ExtractionError::GridTooSmall(dims));
    }
    let expected = dims
        .iter()
        .try_fold(1usize, |acc, &n| acc.checked_mul(n))
        .unwrap_or(usize::MAX);
    if field.len() != expected {
        return Err(ExtractionError::DimensionMismatch {
            dims,
            expected,
            actual: field.len(),
        });
    }
    Ok(())
}
