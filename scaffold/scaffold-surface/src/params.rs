//! Surface generation parameters.

use nalgebra::Point3;

use crate::error::SurfaceError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Smallest supported blend radius.
pub const MIN_BLEND_RADIUS: f64 = 0.3;

/// Largest supported blend radius.
pub const MAX_BLEND_RADIUS: f64 = 0.8;

/// Largest supported grid half extent (513 samples per axis).
pub const MAX_HALF_EXTENT: usize = 256;

/// Configuration for [`build_surface`](crate::build_surface).
///
/// # Presets
///
/// - [`SurfaceParams::preview()`]: coarse grid for quick iteration
/// - [`SurfaceParams::default()`]: balanced
/// - [`SurfaceParams::high_quality()`]: fine grid, slow
///
/// # Examples
///
/// ```
/// use scaffold_surface::SurfaceParams;
/// use nalgebra::Point3;
///
/// let params = SurfaceParams::preview()
///     .with_blend_radius(0.6)
///     .with_center(Point3::new(0.0, 0.0, 2.0));
///
/// assert!(params.validate().is_ok());
/// assert_eq!(params.grid_spec(Point3::origin()).center, Point3::new(0.0, 0.0, 2.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SurfaceParams {
    /// Distance between density samples.
    pub spacing: f64,

    /// Samples on each side of the grid center along every axis.
    pub half_extent: usize,

    /// Smooth minimum blend radius, in `[0.3, 0.8]`.
    pub blend_radius: f64,

    /// Grid center. `None` centers the grid on the struts' bounding box.
    pub center: Option<Point3<f64>>,

    /// Apply the separable Gaussian blur before extraction.
    pub blur: bool,

    /// Density level extracted as the surface.
    pub isovalue: f64,

    /// Fill and blur the field on the rayon pool.
    pub parallel: bool,
}

impl Default for SurfaceParams {
    fn default() -> Self {
        Self {
            spacing: 0.25,
            half_extent: 32,
            blend_radius: 0.5,
            center: None,
            blur: true,
            isovalue: 0.0,
            parallel: true,
        }
    }
}

impl SurfaceParams {
    /// Creates parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Coarse settings for fast previews.
    #[must_use]
    pub fn preview() -> Self {
        Self {
            spacing: 0.5,
            half_extent: 16,
            ..Self::default()
        }
    }

    /// Fine settings for final output.
    #[must_use]
    pub fn high_quality() -> Self {
        Self {
            spacing: 0.125,
            half_extent: 64,
            ..Self::default()
        }
    }

    /// Sets the sample spacing.
    #[must_use]
    pub const fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    /// Sets the grid half extent.
    #[must_use]
    pub const fn with_half_extent(mut self, half_extent: usize) -> Self {
        self.half_extent = half_extent;
        self
    }

    /// Sets the smooth minimum blend radius.
    #[must_use]
    pub const fn with_blend_radius(mut self, blend_radius: f64) -> Self {
        self.blend_radius = blend_radius;
        self
    }

    /// Fixes the grid center.
    #[must_use]
    pub const fn with_center(mut self, center: Point3<f64>) -> Self {
        self.center = Some(center);
        self
    }

    /// Enables or disables the blur.
    #[must_use]
    pub const fn with_blur(mut self, blur: bool) -> Self {
        self.blur = blur;
        self
    }

    /// Sets the extracted density level.
    #[must_use]
    pub const fn with_isovalue(mut self, isovalue: f64) -> Self {
        self.isovalue = isovalue;
        self
    }

    /// Enables or disables parallel field construction.
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Grid specification, centered on `self.center` or else on
    /// `fallback_center`.
    #[must_use]
    pub fn grid_spec(&self, fallback_center: Point3<f64>) -> crate::GridSpec {
        crate::GridSpec::new(
            self.center.unwrap_or(fallback_center),
            self.spacing,
            self.half_extent,
        )
    }

    /// Validates the parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the spacing is not positive and finite, the half
    /// extent is outside `1..=MAX_HALF_EXTENT`, the blend radius is outside
    /// `[MIN_BLEND_RADIUS, MAX_BLEND_RADIUS]`, or the isovalue is not
    /// finite.
    pub fn validate(&self) -> Result<(), SurfaceError> {
        if !self.spacing.is_finite() || self.spacing <= 0.0 {
            return Err(SurfaceError::InvalidSpacing(self.spacing));
        }
        if self.half_extent == 0 || self.half_extent > MAX_HALF_EXTENT {
            return Err(SurfaceError::InvalidGridSize {
                half_extent: self.half_extent,
                max: MAX_HALF_EXTENT,
            });
        }
        if !(MIN_BLEND_RADIUS..=MAX_BLEND_RADIUS).contains(&self.blend_radius) {
            return Err(SurfaceError::InvalidBlendRadius {
                value: self.blend_radius,
                min: MIN_BLEND_RADIUS,
                max: MAX_BLEND_RADIUS,
            });
        }
        if !self.isovalue.is_finite() {
            return Err(SurfaceError::InvalidIsovalue(self.isovalue));
        }
        Ok(())
    }
}
