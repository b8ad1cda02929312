//! Pipeline configuration.

use nalgebra::Point3;
use scaffold_graph::ConnectivityParams;
use scaffold_lattice::SynthesisParams;
use scaffold_surface::SurfaceParams;

use crate::ScaffoldResult;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters for every pipeline stage.
///
/// # Presets
///
/// - [`ScaffoldConfig::preview()`]: small lattice, coarse surface
/// - [`ScaffoldConfig::default()`]: balanced
/// - [`ScaffoldConfig::high_quality()`]: fine surface, slow
///
/// # Example
///
/// ```
/// use scaffold::ScaffoldConfig;
///
/// let config = ScaffoldConfig::preview().with_spacing(2.0);
///
/// assert_eq!(config.lattice.spacing, 2.0);
/// assert_eq!(config.connectivity.spacing, 2.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScaffoldConfig {
    /// Flood fill parameters.
    pub lattice: SynthesisParams,
    /// Connectivity repair parameters.
    pub connectivity: ConnectivityParams,
    /// Surface generation parameters.
    pub surface: SurfaceParams,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            lattice: SynthesisParams::new().with_max_radius(5),
            connectivity: ConnectivityParams::new(),
            surface: SurfaceParams::new().with_spacing(0.2).with_half_extent(32),
        }
    }
}

impl ScaffoldConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Small lattice and coarse surface for quick iteration.
    ///
    /// A 5×5×5 lattice sampled on a 13³ grid that still covers it with a
    /// blend radius of padding.
    #[must_use]
    pub fn preview() -> Self {
        Self {
            lattice: SynthesisParams::new().with_max_radius(2),
            connectivity: ConnectivityParams::new(),
            surface: SurfaceParams::preview().with_half_extent(6),
        }
    }

    /// Fine surface sampling for final output.
    #[must_use]
    pub fn high_quality() -> Self {
        Self {
            lattice: SynthesisParams::new().with_max_radius(5),
            connectivity: ConnectivityParams::new(),
            surface: SurfaceParams::high_quality().with_spacing(0.1).with_half_extent(64),
        }
    }

    /// Sets the lattice spacing for both the fill and the connectivity
    /// passes. The surface sample spacing scales by the same factor so the
    /// grid keeps covering the lattice.
    #[must_use]
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        let previous = self.lattice.spacing;
        if previous.is_finite() && previous > 0.0 {
            self.surface.spacing *= spacing / previous;
        }
        self.lattice.spacing = spacing;
        self.connectivity.spacing = spacing;
        self
    }

    /// Sets the world position the fill starts from.
    #[must_use]
    pub const fn with_origin(mut self, origin: Point3<f64>) -> Self {
        self.lattice.origin = origin;
        self
    }

    /// Replaces the flood fill parameters.
    #[must_use]
    pub fn with_lattice(mut self, lattice: SynthesisParams) -> Self {
        self.lattice = lattice;
        self
    }

    /// Replaces the connectivity parameters.
    #[must_use]
    pub fn with_connectivity(mut self, connectivity: ConnectivityParams) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Replaces the surface parameters.
    #[must_use]
    pub fn with_surface(mut self, surface: SurfaceParams) -> Self {
        self.surface = surface;
        self
    }

    /// Validates every stage's parameters.
    ///
    /// # Errors
    ///
    /// Returns the first stage error found, in pipeline order.
    pub fn validate(&self) -> ScaffoldResult<()> {
        self.lattice.validate()?;
        self.connectivity.validate()?;
        self.surface.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScaffoldError;
    use approx::assert_relative_eq;

    #[test]
    fn presets_are_valid() {
        for config in [
            ScaffoldConfig::preview(),
            ScaffoldConfig::default(),
            ScaffoldConfig::high_quality(),
        ] {
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn preview_grid_is_small_and_covers_the_lattice() {
        let config = ScaffoldConfig::preview();
        assert_eq!(config.lattice.max_cells(), 125);

        let spec = config.surface.grid_spec(config.lattice.origin);
        assert_eq!(spec.sample_count(), 13 * 13 * 13);

        #[allow(clippy::cast_precision_loss)]
        let grid_reach = spec.half_extent as f64 * spec.spacing;
        let lattice_reach = f64::from(config.lattice.max_radius) * config.lattice.spacing
            + config.connectivity.strut_radius();
        assert!(grid_reach >= lattice_reach + config.surface.blend_radius);
    }

    #[test]
    fn with_spacing_keeps_stages_consistent() {
        let config = ScaffoldConfig::default().with_spacing(0.5);
        assert_relative_eq!(config.lattice.spacing, 0.5);
        assert_relative_eq!(config.connectivity.spacing, 0.5);
        assert_relative_eq!(config.surface.spacing, 0.1);
    }

    #[test]
    fn invalid_stage_is_reported() {
        let mut config = ScaffoldConfig::preview();
        config.connectivity.bridge_count = 0;
        assert!(matches!(config.validate(), Err(ScaffoldError::Graph(_))));
    }
}
