//! Lattice synthesis parameters.

use crate::{LatticeError, Porosity};
use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest supported Chebyshev search radius, in cells.
///
/// The full search cube at this radius still fits in `u32` node ids.
pub const MAX_SEARCH_RADIUS: u32 = 812;

/// Configuration for [`synthesize_lattice`](crate::synthesize_lattice).
///
/// # Examples
///
/// ```
/// use scaffold_lattice::{Porosity, SynthesisParams};
///
/// let params = SynthesisParams::new()
///     .with_spacing(0.5)
///     .with_max_radius(12)
///     .with_porosity(Porosity::Uniform(0.1))
///     .with_seed(7);
///
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SynthesisParams {
    /// World position of lattice cell `(0, 0, 0)`, where the fill starts.
    pub origin: Point3<f64>,

    /// Distance between neighboring lattice nodes.
    pub spacing: f64,

    /// Chebyshev search radius in cells. Cells farther from the origin are
    /// never visited.
    pub max_radius: u32,

    /// Radius passed to the obstacle test for each cell position.
    pub test_radius: f64,

    /// When true, the fill only steps to a neighbor if the segment between
    /// the two cell positions is unobstructed.
    pub check_line_of_sight: bool,

    /// Optional emission filter.
    pub porosity: Porosity,

    /// Seed for the porosity sampler.
    pub seed: u64,
}

impl Default for SynthesisParams {
    fn default() -> Self {
        Self {
            origin: Point3::origin(),
            spacing: 1.0,
            max_radius: 10,
            test_radius: 0.25,
            check_line_of_sight: false,
            porosity: Porosity::None,
            seed: 0,
        }
    }
}

impl SynthesisParams {
    /// Creates parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fill origin.
    #[must_use]
    pub const fn with_origin(mut self, origin: Point3<f64>) -> Self {
        self.origin = origin;
        self
    }

    /// Sets the lattice spacing.
    #[must_use]
    pub const fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    /// Sets the Chebyshev search radius.
    #[must_use]
    pub const fn with_max_radius(mut self, max_radius: u32) -> Self {
        self.max_radius = max_radius;
        self
    }

    /// Sets the obstacle test radius.
    #[must_use]
    pub const fn with_test_radius(mut self, test_radius: f64) -> Self {
        self.test_radius = test_radius;
        self
    }

    /// Enables or disables the line-of-sight check between neighbors.
    #[must_use]
    pub const fn with_line_of_sight(mut self, enable: bool) -> Self {
        self.check_line_of_sight = enable;
        self
    }

    /// Sets the porosity filter.
    #[must_use]
    pub const fn with_porosity(mut self, porosity: Porosity) -> Self {
        self.porosity = porosity;
        self
    }

    /// Sets the porosity seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Upper bound on the number of cells the fill can visit, `(2R+1)^3`.
    #[must_use]
    pub fn max_cells(&self) -> u64 {
        let side = 2 * u64::from(self.max_radius) + 1;
        side * side * side
    }

    /// Validates the parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the spacing is not positive, the test radius is
    /// negative, the radius is above [`MAX_SEARCH_RADIUS`], or the porosity
    /// is out of range.
    pub fn validate(&self) -> Result<(), LatticeError> {
        if !self.spacing.is_finite() || self.spacing <= 0.0 {
            return Err(LatticeError::InvalidSpacing(self.spacing));
        }

        if !self.test_radius.is_finite() || self.test_radius < 0.0 {
            return Err(LatticeError::InvalidTestRadius(self.test_radius));
        }

        if self.max_radius > MAX_SEARCH_RADIUS {
            return Err(LatticeError::RadiusTooLarge {
                radius: self.max_radius,
                limit: MAX_SEARCH_RADIUS,
            });
        }

        self.porosity.validate()
    }
}
