//! Porosity filters.
//!
//! A porosity filter withholds node emission at some free cells without
//! stopping the flood fill, so the lattice thins out but stays reachable
//! from the origin through withheld cells.

use crate::LatticeError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scaffold_types::VoxelCoord;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How free cells are thinned out.
///
/// # Examples
///
/// ```
/// use scaffold_lattice::Porosity;
///
/// let uniform = Porosity::Uniform(0.2);
/// assert!((uniform.probability_at(3, 10) - 0.2).abs() < 1e-12);
///
/// // Denser at the core, sparser at the rim.
/// let graded = Porosity::RadialGradient { inner: 0.0, outer: 0.5 };
/// assert!((graded.probability_at(5, 10) - 0.25).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Porosity {
    /// Every free cell emits a node.
    #[default]
    None,

    /// Each free cell is withheld with the same probability.
    Uniform(f64),

    /// Withhold probability varies linearly with Chebyshev distance from
    /// `inner` at the origin to `outer` at the search radius.
    RadialGradient {
        /// Probability at the origin cell's ring.
        inner: f64,
        /// Probability at the outermost ring.
        outer: f64,
    },
}

impl Porosity {
    /// Withhold probability for a cell at Chebyshev `distance` from the
    /// origin, with search radius `max_radius`.
    #[must_use]
    pub fn probability_at(&self, distance: u32, max_radius: u32) -> f64 {
        match *self {
            Self::None => 0.0,
            Self::Uniform(p) => p,
            Self::RadialGradient { inner, outer } => {
                if max_radius == 0 {
                    return inner;
                }
                let t = (f64::from(distance) / f64::from(max_radius)).min(1.0);
                (outer - inner).mul_add(t, inner)
            }
        }
    }

    /// Checks that every probability lies in `[0, 1)`.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::InvalidPorosity`] with the first offending
    /// probability.
    pub fn validate(&self) -> Result<(), LatticeError> {
        let check = |p: f64| {
            if (0.0..1.0).contains(&p) {
                Ok(())
            } else {
                Err(LatticeError::InvalidPorosity(p))
            }
        };
        match *self {
            Self::None => Ok(()),
            Self::Uniform(p) => check(p),
            Self::RadialGradient { inner, outer } => {
                check(inner)?;
                check(outer)
            }
        }
    }

    /// True when no cell can ever be withheld.
    #[must_use]
    pub fn is_solid(&self) -> bool {
        match *self {
            Self::None => true,
            Self::Uniform(p) => p <= 0.0,
            Self::RadialGradient { inner, outer } => inner <= 0.0 && outer <= 0.0,
        }
    }
}

/// Seeded sampler for a [`Porosity`], consulted once per free cell in
/// flood-fill order so the outcome depends only on the seed.
#[derive(Debug, Clone)]
pub(crate) struct PorosityFilter {
    porosity: Porosity,
    max_radius: u32,
    rng: StdRng,
}

impl PorosityFilter {
    pub(crate) fn new(porosity: Porosity, max_radius: u32, seed: u64) -> Self {
        Self {
            porosity,
            max_radius,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Whether emission at `cell` is withheld. The origin cell never is.
    pub(crate) fn withholds(&mut self, cell: VoxelCoord) -> bool {
        if cell == VoxelCoord::origin() || self.porosity.is_solid() {
            return false;
        }
        let distance = cell.chebyshev_distance(VoxelCoord::origin());
        let p = self.porosity.probability_at(distance, self.max_radius);
        p > 0.0 && self.rng.gen_bool(p.min(1.0))
    }
}
