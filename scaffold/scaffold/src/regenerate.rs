//! Single-flight regeneration with a retained last good result.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use scaffold_surface::{IsosurfaceExtractor, MarchingCubes};
use scaffold_types::{NoObstacles, ObstacleQuery};
use tracing::{debug, warn};

use crate::pipeline::{Scaffold, generate_scaffold};
use crate::{ScaffoldConfig, ScaffoldError, ScaffoldResult};

/// Shared obstacle service.
pub type SharedObstacles = Arc<dyn ObstacleQuery + Send + Sync>;

/// Shared extraction service.
pub type SharedExtractor = Arc<dyn IsosurfaceExtractor + Send + Sync>;

/// Owns the pipeline inputs and the latest successful [`Scaffold`].
///
/// [`regenerate`](Self::regenerate) runs the whole pipeline from scratch.
/// Only one regeneration runs at a time: a call made while another is in
/// flight fails immediately with [`ScaffoldError::RegenerationInProgress`].
/// A failed regeneration leaves the previous scaffold in place.
///
/// # Example
///
/// ```
/// use scaffold::{Regenerator, ScaffoldConfig};
/// use scaffold::types::SphereObstacles;
/// use nalgebra::Point3;
/// use std::sync::Arc;
///
/// let obstacles = SphereObstacles::new().with_sphere(Point3::new(2.0, 0.0, 0.0), 0.8);
/// let regenerator = Regenerator::new(ScaffoldConfig::preview())
///     .with_obstacles(Arc::new(obstacles));
///
/// let scaffold = regenerator.regenerate()?;
/// assert!(!scaffold.nodes.is_empty());
/// assert!(regenerator.latest().is_some());
/// # Ok::<(), scaffold::ScaffoldError>(())
/// ```
pub struct Regenerator {
    config: ScaffoldConfig,
    obstacles: SharedObstacles,
    extractor: SharedExtractor,
    running: AtomicBool,
    latest: Mutex<Option<Arc<Scaffold>>>,
}

impl std::fmt::Debug for Regenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Regenerator")
            .field("config", &self.config)
            .field("running", &self.is_running())
            .field("has_latest", &self.latest().is_some())
            .finish_non_exhaustive()
    }
}

impl Regenerator {
    /// Creates a regenerator with no obstacles and the CPU extractor.
    #[must_use]
    pub fn new(config: ScaffoldConfig) -> Self {
        Self {
            config,
            obstacles: Arc::new(NoObstacles),
            extractor: Arc::new(MarchingCubes::new()),
            running: AtomicBool::new(false),
            latest: Mutex::new(None),
        }
    }

    /// Sets the obstacle service.
    #[must_use]
    pub fn with_obstacles(mut self, obstacles: SharedObstacles) -> Self {
        self.obstacles = obstacles;
        self
    }

    /// Sets the extraction service.
    #[must_use]
    pub fn with_extractor(mut self, extractor: SharedExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// The configuration used by the next regeneration.
    #[must_use]
    pub const fn config(&self) -> &ScaffoldConfig {
        &self.config
    }

    /// Replaces the configuration.
    pub fn set_config(&mut self, config: ScaffoldConfig) {
        self.config = config;
    }

    /// Replaces the obstacle service.
    pub fn set_obstacles(&mut self, obstacles: SharedObstacles) {
        self.obstacles = obstacles;
    }

    /// True while a regeneration is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// The latest successful scaffold, if any.
    #[must_use]
    pub fn latest(&self) -> Option<Arc<Scaffold>> {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Rebuilds the scaffold from the current configuration and services.
    ///
    /// On success the new scaffold replaces the retained one wholesale and
    /// is returned.
    ///
    /// # Errors
    ///
    /// - [`ScaffoldError::RegenerationInProgress`] if another call is
    ///   running.
    /// - Any stage error from [`generate_scaffold`]; the retained scaffold
    ///   is left untouched.
    pub fn regenerate(&self) -> ScaffoldResult<Arc<Scaffold>> {
        let Some(_guard) = RunGuard::acquire(&self.running) else {
            warn!("Regeneration requested while another is running");
            return Err(ScaffoldError::RegenerationInProgress);
        };

        debug!("Regeneration started");
        let scaffold = Arc::new(generate_scaffold(
            &self.config,
            self.obstacles.as_ref(),
            self.extractor.as_ref(),
        )?);

        *self.latest.lock().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&scaffold));
        debug!("Regeneration finished");
        Ok(scaffold)
    }
}

/// Holds the running flag; clears it on drop, including on early return
/// and unwinding.
struct RunGuard<'a>(&'a AtomicBool);

impl<'a> RunGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
