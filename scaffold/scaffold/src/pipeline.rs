//! The three-stage scaffold pipeline.

use std::fmt;
use std::time::{Duration, Instant};

use scaffold_graph::{ConnectivityGraphBuilder, ConnectivityReport, StrutGraph, UnresolvedIsland};
use scaffold_surface::{DensityField, IsosurfaceExtractor, SurfaceStats, build_surface};
use scaffold_types::{Node, ObstacleQuery, Strut, SurfaceMesh};
use tracing::{info, warn};

use crate::{ScaffoldConfig, ScaffoldResult};

/// Pipeline stage, used to attribute warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Flood fill.
    Lattice,
    /// Connectivity repair.
    Connectivity,
    /// Density field and extraction.
    Surface,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lattice => "lattice",
            Self::Connectivity => "connectivity",
            Self::Surface => "surface",
        })
    }
}

/// A non-fatal condition met during a regeneration.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineWarning {
    /// A stage produced nothing, so every later stage ran on empty input.
    EmptyInput {
        /// The stage whose output was empty.
        stage: Stage,
    },
    /// An island could not be bridged to the main component.
    UnresolvedIsland(UnresolvedIsland),
}

impl fmt::Display for PipelineWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput { stage } => write!(f, "{stage} stage produced no output"),
            Self::UnresolvedIsland(island) => write!(
                f,
                "island of {} nodes left detached (nearest node {:.3} away)",
                island.component_size, island.nearest_distance
            ),
        }
    }
}

/// Counts and warnings from one regeneration.
#[derive(Debug, Clone, Default)]
pub struct RegenerationReport {
    /// Cells the flood fill visited.
    pub visited_cells: usize,
    /// Visited cells rejected as blocked.
    pub blocked_cells: usize,
    /// Free cells withheld by porosity.
    pub withheld_cells: usize,
    /// Connectivity pass statistics.
    pub connectivity: ConnectivityReport,
    /// Surface statistics.
    pub surface: SurfaceStats,
    /// Non-fatal conditions, in the order they were met.
    pub warnings: Vec<PipelineWarning>,
    /// Wall time of the whole pipeline.
    pub elapsed: Duration,
}

impl RegenerationReport {
    /// True when no warning was raised.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Everything one regeneration produced.
#[derive(Debug, Clone, Default)]
pub struct Scaffold {
    /// Lattice nodes; `nodes[i].id == i`.
    pub nodes: Vec<Node>,
    /// Repaired connectivity over `nodes`.
    pub graph: StrutGraph,
    /// One strut per graph edge.
    pub struts: Vec<Strut>,
    /// The density field the surface was extracted from.
    pub field: DensityField,
    /// The blended surface in world coordinates.
    pub mesh: SurfaceMesh,
    /// Statistics and warnings.
    pub report: RegenerationReport,
}

/// Runs lattice synthesis, connectivity repair and surface generation.
///
/// Empty intermediate results are not errors: the later stages run on
/// empty input and the condition is recorded as a
/// [`PipelineWarning::EmptyInput`]. Islands the connectivity repair could
/// not attach are recorded as [`PipelineWarning::UnresolvedIsland`].
///
/// # Errors
///
/// Returns [`ScaffoldError`](crate::ScaffoldError) if any stage's
/// parameters are invalid or extraction fails.
pub fn generate_scaffold(
    config: &ScaffoldConfig,
    obstacles: &dyn ObstacleQuery,
    extractor: &dyn IsosurfaceExtractor,
) -> ScaffoldResult<Scaffold> {
    let start = Instant::now();
    config.validate()?;

    let mut warnings = Vec::new();

    let lattice = scaffold_lattice::synthesize_lattice(&config.lattice, obstacles)?;
    if lattice.is_empty() {
        warnings.push(PipelineWarning::EmptyInput {
            stage: Stage::Lattice,
        });
    }

    let connectivity = ConnectivityGraphBuilder::new(config.connectivity.clone())
        .with_obstacles(obstacles)
        .build_from_nodes(&lattice.nodes)?;
    if connectivity.struts.is_empty() && !lattice.is_empty() {
        warnings.push(PipelineWarning::EmptyInput {
            stage: Stage::Connectivity,
        });
    }
    for island in &connectivity.report.unresolved_islands {
        warn!(
            component_size = island.component_size,
            nearest_distance = island.nearest_distance,
            "Island left detached from the main component"
        );
        warnings.push(PipelineWarning::UnresolvedIsland(*island));
    }

    let surface = build_surface(&connectivity.struts, &config.surface, extractor)?;
    if surface.is_empty() && !connectivity.struts.is_empty() {
        warnings.push(PipelineWarning::EmptyInput {
            stage: Stage::Surface,
        });
    }

    let report = RegenerationReport {
        visited_cells: lattice.visited,
        blocked_cells: lattice.blocked,
        withheld_cells: lattice.withheld,
        connectivity: connectivity.report,
        surface: surface.stats,
        warnings,
        elapsed: start.elapsed(),
    };

    info!(
        nodes = lattice.nodes.len(),
        edges = connectivity.struts.len(),
        triangles = surface.mesh.triangle_count(),
        warnings = report.warnings.len(),
        elapsed_ms = report.elapsed.as_millis(),
        "Scaffold generated"
    );

    Ok(Scaffold {
        nodes: lattice.nodes,
        graph: connectivity.graph,
        struts: connectivity.struts,
        field: surface.field,
        mesh: surface.mesh,
        report,
    })
}
