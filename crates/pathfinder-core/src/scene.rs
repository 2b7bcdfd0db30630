//! One generated graph together with its layout.
//!
//! A reset throws the whole [`Scene`] away and generates a new one; nothing
//! inside it is mutated after construction.

use serde::Serialize;
use tracing::{info, instrument};

use crate::config::{Config, ConfigError};
use crate::graph::{Graph, GraphBuilder, GraphError, GraphStats};
use crate::layout::{Bounds, LayoutEngine, LayoutError, Placement};
use crate::path::{PathError, PathResult, shortest_path};
use crate::rng::RandomSource;

/// Errors from building a scene.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// A graph plus the placement of its nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub graph: Graph,
    pub placement: Placement,
    pub bounds: Bounds,
}

impl Scene {
    /// Validate `config`, generate a graph, then lay it out in `bounds`.
    ///
    /// Generation draws from `rng` before layout does, so one seeded source
    /// reproduces the whole scene.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError`] when the config is invalid, the graph cannot
    /// be generated, or the bounds are narrower than the margins.
    #[instrument(skip(config, rng))]
    pub fn generate<R: RandomSource + ?Sized>(
        config: &Config,
        bounds: Bounds,
        rng: &mut R,
    ) -> Result<Self, SceneError> {
        config.validate()?;
        let graph = GraphBuilder::new(config).generate(rng)?;
        let labels: Vec<&str> = graph.nodes().collect();
        let placement = LayoutEngine::from(config).place(&labels, bounds, rng)?;
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            unplaced = placement.unplaced().len(),
            "scene generated"
        );
        Ok(Self {
            graph,
            placement,
            bounds,
        })
    }

    /// Shortest path between two labels of this scene's graph.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::UnknownNode`] for labels outside the graph.
    pub fn solve(&self, start: &str, end: &str) -> Result<PathResult, PathError> {
        shortest_path(&self.graph, start, end)
    }

    /// Statistics for this scene's graph.
    #[must_use]
    pub fn stats(&self) -> GraphStats {
        GraphStats::from_graph(&self.graph)
    }
}
