//! Random graph generation under node-count and density constraints.
//!
//! # Draw order
//!
//! Every random decision goes through the caller's [`RandomSource`] in a
//! fixed order, so replaying the same draws replays the same graph:
//!
//! 1. one draw for the node count;
//! 2. one draw for the edge target;
//! 3. per edge attempt, two index draws, plus one weight draw when the pair
//!    is accepted.

use tracing::{debug, instrument, trace};

use super::GraphError;
use super::adjacency::Graph;
use super::edge::EdgeKey;
use crate::config::{Config, WeightMode};
use crate::labels::LabelAllocator;
use crate::rng::RandomSource;

/// Largest edge count of a simple undirected graph on `n` nodes.
#[must_use]
pub const fn max_edge_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Uniform integer in `[min, max]`.
///
/// # Errors
///
/// Returns [`GraphError::InvalidNodeRange`] when `min > max` or when the
/// range is too wide to count.
pub fn choose_node_count<R: RandomSource + ?Sized>(
    min: usize,
    max: usize,
    rng: &mut R,
) -> Result<usize, GraphError> {
    let span = max
        .checked_sub(min)
        .and_then(|d| d.checked_add(1))
        .ok_or(GraphError::InvalidNodeRange { min, max })?;
    Ok(min + rng.below(span))
}

/// Target edge count for `n` nodes.
///
/// `n + floor(r · (floor(n − n·density) + 1))`, clamped to
/// `[n − 1, n(n − 1)/2]`. The span goes negative for densities above 1,
/// which pulls the target below `n` before clamping.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
pub fn choose_edge_count<R: RandomSource + ?Sized>(n: usize, density: f64, rng: &mut R) -> usize {
    let n_f = n as f64;
    let span = n_f.mul_add(-density, n_f).floor() + 1.0;
    let offset = (rng.next_unit() * span).floor() as i64;

    let max = max_edge_count(n);
    let min = n.saturating_sub(1).min(max);
    let raw = (n as i64).saturating_add(offset);
    raw.clamp(min as i64, max as i64) as usize
}

/// Builds random graphs from a [`Config`].
#[derive(Debug, Clone)]
pub struct GraphBuilder<'a> {
    config: &'a Config,
    labels: LabelAllocator,
}

impl<'a> GraphBuilder<'a> {
    /// Builder drawing labels from the default alphabet.
    #[must_use]
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            labels: LabelAllocator::default(),
        }
    }

    /// Builder drawing labels from a custom allocator.
    #[must_use]
    pub const fn with_labels(config: &'a Config, labels: LabelAllocator) -> Self {
        Self { config, labels }
    }

    /// Generate a fresh graph: node count, labels, edge target, edges.
    ///
    /// # Errors
    ///
    /// Fails when the config does not validate or the node count exceeds
    /// the label alphabet.
    #[instrument(skip_all)]
    pub fn generate<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<Graph, GraphError> {
        self.check_config()?;
        let n = choose_node_count(self.config.items_min, self.config.items_max, rng)?;
        self.generate_with_node_count(n, rng)
    }

    /// Generate a graph with exactly `n` nodes.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::AlphabetExhausted`] if `n` exceeds the alphabet.
    pub fn generate_with_node_count<R: RandomSource + ?Sized>(
        &self,
        n: usize,
        rng: &mut R,
    ) -> Result<Graph, GraphError> {
        let nodes = self.labels.allocate(n)?;
        let target = choose_edge_count(n, self.config.edge_density, rng);
        let graph = self.generate_edges(&nodes, target, rng)?;
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            target,
            "generated graph"
        );
        Ok(graph)
    }

    /// Sample `target` distinct edges between `nodes` by rejection.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EdgeTargetTooLarge`] when `target` exceeds the
    /// number of distinct pairs; the sampling loop would never finish.
    /// Returns [`GraphError::InvalidConfig`] when the weight bounds cannot
    /// produce an edge the graph accepts.
    pub fn generate_edges<R: RandomSource + ?Sized>(
        &self,
        nodes: &[String],
        target: usize,
        rng: &mut R,
    ) -> Result<Graph, GraphError> {
        self.check_config()?;
        let mut graph = Graph::with_nodes(nodes.iter().cloned());
        let max = max_edge_count(graph.node_count());
        if target > max {
            return Err(GraphError::EdgeTargetTooLarge { target, max });
        }

        let mut rejected = 0_usize;
        while graph.edge_count() < target {
            let a = &nodes[rng.below(nodes.len())];
            let b = &nodes[rng.below(nodes.len())];
            if a == b || graph.has_edge(&EdgeKey::new(a, b)) {
                rejected += 1;
                continue;
            }
            let w = self.generate_weight(rng);
            if !graph.add_edge(a, b, w) {
                return Err(GraphError::EdgeRejected {
                    u: a.clone(),
                    v: b.clone(),
                });
            }
            trace!(%a, %b, weight = w, "edge");
        }
        debug!(rejected, "edge sampling finished");
        Ok(graph)
    }

    /// A fresh edge weight inside `[w_min, w_max]`.
    ///
    /// Integer mode falls back to the raw draw when the bounds hold no whole
    /// number; [`Config::validate`] rejects such configs up front.
    pub fn generate_weight<R: RandomSource + ?Sized>(&self, rng: &mut R) -> f64 {
        let Config {
            w_min,
            w_max,
            weight_mode,
            ..
        } = *self.config;
        let raw = rng.uniform(w_min, w_max);
        match weight_mode {
            WeightMode::Integer => {
                let (lo, hi) = (w_min.ceil(), w_max.floor());
                if lo <= hi { raw.round().clamp(lo, hi) } else { raw }
            }
            WeightMode::Continuous => raw,
        }
    }

    fn check_config(&self) -> Result<(), GraphError> {
        self.config
            .validate()
            .map_err(|err| GraphError::InvalidConfig(err.to_string()))
    }
}
