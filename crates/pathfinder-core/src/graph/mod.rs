//! Random undirected weighted graphs.
//!
//! # Overview
//!
//! ```text
//! Config + RandomSource
//!        ↓  GraphBuilder::choose_node_count()
//! node count N
//!        ↓  LabelAllocator::allocate(N)
//! labels A, B, C, …
//!        ↓  GraphBuilder::choose_edge_count(N)
//! edge target E ∈ [N−1, N(N−1)/2]
//!        ↓  GraphBuilder::generate_edges()
//! Graph (symmetric adjacency + canonical edge map)
//!        ↓  stats::GraphStats::from_graph()
//! GraphStats (density, components, isolated nodes, …)
//! ```
//!
//! A generated [`Graph`] is never mutated after it is handed out; a reset
//! builds a new one.
//!
//! ## Typical Usage
//!
//! ```rust
//! use pathfinder_core::config::Config;
//! use pathfinder_core::graph::{GraphBuilder, stats::GraphStats};
//! use pathfinder_core::rng::DeterministicRng;
//!
//! let config = Config::default();
//! let mut rng = DeterministicRng::new(7);
//! let graph = GraphBuilder::new(&config).generate(&mut rng).unwrap();
//! let stats = GraphStats::from_graph(&graph);
//! assert!(stats.edge_count + 1 >= stats.node_count);
//! ```

pub mod adjacency;
pub mod build;
pub mod edge;
pub mod stats;

pub use adjacency::{AdjacencyGraph, Graph};
pub use build::{GraphBuilder, choose_edge_count, choose_node_count, max_edge_count};
pub use edge::EdgeKey;
pub use stats::GraphStats;

/// Errors from graph generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// More nodes were requested than the alphabet has labels.
    #[error("requested {requested} labels but the alphabet only has {available}")]
    AlphabetExhausted { requested: usize, available: usize },

    /// `min > max` in a node count request.
    #[error("invalid node count range {min}..={max}")]
    InvalidNodeRange { min: usize, max: usize },

    /// The edge target can never be reached without duplicates.
    #[error("edge target {target} exceeds the {max} possible edges")]
    EdgeTargetTooLarge { target: usize, max: usize },

    /// The builder's config failed validation.
    #[error("invalid generator config: {0}")]
    InvalidConfig(String),

    /// The graph refused an edge the sampler drew.
    #[error("edge {u}-{v} was rejected by the graph")]
    EdgeRejected { u: String, v: String },
}
