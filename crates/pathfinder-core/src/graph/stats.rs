//! Summary statistics for a generated graph.
//!
//! # Statistics Provided
//!
//! - **node_count** / **edge_count**: sizes of the graph.
//! - **density**: `edge_count / (node_count * (node_count - 1) / 2)`, the
//!   undirected density. Zero for graphs with 0 or 1 node.
//! - **component_count**: connected components. Generation only biases
//!   toward connectivity, so values above 1 are expected now and then.
//! - **isolated_node_count**: nodes without any edge.
//! - **max_degree**: highest neighbor count.
//! - **total_weight**: sum of all edge weights.

use std::collections::HashMap;

use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use serde::Serialize;

use super::adjacency::Graph;
use super::build::max_edge_count;

// ---------------------------------------------------------------------------
// GraphStats
// ---------------------------------------------------------------------------

/// Summary statistics for one [`Graph`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    /// Number of nodes.
    pub node_count: usize,
    /// Number of undirected edges.
    pub edge_count: usize,
    /// Undirected density in `[0, 1]`.
    pub density: f64,
    /// Number of connected components.
    pub component_count: usize,
    /// Nodes with degree zero.
    pub isolated_node_count: usize,
    /// Highest degree of any node.
    pub max_degree: usize,
    /// Sum of all edge weights.
    pub total_weight: f64,
}

impl GraphStats {
    /// Compute statistics for `graph`.
    #[must_use]
    pub fn from_graph(graph: &Graph) -> Self {
        let node_count = graph.node_count();
        let edge_count = graph.edge_count();
        let (pg, _) = to_petgraph(graph);

        Self {
            node_count,
            edge_count,
            density: compute_density(node_count, edge_count),
            component_count: connected_components(&pg),
            isolated_node_count: graph.nodes().filter(|n| graph.degree(n) == 0).count(),
            max_degree: graph.nodes().map(|n| graph.degree(n)).max().unwrap_or(0),
            total_weight: graph.edges().map(|(_, w)| w).sum(),
        }
    }

    /// `true` when every node can reach every other node.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.component_count <= 1
    }
}

/// Mirror `graph` into a petgraph [`UnGraph`], returning the label → index
/// map alongside it. Node indices follow ascending label order.
#[must_use]
pub fn to_petgraph(graph: &Graph) -> (UnGraph<String, f64>, HashMap<String, NodeIndex>) {
    let mut pg = UnGraph::<String, f64>::with_capacity(graph.node_count(), graph.edge_count());
    let mut index = HashMap::with_capacity(graph.node_count());
    for label in graph.nodes() {
        index.insert(label.to_string(), pg.add_node(label.to_string()));
    }
    for (key, w) in graph.edges() {
        let (u, v) = key.endpoints();
        if let (Some(&a), Some(&b)) = (index.get(u), index.get(v)) {
            pg.add_edge(a, b, w);
        }
    }
    (pg, index)
}

fn compute_density(node_count: usize, edge_count: usize) -> f64 {
    let max_edges = max_edge_count(node_count);
    if max_edges == 0 {
        return 0.0_f64;
    }
    edge_count as f64 / max_edges as f64
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
