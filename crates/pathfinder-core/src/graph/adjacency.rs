//! The symmetric adjacency structure shared by the solver and the renderer.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

use super::edge::EdgeKey;

/// Node label → (neighbor label → weight).
pub type AdjacencyGraph = BTreeMap<String, BTreeMap<String, f64>>;

/// An undirected weighted graph over string labels.
///
/// Invariants maintained by every mutating method:
///
/// - every node has an adjacency entry, isolated nodes included;
/// - `adjacency[u][v] == adjacency[v][u] == edges[{u, v}]`;
/// - no self-loops, every weight finite and positive.
///
/// Nodes iterate in ascending label order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Graph {
    adjacency: AdjacencyGraph,
    edges: BTreeMap<EdgeKey, f64>,
}

impl Graph {
    /// An empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A graph with the given nodes and no edges. Duplicates collapse.
    #[must_use]
    pub fn with_nodes<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut graph = Self::new();
        for label in labels {
            graph.add_node(label);
        }
        graph
    }

    /// Build a graph from nodes plus `(u, v, weight)` triples.
    ///
    /// Triples that [`Graph::add_edge`] rejects are skipped with a warning.
    #[must_use]
    pub fn from_edges<I, S>(labels: I, edges: &[(&str, &str, f64)]) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut graph = Self::with_nodes(labels);
        for &(u, v, w) in edges {
            graph.add_edge(u, v, w);
        }
        graph
    }

    /// Add a node. Returns `false` if it already existed.
    pub fn add_node(&mut self, label: impl Into<String>) -> bool {
        let label = label.into();
        if self.adjacency.contains_key(&label) {
            return false;
        }
        self.adjacency.insert(label, BTreeMap::new());
        true
    }

    /// Insert `w` as the weight of `{u, v}` in both directions.
    ///
    /// A no-op that logs a warning when either endpoint is missing, when
    /// `u == v`, or when `w` is not a finite positive number. Re-adding an
    /// existing pair replaces its weight on both sides.
    ///
    /// Returns `true` if the graph changed.
    pub fn add_edge(&mut self, u: &str, v: &str, w: f64) -> bool {
        if u == v {
            warn!(node = u, "rejected self-loop");
            return false;
        }
        if !w.is_finite() || w <= 0.0 {
            warn!(u, v, weight = w, "rejected non-positive edge weight");
            return false;
        }
        let missing: Vec<&str> = [u, v]
            .into_iter()
            .filter(|label| !self.adjacency.contains_key(*label))
            .collect();
        if !missing.is_empty() {
            warn!(u, v, ?missing, "rejected edge to unknown node");
            return false;
        }

        if let Some(neighbors) = self.adjacency.get_mut(u) {
            neighbors.insert(v.to_string(), w);
        }
        if let Some(neighbors) = self.adjacency.get_mut(v) {
            neighbors.insert(u.to_string(), w);
        }
        self.edges.insert(EdgeKey::new(u, v), w);
        true
    }

    /// `true` if `label` is a node of this graph.
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.adjacency.contains_key(label)
    }

    /// `true` if the canonical pair is already an edge.
    #[must_use]
    pub fn has_edge(&self, key: &EdgeKey) -> bool {
        self.edges.contains_key(key)
    }

    /// Node labels in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Neighbors of `label` with their weights, or `None` for unknown nodes.
    #[must_use]
    pub fn neighbors(&self, label: &str) -> Option<&BTreeMap<String, f64>> {
        self.adjacency.get(label)
    }

    /// Weight of `{u, v}`, if that edge exists.
    #[must_use]
    pub fn weight(&self, u: &str, v: &str) -> Option<f64> {
        self.adjacency.get(u).and_then(|n| n.get(v)).copied()
    }

    /// Every edge with its weight, in canonical key order.
    pub fn edges(&self) -> impl Iterator<Item = (&EdgeKey, f64)> {
        self.edges.iter().map(|(k, w)| (k, *w))
    }

    /// The raw adjacency map.
    #[must_use]
    pub const fn adjacency(&self) -> &AdjacencyGraph {
        &self.adjacency
    }

    /// Number of neighbors of `label` (0 for unknown nodes).
    #[must_use]
    pub fn degree(&self, label: &str) -> usize {
        self.adjacency.get(label).map_or(0, BTreeMap::len)
    }
}
