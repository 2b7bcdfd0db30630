//! Single-source, single-target shortest paths.
//!
//! [`solver::shortest_path`] is a linear-scan Dijkstra over a [`Graph`];
//! [`exhaustive::min_distance`] enumerates every simple path and serves as a
//! reference for small graphs.
//!
//! [`Graph`]: crate::graph::Graph

pub mod exhaustive;
pub mod solver;

use serde::Serialize;

use crate::graph::EdgeKey;

pub use solver::shortest_path;

/// A path that reaches its target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    /// Sum of edge weights along the path.
    pub distance: f64,
    /// Nodes visited from start to end, both included.
    pub nodes: Vec<String>,
    /// Canonical keys of the traversed edges, in travel order.
    pub edges: Vec<EdgeKey>,
}

/// Outcome of a shortest-path query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PathResult {
    /// The end node is reachable.
    Reachable(Route),
    /// No path connects start and end.
    Unreachable,
}

impl PathResult {
    /// The path distance, `f64::INFINITY` when unreachable.
    #[must_use]
    pub fn distance(&self) -> f64 {
        match self {
            Self::Reachable(route) => route.distance,
            Self::Unreachable => f64::INFINITY,
        }
    }

    /// The traversed edges; empty when unreachable.
    #[must_use]
    pub fn edges(&self) -> &[EdgeKey] {
        match self {
            Self::Reachable(route) => &route.edges,
            Self::Unreachable => &[],
        }
    }

    /// The route, if any.
    #[must_use]
    pub const fn route(&self) -> Option<&Route> {
        match self {
            Self::Reachable(route) => Some(route),
            Self::Unreachable => None,
        }
    }

    /// `true` for [`PathResult::Reachable`].
    #[must_use]
    pub const fn is_reachable(&self) -> bool {
        matches!(self, Self::Reachable(_))
    }
}

/// Errors from path queries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// The label is not a node of the graph.
    #[error("node {0:?} is not in the graph")]
    UnknownNode(String),
}
