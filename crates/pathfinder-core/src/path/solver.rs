//! Linear-scan Dijkstra.
//!
//! # Algorithm
//!
//! 1. **Init**: `dist(start) = 0`, every other node `+∞`, no parents. Each
//!    direct neighbor of `start` is seeded with its edge weight and parent
//!    `start`.
//! 2. **Select**: the unvisited node with the strictly smallest finite
//!    distance. Nodes are scanned in ascending label order, so ties go to
//!    the alphabetically first node.
//! 3. **Relax**: for every neighbor `v` of the selected node `u`, skip `v`
//!    when it is `start`; otherwise lower `dist(v)` to `dist(u) + w(u, v)`
//!    when that is strictly smaller, recording `u` as its parent.
//! 4. **Advance**: mark `u` visited and select again.
//!
//! Edges leading back into `start` are never relaxed. With positive weights
//! `start` is already final at distance 0, so this only matters if a caller
//! hands in a graph built outside [`Graph::add_edge`]'s checks.
//!
//! The scan is O(N²), which is fine for alphabet-sized graphs.

use std::collections::HashMap;

use tracing::{debug, instrument};

use super::{PathError, PathResult, Route};
use crate::graph::{EdgeKey, Graph};

/// Shortest path from `start` to `end`.
///
/// `start == end` yields distance 0 with a single-node route and no edges.
///
/// # Errors
///
/// Returns [`PathError::UnknownNode`] if either label is not in `graph`.
#[instrument(skip(graph), fields(nodes = graph.node_count()))]
pub fn shortest_path(graph: &Graph, start: &str, end: &str) -> Result<PathResult, PathError> {
    for label in [start, end] {
        if !graph.contains(label) {
            return Err(PathError::UnknownNode(label.to_string()));
        }
    }

    let labels: Vec<&str> = graph.nodes().collect();
    let index: HashMap<&str, usize> = labels.iter().enumerate().map(|(i, l)| (*l, i)).collect();
    let (Some(&s), Some(&e)) = (index.get(start), index.get(end)) else {
        return Err(PathError::UnknownNode(start.to_string()));
    };

    let n = labels.len();
    let mut dist = vec![f64::INFINITY; n];
    let mut parent: Vec<Option<usize>> = vec![None; n];
    let mut visited = vec![false; n];

    dist[s] = 0.0;
    for (child, &w) in graph.neighbors(start).into_iter().flatten() {
        if let Some(&c) = index.get(child.as_str()) {
            dist[c] = w;
            parent[c] = Some(s);
        }
    }

    let mut rounds = 0_usize;
    while let Some(u) = nearest_unvisited(&dist, &visited) {
        rounds += 1;
        let d = dist[u];
        for (child, &w) in graph.neighbors(labels[u]).into_iter().flatten() {
            if child == start {
                continue;
            }
            let Some(&v) = index.get(child.as_str()) else {
                continue;
            };
            let candidate = d + w;
            if candidate < dist[v] {
                dist[v] = candidate;
                parent[v] = Some(u);
            }
        }
        visited[u] = true;
    }
    debug!(rounds, "solver finished");

    if dist[e].is_infinite() {
        return Ok(PathResult::Unreachable);
    }

    let mut chain = vec![e];
    let mut cursor = parent[e];
    while let Some(p) = cursor {
        if chain.len() > n {
            break;
        }
        chain.push(p);
        cursor = parent[p];
    }
    chain.reverse();

    let nodes: Vec<String> = chain.iter().map(|&i| labels[i].to_string()).collect();
    let edges = nodes
        .windows(2)
        .map(|pair| EdgeKey::new(&pair[0], &pair[1]))
        .collect();

    Ok(PathResult::Reachable(Route {
        distance: dist[e],
        nodes,
        edges,
    }))
}

/// Index of the unvisited node with the strictly smallest finite distance,
/// first in scan order on ties.
fn nearest_unvisited(dist: &[f64], visited: &[bool]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, (&d, &done)) in dist.iter().zip(visited).enumerate() {
        if done || !d.is_finite() {
            continue;
        }
        if best.is_none_or(|b| d < dist[b]) {
            best = Some(i);
        }
    }
    best
}
