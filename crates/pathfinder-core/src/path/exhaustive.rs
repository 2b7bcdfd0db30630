//! Reference distances by enumerating every simple path.
//!
//! Exponential in the node count; meant for cross-checking the solver on
//! graphs of a handful of nodes.

use std::collections::BTreeSet;

use crate::graph::Graph;

/// Minimum total weight over all simple paths from `start` to `end`.
///
/// `Some(0.0)` when `start == end`; `None` when no path exists or either
/// label is unknown.
#[must_use]
pub fn min_distance(graph: &Graph, start: &str, end: &str) -> Option<f64> {
    if !graph.contains(start) || !graph.contains(end) {
        return None;
    }
    if start == end {
        return Some(0.0);
    }
    let mut on_path = BTreeSet::from([start]);
    let mut best = None;
    walk(graph, start, end, 0.0, &mut on_path, &mut best);
    best
}

fn walk<'g>(
    graph: &'g Graph,
    at: &str,
    end: &str,
    so_far: f64,
    on_path: &mut BTreeSet<&'g str>,
    best: &mut Option<f64>,
) {
    for (next, &w) in graph.neighbors(at).into_iter().flatten() {
        let next = next.as_str();
        if on_path.contains(next) {
            continue;
        }
        let total = so_far + w;
        if next == end {
            if best.is_none_or(|b| total < b) {
                *best = Some(total);
            }
            continue;
        }
        on_path.insert(next);
        walk(graph, next, end, total, on_path, best);
        on_path.remove(next);
    }
}
