use std::collections::HashMap;

use pathfinder_core::graph::{max_edge_count, stats::to_petgraph};
use pathfinder_core::path::exhaustive::min_distance;
use pathfinder_core::{Config, Graph, Placement, WeightMode};
use petgraph::algo::dijkstra;

use crate::{PairSolution, SimulationResult};

/// Absolute tolerance when comparing path distances.
pub const DISTANCE_EPSILON: f64 = 1e-9;

/// Largest graph the brute-force path check will enumerate.
pub const DEFAULT_EXHAUSTIVE_LIMIT: usize = 8;

// ── Core result types ─────────────────────────────────────────────────────────

/// Oracle result for an invariant check.
///
/// Returned by each checker and by [`SceneOracle::check_all`].
#[derive(Debug, Clone, PartialEq)]
pub struct OracleResult {
    /// `true` iff no violations were found.
    pub passed: bool,
    /// Every invariant that was violated.
    pub violations: Vec<InvariantViolation>,
}

impl OracleResult {
    #[must_use]
    fn pass() -> Self {
        Self {
            passed: true,
            violations: Vec::new(),
        }
    }

    #[must_use]
    fn from_violations(violations: Vec<InvariantViolation>) -> Self {
        Self {
            passed: violations.is_empty(),
            violations,
        }
    }

    /// Merge another result into this one (failures accumulate).
    #[must_use]
    fn merge(mut self, other: Self) -> Self {
        if !other.passed {
            self.passed = false;
            self.violations.extend(other.violations);
        }
        self
    }
}

// ── Invariant violation diagnostics ──────────────────────────────────────────

/// Diagnostic information for a single failed invariant check.
#[derive(Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    /// `u → v` and `v → u` disagree.
    Asymmetric {
        u: String,
        v: String,
        forward: Option<f64>,
        backward: Option<f64>,
    },

    /// A node lists itself as a neighbor.
    SelfLoop { node: String },

    /// Edge count outside `[min(N − 1, max), N(N − 1)/2]`.
    EdgeCount {
        nodes: usize,
        edges: usize,
        min: usize,
        max: usize,
    },

    /// An edge weight outside the configured bounds, or a fractional weight
    /// in integer mode.
    Weight {
        edge: String,
        weight: f64,
        w_min: f64,
        w_max: f64,
    },

    /// Two placed circles closer than `r1 + r2 + separation`.
    Overlap {
        a: String,
        b: String,
        distance: f64,
        required: f64,
    },

    /// Placed plus unplaced labels do not partition the node set.
    Unplaced {
        nodes: usize,
        placed: usize,
        unplaced: usize,
    },

    /// The reported route does not add up to the reported distance, or is
    /// not a walk from start to end over existing edges.
    BrokenRoute {
        start: String,
        end: String,
        detail: String,
    },

    /// The solver disagrees with a brute-force enumeration of simple paths.
    NotOptimal {
        start: String,
        end: String,
        solver: f64,
        expected: f64,
    },

    /// The solver disagrees with `petgraph`'s Dijkstra.
    ReferenceMismatch {
        start: String,
        end: String,
        solver: f64,
        reference: f64,
    },
}

// ── Oracle ────────────────────────────────────────────────────────────────────

/// Oracle for verifying generation, layout and solver invariants.
///
/// # Invariants checked
///
/// 1. **Graph shape** (`check_graph`): symmetric adjacency, no self-loops,
///    edge count within bounds, weights within bounds.
/// 2. **Layout** (`check_layout`): separation between every placed pair;
///    placed and unplaced labels partition the node set.
/// 3. **Routes** (`check_routes`): each route is a real walk whose weights
///    sum to the reported distance.
/// 4. **Optimality** (`check_exhaustive`): brute force agrees on small graphs.
/// 5. **Reference** (`check_reference`): `petgraph::algo::dijkstra` agrees.
pub struct SceneOracle;

impl SceneOracle {
    // ── Invariant 1: Graph shape ─────────────────────────────────────────────

    #[must_use]
    pub fn check_graph(graph: &Graph, config: &Config) -> OracleResult {
        let mut violations = Vec::new();

        for (u, neighbors) in graph.adjacency() {
            for (v, &w) in neighbors {
                if u == v {
                    violations.push(InvariantViolation::SelfLoop { node: u.clone() });
                    continue;
                }
                let backward = graph.weight(v, u);
                if backward != Some(w) {
                    violations.push(InvariantViolation::Asymmetric {
                        u: u.clone(),
                        v: v.clone(),
                        forward: Some(w),
                        backward,
                    });
                }
            }
        }

        let nodes = graph.node_count();
        let max = max_edge_count(nodes);
        let min = nodes.saturating_sub(1).min(max);
        let edges = graph.edge_count();
        if edges < min || edges > max {
            violations.push(InvariantViolation::EdgeCount {
                nodes,
                edges,
                min,
                max,
            });
        }

        for (key, w) in graph.edges() {
            let in_range = w >= config.w_min && w <= config.w_max;
            let whole = config.weight_mode != WeightMode::Integer || w.fract() == 0.0;
            if !in_range || !whole {
                violations.push(InvariantViolation::Weight {
                    edge: key.to_string(),
                    weight: w,
                    w_min: config.w_min,
                    w_max: config.w_max,
                });
            }
        }

        OracleResult::from_violations(violations)
    }

    // ── Invariant 2: Layout ──────────────────────────────────────────────────

    #[must_use]
    pub fn check_layout(graph: &Graph, placement: &Placement, separation: f64) -> OracleResult {
        let mut violations = Vec::new();
        let layout = placement.layout();

        let circles: Vec<_> = layout.circles.iter().collect();
        for (i, (label_a, a)) in circles.iter().enumerate() {
            for (label_b, b) in &circles[i + 1..] {
                let distance = a.distance_to(b);
                let required = a.r + b.r + separation;
                if distance < required {
                    violations.push(InvariantViolation::Overlap {
                        a: (*label_a).clone(),
                        b: (*label_b).clone(),
                        distance,
                        required,
                    });
                }
            }
        }

        let unplaced = placement.unplaced();
        let partitioned = layout.circles.len() + unplaced.len() == graph.node_count()
            && graph.nodes().all(|label| {
                layout.circles.contains_key(label) != unplaced.iter().any(|u| u == label)
            })
            && placement.is_complete() == unplaced.is_empty();
        if !partitioned {
            violations.push(InvariantViolation::Unplaced {
                nodes: graph.node_count(),
                placed: layout.circles.len(),
                unplaced: unplaced.len(),
            });
        }

        OracleResult::from_violations(violations)
    }

    // ── Invariant 3: Route consistency ───────────────────────────────────────

    #[must_use]
    pub fn check_routes(graph: &Graph, solutions: &[PairSolution]) -> OracleResult {
        let violations = solutions
            .iter()
            .filter_map(|s| {
                route_defect(graph, s).map(|detail| InvariantViolation::BrokenRoute {
                    start: s.start.clone(),
                    end: s.end.clone(),
                    detail,
                })
            })
            .collect();
        OracleResult::from_violations(violations)
    }

    // ── Invariant 4: Brute-force optimality ──────────────────────────────────

    /// Compare every solution against exhaustive search.
    ///
    /// Skipped (passes) when the graph has more than `limit` nodes.
    #[must_use]
    pub fn check_exhaustive(graph: &Graph, solutions: &[PairSolution], limit: usize) -> OracleResult {
        if graph.node_count() > limit {
            return OracleResult::pass();
        }
        let violations = solutions
            .iter()
            .filter_map(|s| {
                let expected = min_distance(graph, &s.start, &s.end).unwrap_or(f64::INFINITY);
                let solver = s.result.distance();
                (!distances_agree(solver, expected)).then(|| InvariantViolation::NotOptimal {
                    start: s.start.clone(),
                    end: s.end.clone(),
                    solver,
                    expected,
                })
            })
            .collect();
        OracleResult::from_violations(violations)
    }

    // ── Invariant 5: Reference implementation ────────────────────────────────

    #[must_use]
    pub fn check_reference(graph: &Graph, solutions: &[PairSolution]) -> OracleResult {
        let (pg, index) = to_petgraph(graph);
        let mut cache: HashMap<&str, HashMap<_, f64>> = HashMap::new();
        let mut violations = Vec::new();

        for s in solutions {
            let (Some(&from), Some(&to)) = (index.get(&s.start), index.get(&s.end)) else {
                continue;
            };
            let distances = cache
                .entry(s.start.as_str())
                .or_insert_with(|| dijkstra(&pg, from, None, |e| *e.weight()));
            let reference = distances.get(&to).copied().unwrap_or(f64::INFINITY);
            let solver = s.result.distance();
            if !distances_agree(solver, reference) {
                violations.push(InvariantViolation::ReferenceMismatch {
                    start: s.start.clone(),
                    end: s.end.clone(),
                    solver,
                    reference,
                });
            }
        }

        OracleResult::from_violations(violations)
    }

    /// Run every check against one simulation result.
    #[must_use]
    pub fn check_all(result: &SimulationResult, config: &Config, exhaustive_limit: usize) -> OracleResult {
        let graph = &result.scene.graph;
        Self::check_graph(graph, config)
            .merge(Self::check_layout(
                graph,
                &result.scene.placement,
                config.separation,
            ))
            .merge(Self::check_routes(graph, &result.solutions))
            .merge(Self::check_exhaustive(
                graph,
                &result.solutions,
                exhaustive_limit,
            ))
            .merge(Self::check_reference(graph, &result.solutions))
    }
}

fn distances_agree(a: f64, b: f64) -> bool {
    if a.is_infinite() || b.is_infinite() {
        return a.is_infinite() && b.is_infinite();
    }
    (a - b).abs() <= DISTANCE_EPSILON
}

/// Describe what is wrong with one solution's route, if anything.
fn route_defect(graph: &Graph, solution: &PairSolution) -> Option<String> {
    let route = solution.result.route()?;
    if route.nodes.first() != Some(&solution.start) || route.nodes.last() != Some(&solution.end) {
        return Some(format!("route {:?} does not run start to end", route.nodes));
    }
    if route.edges.len() + 1 != route.nodes.len() {
        return Some(format!(
            "{} nodes but {} edges",
            route.nodes.len(),
            route.edges.len()
        ));
    }
    let mut summed = 0.0;
    for (pair, key) in route.nodes.windows(2).zip(&route.edges) {
        if !key.touches(&pair[0]) || !key.touches(&pair[1]) {
            return Some(format!("edge {key} does not join {} and {}", pair[0], pair[1]));
        }
        match graph.weight(&pair[0], &pair[1]) {
            Some(w) => summed += w,
            None => return Some(format!("edge {key} is not in the graph")),
        }
    }
    (!distances_agree(summed, route.distance))
        .then(|| format!("edges sum to {summed} but distance is {}", route.distance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathfinder_core::layout::{Bounds, Circle, Layout};
    use pathfinder_core::{EdgeKey, PathResult, Route, Scene};

    // ── Helper constructors ───────────────────────────────────────────────────

    fn triangle() -> Graph {
        Graph::from_edges(
            ["A", "B", "C"],
            &[("A", "B", 5.0), ("B", "C", 3.0), ("A", "C", 100.0)],
        )
    }

    fn solution(start: &str, end: &str, result: PathResult) -> PairSolution {
        PairSolution {
            start: start.into(),
            end: end.into(),
            result,
        }
    }

    fn route(distance: f64, nodes: &[&str]) -> PathResult {
        PathResult::Reachable(Route {
            distance,
            nodes: nodes.iter().map(|s| (*s).to_owned()).collect(),
            edges: nodes.windows(2).map(|p| EdgeKey::new(p[0], p[1])).collect(),
        })
    }

    fn circle(x: f64, y: f64) -> Circle {
        Circle {
            x,
            y,
            r: 10.0,
            color: "#3b82f6",
        }
    }

    // ── Graph shape ──────────────────────────────────────────────────────────

    #[test]
    fn generated_graph_passes_shape_checks() {
        let config = Config::default();
        let result = crate::simulate(&crate::SimulationConfig::default()).expect("simulate");
        let verdict = SceneOracle::check_graph(&result.scene.graph, &config);
        assert!(verdict.passed, "{:?}", verdict.violations);
    }

    #[test]
    fn too_few_edges_is_flagged() {
        let graph = Graph::from_edges(["A", "B", "C", "D"], &[("A", "B", 1.0)]);
        let verdict = SceneOracle::check_graph(&graph, &Config::default());
        assert!(!verdict.passed);
        assert!(matches!(
            verdict.violations[0],
            InvariantViolation::EdgeCount {
                nodes: 4,
                edges: 1,
                min: 3,
                max: 6
            }
        ));
    }

    #[test]
    fn fractional_weight_in_integer_mode_is_flagged() {
        let graph = Graph::from_edges(["A", "B"], &[("A", "B", 2.5)]);
        let verdict = SceneOracle::check_graph(&graph, &Config::default());
        assert_eq!(verdict.violations.len(), 1);
        assert!(matches!(verdict.violations[0], InvariantViolation::Weight { .. }));

        let continuous = Config {
            weight_mode: WeightMode::Continuous,
            ..Config::default()
        };
        assert!(SceneOracle::check_graph(&graph, &continuous).passed);
    }

    // ── Layout ───────────────────────────────────────────────────────────────

    #[test]
    fn overlapping_circles_are_flagged() {
        let graph = Graph::with_nodes(["A", "B"]);
        let mut layout = Layout::default();
        layout.circles.insert("A".into(), circle(0.0, 0.0));
        layout.circles.insert("B".into(), circle(25.0, 0.0));
        let verdict = SceneOracle::check_layout(&graph, &Placement::Complete(layout), 10.0);
        assert_eq!(verdict.violations.len(), 1);
        assert!(matches!(
            &verdict.violations[0],
            InvariantViolation::Overlap { a, b, .. } if a == "A" && b == "B"
        ));
    }

    #[test]
    fn missing_label_is_flagged() {
        let graph = Graph::with_nodes(["A", "B"]);
        let mut layout = Layout::default();
        layout.circles.insert("A".into(), circle(0.0, 0.0));
        let verdict = SceneOracle::check_layout(&graph, &Placement::Complete(layout), 0.0);
        assert!(matches!(
            verdict.violations[0],
            InvariantViolation::Unplaced {
                nodes: 2,
                placed: 1,
                unplaced: 0
            }
        ));
    }

    #[test]
    fn partial_layout_that_accounts_for_every_label_passes() {
        let config = Config {
            x_offset: 0.0,
            y_offset: 0.0,
            max_iterations: 50,
            ..Config::default()
        };
        let mut rng = pathfinder_core::DeterministicRng::new(4);
        let scene = Scene::generate(&config, Bounds::new(60.0, 60.0), &mut rng).expect("scene");
        assert!(!scene.placement.is_complete());
        let verdict = SceneOracle::check_layout(&scene.graph, &scene.placement, config.separation);
        assert!(verdict.passed, "{:?}", verdict.violations);
    }

    // ── Routes ───────────────────────────────────────────────────────────────

    #[test]
    fn route_with_wrong_total_is_flagged() {
        let graph = triangle();
        let bad = [solution("A", "C", route(7.0, &["A", "B", "C"]))];
        let verdict = SceneOracle::check_routes(&graph, &bad);
        assert!(matches!(
            &verdict.violations[0],
            InvariantViolation::BrokenRoute { detail, .. } if detail.contains("sum to 8")
        ));
    }

    #[test]
    fn route_through_missing_edge_is_flagged() {
        let graph = Graph::from_edges(["A", "B", "C"], &[("A", "B", 1.0)]);
        let bad = [solution("A", "C", route(2.0, &["A", "B", "C"]))];
        assert!(!SceneOracle::check_routes(&graph, &bad).passed);
    }

    // ── Optimality ───────────────────────────────────────────────────────────

    #[test]
    fn suboptimal_answer_is_caught_by_both_references() {
        let graph = triangle();
        let wrong = [solution("A", "C", route(100.0, &["A", "C"]))];

        let exhaustive = SceneOracle::check_exhaustive(&graph, &wrong, DEFAULT_EXHAUSTIVE_LIMIT);
        assert!(matches!(
            exhaustive.violations[0],
            InvariantViolation::NotOptimal { solver, expected, .. }
                if (solver - 100.0).abs() < f64::EPSILON && (expected - 8.0).abs() < f64::EPSILON
        ));

        let reference = SceneOracle::check_reference(&graph, &wrong);
        assert!(!reference.passed);
    }

    #[test]
    fn exhaustive_check_skips_large_graphs() {
        let graph = triangle();
        let wrong = [solution("A", "C", PathResult::Unreachable)];
        assert!(SceneOracle::check_exhaustive(&graph, &wrong, 2).passed);
    }

    #[test]
    fn unreachable_agrees_with_reference() {
        let mut graph = triangle();
        graph.add_node("D");
        let ok = [solution("A", "D", PathResult::Unreachable)];
        assert!(SceneOracle::check_reference(&graph, &ok).passed);
        assert!(SceneOracle::check_exhaustive(&graph, &ok, DEFAULT_EXHAUSTIVE_LIMIT).passed);
    }

    #[test]
    fn merge_accumulates_failures() {
        let a = OracleResult::from_violations(vec![InvariantViolation::SelfLoop { node: "A".into() }]);
        let b = OracleResult::pass();
        let c = OracleResult::from_violations(vec![InvariantViolation::SelfLoop { node: "B".into() }]);
        let merged = b.merge(a).merge(c);
        assert!(!merged.passed);
        assert_eq!(merged.violations.len(), 2);
    }
}
