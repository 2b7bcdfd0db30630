//! Known-answer scenarios for generation, solving and layout.
//!
//! Each test pins one concrete input with a hand-checked expected output.

use pathfinder_core::graph::{GraphBuilder, choose_edge_count, choose_node_count};
use pathfinder_core::layout::{Bounds, LayoutEngine, Placement};
use pathfinder_core::rng::{DeterministicRng, RecordingSource};
use pathfinder_core::{Config, EdgeKey, Graph, LabelAllocator, PathResult, shortest_path};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn triangle() -> Graph {
    Graph::from_edges(
        ["A", "B", "C"],
        &[("A", "B", 5.0), ("B", "C", 3.0), ("A", "C", 100.0)],
    )
}

fn edge_strings(result: &PathResult) -> Vec<String> {
    result.edges().iter().map(EdgeKey::to_string).collect()
}

// ---------------------------------------------------------------------------
// Solver
// ---------------------------------------------------------------------------

#[test]
fn triangle_prefers_two_light_edges() {
    let result = shortest_path(&triangle(), "A", "C").expect("known nodes");
    assert!((result.distance() - 8.0).abs() < f64::EPSILON);
    assert_eq!(edge_strings(&result), vec!["A-B", "B-C"]);
}

#[test]
fn isolated_node_is_unreachable() {
    let mut graph = triangle();
    graph.add_node("D");
    let result = shortest_path(&graph, "A", "D").expect("known nodes");
    assert_eq!(result, PathResult::Unreachable);
    assert!(result.distance().is_infinite());
    assert!(result.route().is_none());
}

#[test]
fn every_node_reaches_itself_at_zero() {
    let mut graph = triangle();
    graph.add_node("D");
    for label in ["A", "B", "C", "D"] {
        let result = shortest_path(&graph, label, label).expect("known node");
        assert!(result.distance().abs() < f64::EPSILON);
        assert!(result.edges().is_empty());
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

#[test]
fn fixed_node_range_is_constant() {
    let mut rng = DeterministicRng::new(0);
    for _ in 0..50 {
        assert_eq!(choose_node_count(10, 10, &mut rng), Ok(10));
    }
}

#[test]
fn five_labels_from_the_alphabet() {
    let labels = LabelAllocator::default().allocate(5).expect("five labels");
    assert_eq!(labels, vec!["A", "B", "C", "D", "E"]);
}

#[test]
fn ten_nodes_default_density_edge_count() {
    let mut rng = DeterministicRng::new(10);
    for _ in 0..500 {
        let count = choose_edge_count(10, 1.3, &mut rng);
        assert!((9..=45).contains(&count), "got {count}");
    }
}

#[test]
fn default_config_graph_is_simple_and_symmetric() {
    let config = Config::default();
    let mut rng = DeterministicRng::new(2024);
    let graph = GraphBuilder::new(&config).generate(&mut rng).expect("graph");
    let n = graph.node_count();
    assert!((10..=22).contains(&n));
    assert!(graph.edge_count() >= n - 1);
    for (key, w) in graph.edges() {
        let (u, v) = key.endpoints();
        assert_ne!(u, v);
        assert_eq!(graph.weight(u, v), Some(w));
        assert_eq!(graph.weight(v, u), Some(w));
        assert!((1.0..=100.0).contains(&w));
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

#[test]
fn two_circles_on_a_tiny_canvas_stop_at_the_budget() {
    let config = Config {
        separation: 50.0,
        radius: 25.0,
        x_offset: 0.0,
        y_offset: 0.0,
        max_iterations: 10_000,
        ..Config::default()
    };
    let mut rng = DeterministicRng::new(6);
    let placement = LayoutEngine::from(&config)
        .place(&["A", "B"], Bounds::new(40.0, 40.0), &mut rng)
        .expect("valid bounds");
    match placement {
        Placement::Partial { layout, unplaced } => {
            assert_eq!(unplaced, vec!["B"]);
            assert_eq!(layout.circles.len(), 1);
            assert_eq!(layout.rejected, 10_000);
        }
        Placement::Complete(_) => panic!("B cannot fit 100 units away on a 40x40 canvas"),
    }
}

// ---------------------------------------------------------------------------
// Determinism
// ---------------------------------------------------------------------------

#[test]
fn replayed_draws_rebuild_identical_graph_and_layout() {
    let config = Config::default();
    let bounds = Bounds::new(1_600.0, 900.0);

    let mut recorder = RecordingSource::new(DeterministicRng::new(77));
    let graph = GraphBuilder::new(&config).generate(&mut recorder).expect("graph");
    let labels: Vec<&str> = graph.nodes().collect();
    let placement = LayoutEngine::from(&config)
        .place(&labels, bounds, &mut recorder)
        .expect("layout");

    let mut replay = recorder.into_replay();
    let graph_again = GraphBuilder::new(&config).generate(&mut replay).expect("graph");
    let placement_again = LayoutEngine::from(&config)
        .place(&labels, bounds, &mut replay)
        .expect("layout");

    assert_eq!(graph, graph_again);
    assert_eq!(placement, placement_again);
    for (label, circle) in &placement.layout().circles {
        let other = placement_again.layout().circle(label).expect("same labels");
        assert_eq!(circle.x.to_bits(), other.x.to_bits());
        assert_eq!(circle.y.to_bits(), other.y.to_bits());
    }
}
