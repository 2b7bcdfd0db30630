//! `pf generate`: build one random graph and lay it out.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use pathfinder_core::Config;
use pathfinder_core::render::format_weight;
use serde::Serialize;

use super::{SceneArgs, SeededScene, build_scene};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `pf generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub scene: SceneArgs,
}

#[derive(Debug, Serialize)]
pub struct NodeOutput {
    pub label: String,
    /// `None` when the layout ran out of retries before reaching this node.
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub color: Option<&'static str>,
    pub degree: usize,
}

#[derive(Debug, Serialize)]
pub struct EdgeOutput {
    pub edge: String,
    pub weight: f64,
}

/// JSON output for `pf generate`.
#[derive(Debug, Serialize)]
pub struct GenerateOutput {
    pub seed: u64,
    pub width: f64,
    pub height: f64,
    pub complete: bool,
    pub rejected: usize,
    pub nodes: Vec<NodeOutput>,
    pub edges: Vec<EdgeOutput>,
    pub unplaced: Vec<String>,
}

impl GenerateOutput {
    pub fn from_scene(seeded: &SeededScene) -> Self {
        let SeededScene { seed, scene } = seeded;
        let layout = scene.placement.layout();
        let nodes = scene
            .graph
            .nodes()
            .map(|label| {
                let circle = layout.circle(label);
                NodeOutput {
                    label: label.to_owned(),
                    x: circle.map(|c| c.x),
                    y: circle.map(|c| c.y),
                    color: circle.map(|c| c.color),
                    degree: scene.graph.degree(label),
                }
            })
            .collect();
        let edges = scene
            .graph
            .edges()
            .map(|(key, weight)| EdgeOutput {
                edge: key.to_string(),
                weight,
            })
            .collect();
        Self {
            seed: *seed,
            width: scene.bounds.width,
            height: scene.bounds.height,
            complete: scene.placement.is_complete(),
            rejected: layout.rejected,
            nodes,
            edges,
            unplaced: scene.placement.unplaced().to_vec(),
        }
    }
}

fn render_text(out: &GenerateOutput, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(
        w,
        "scene seed={} nodes={} edges={} complete={} rejected={}",
        out.seed,
        out.nodes.len(),
        out.edges.len(),
        out.complete,
        out.rejected
    )?;
    for node in &out.nodes {
        match (node.x, node.y) {
            (Some(x), Some(y)) => writeln!(
                w,
                "node label={} x={x:.1} y={y:.1} degree={}",
                node.label, node.degree
            )?,
            _ => writeln!(w, "node label={} unplaced degree={}", node.label, node.degree)?,
        }
    }
    for edge in &out.edges {
        writeln!(w, "edge {} weight={}", edge.edge, format_weight(edge.weight))?;
    }
    Ok(())
}

fn render_pretty(out: &GenerateOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Scene (seed {})", out.seed))?;
    pretty_kv(w, "Canvas", format!("{} x {}", out.width, out.height))?;
    pretty_kv(w, "Nodes", out.nodes.len().to_string())?;
    pretty_kv(w, "Edges", out.edges.len().to_string())?;
    pretty_kv(
        w,
        "Layout",
        if out.complete {
            format!("complete ({} rejected candidates)", out.rejected)
        } else {
            format!("partial, unplaced: {}", out.unplaced.join(", "))
        },
    )?;
    writeln!(w)?;
    pretty_section(w, "Edges")?;
    for edge in &out.edges {
        writeln!(w, "{:<6} {:>8}", edge.edge, format_weight(edge.weight))?;
    }
    Ok(())
}

/// Execute `pf generate`.
pub fn run_generate(args: &GenerateArgs, config: &Config, output: OutputMode) -> Result<()> {
    let seeded = build_scene(&args.scene, config)?;
    let out = GenerateOutput::from_scene(&seeded);
    render_mode(output, &out, render_text, render_pretty)
}
