//! `pf stats`: structural statistics for a generated graph.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use pathfinder_core::{Config, GraphStats};
use serde::Serialize;

use super::{SceneArgs, build_scene};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `pf stats`.
#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub scene: SceneArgs,
}

/// JSON output for `pf stats`.
#[derive(Debug, Serialize)]
struct StatsOutput {
    seed: u64,
    #[serde(flatten)]
    stats: GraphStats,
    connected: bool,
    unplaced: usize,
}

fn render_text(out: &StatsOutput, w: &mut dyn Write) -> std::io::Result<()> {
    let s = &out.stats;
    writeln!(
        w,
        "stats seed={} nodes={} edges={} density={:.3} components={} isolated={} max_degree={} total_weight={} connected={} unplaced={}",
        out.seed,
        s.node_count,
        s.edge_count,
        s.density,
        s.component_count,
        s.isolated_node_count,
        s.max_degree,
        s.total_weight,
        out.connected,
        out.unplaced
    )
}

fn render_pretty(out: &StatsOutput, w: &mut dyn Write) -> std::io::Result<()> {
    let s = &out.stats;
    pretty_section(w, &format!("Graph Statistics (seed {})", out.seed))?;
    pretty_kv(w, "Nodes", s.node_count.to_string())?;
    pretty_kv(w, "Edges", s.edge_count.to_string())?;
    pretty_kv(w, "Density", format!("{:.3}", s.density))?;
    pretty_kv(
        w,
        "Components",
        format!(
            "{} ({})",
            s.component_count,
            if out.connected { "connected" } else { "disconnected" }
        ),
    )?;
    pretty_kv(w, "Isolated", s.isolated_node_count.to_string())?;
    pretty_kv(w, "Max degree", s.max_degree.to_string())?;
    pretty_kv(w, "Total weight", s.total_weight.to_string())?;
    if out.unplaced > 0 {
        pretty_kv(w, "Unplaced", out.unplaced.to_string())?;
    }
    Ok(())
}

/// Execute `pf stats`.
pub fn run_stats(args: &StatsArgs, config: &Config, output: OutputMode) -> Result<()> {
    let seeded = build_scene(&args.scene, config)?;
    let stats = seeded.scene.stats();
    let out = StatsOutput {
        seed: seeded.seed,
        connected: stats.is_connected(),
        stats,
        unplaced: seeded.scene.placement.unplaced().len(),
    };
    render_mode(output, &out, render_text, render_pretty)
}
