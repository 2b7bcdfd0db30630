//! `pf path`: shortest route between two labels of a generated graph.

use std::io::Write;

use anyhow::{Result, bail};
use clap::Args;
use pathfinder_core::render::format_weight;
use pathfinder_core::{Config, PathResult};
use serde::Serialize;

use super::{SceneArgs, SeededScene, build_scene, label_range};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};
use crate::query::{Query, parse_query};

/// Arguments for `pf path`.
#[derive(Args, Debug)]
pub struct PathArgs {
    /// Route query, e.g. "a to c", "A-C" or "a,c".
    #[arg(value_name = "QUERY")]
    pub query: String,

    #[command(flatten)]
    pub scene: SceneArgs,
}

/// JSON output for `pf path`.
#[derive(Debug, Serialize)]
pub struct PathOutput {
    pub seed: u64,
    pub start: String,
    pub end: String,
    #[serde(flatten)]
    pub result: PathResult,
}

/// Solve `query` against an already generated scene.
///
/// # Errors
///
/// Returns an error naming the valid label range when either endpoint is
/// not a node of the scene.
pub fn solve_query(seeded: &SeededScene, query: &Query) -> Result<PathOutput> {
    let result = match seeded.scene.solve(&query.start, &query.end) {
        Ok(result) => result,
        Err(err) => bail!(
            "{err}; this graph has labels {}",
            label_range(&seeded.scene)
        ),
    };
    Ok(PathOutput {
        seed: seeded.seed,
        start: query.start.clone(),
        end: query.end.clone(),
        result,
    })
}

fn render_text(out: &PathOutput, w: &mut dyn Write) -> std::io::Result<()> {
    match &out.result {
        PathResult::Reachable(route) => {
            writeln!(
                w,
                "path seed={} start={} end={} status=reachable distance={}",
                out.seed,
                out.start,
                out.end,
                format_weight(route.distance)
            )?;
            writeln!(w, "nodes {}", route.nodes.join(" "))?;
            for key in &route.edges {
                writeln!(w, "edge {key}")?;
            }
        }
        PathResult::Unreachable => writeln!(
            w,
            "path seed={} start={} end={} status=unreachable",
            out.seed, out.start, out.end
        )?,
    }
    Ok(())
}

fn render_pretty(out: &PathOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("{} to {} (seed {})", out.start, out.end, out.seed))?;
    match &out.result {
        PathResult::Reachable(route) => {
            pretty_kv(w, "Distance", format_weight(route.distance))?;
            pretty_kv(w, "Route", route.nodes.join(" -> "))?;
            pretty_kv(w, "Hops", route.edges.len().to_string())?;
        }
        PathResult::Unreachable => {
            pretty_kv(w, "Distance", "unreachable")?;
        }
    }
    Ok(())
}

/// Execute `pf path`.
pub fn run_path(args: &PathArgs, config: &Config, output: OutputMode) -> Result<()> {
    let query = parse_query(&args.query)?;
    let seeded = build_scene(&args.scene, config)?;
    let out = solve_query(&seeded, &query)?;
    render_mode(output, &out, render_text, render_pretty)
}
