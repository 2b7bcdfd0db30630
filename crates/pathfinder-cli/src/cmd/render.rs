//! `pf render`: draw a generated scene as SVG.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use pathfinder_core::Config;
use pathfinder_core::render::render_scene;
use serde::Serialize;

use super::path::solve_query;
use super::{SceneArgs, SeededScene, build_scene};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};
use crate::query::parse_query;
use crate::svg::SvgCanvas;

/// Arguments for `pf render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Highlight the shortest route for this query, e.g. "a to c".
    #[arg(long, value_name = "QUERY")]
    pub route: Option<String>,

    /// Write the SVG here instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub scene: SceneArgs,
}

/// Summary printed when the SVG goes to a file.
#[derive(Debug, Serialize)]
pub struct RenderOutput {
    pub seed: u64,
    pub path: PathBuf,
    pub bytes: usize,
    pub highlighted: Option<String>,
    pub unplaced: Vec<String>,
}

/// Draw `seeded`, optionally highlighting the route for `route_query`.
///
/// # Errors
///
/// Returns an error when the query cannot be parsed or names labels that
/// are not in the scene.
pub fn draw(seeded: &SeededScene, config: &Config, route_query: Option<&str>) -> Result<(String, Option<String>)> {
    let solved = route_query
        .map(|raw| parse_query(raw).and_then(|q| solve_query(seeded, &q)))
        .transpose()?;
    let route = solved.as_ref().and_then(|s| s.result.route());

    let scene = &seeded.scene;
    let mut canvas = SvgCanvas::new(scene.bounds.width, scene.bounds.height);
    render_scene(
        &mut canvas,
        &scene.graph,
        scene.placement.layout(),
        route,
        config.draw_adjust,
    );
    let highlighted = route.map(|r| r.nodes.join("-"));
    Ok((canvas.finish(), highlighted))
}

fn render_text(out: &RenderOutput, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(
        w,
        "render seed={} path={} bytes={} highlighted={} unplaced={}",
        out.seed,
        out.path.display(),
        out.bytes,
        out.highlighted.as_deref().unwrap_or("none"),
        out.unplaced.len()
    )
}

fn render_pretty(out: &RenderOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Rendered seed {}", out.seed))?;
    pretty_kv(w, "File", out.path.display().to_string())?;
    pretty_kv(w, "Size", format!("{} bytes", out.bytes))?;
    pretty_kv(w, "Route", out.highlighted.as_deref().unwrap_or("none"))?;
    if !out.unplaced.is_empty() {
        pretty_kv(w, "Unplaced", out.unplaced.join(", "))?;
    }
    Ok(())
}

/// Execute `pf render`.
pub fn run_render(args: &RenderArgs, config: &Config, output: OutputMode) -> Result<()> {
    let seeded = build_scene(&args.scene, config)?;
    let (svg, highlighted) = draw(&seeded, config, args.route.as_deref())?;

    let Some(path) = &args.output else {
        std::io::stdout().lock().write_all(svg.as_bytes())?;
        return Ok(());
    };

    std::fs::write(path, &svg).with_context(|| format!("writing {}", path.display()))?;
    let out = RenderOutput {
        seed: seeded.seed,
        path: path.clone(),
        bytes: svg.len(),
        highlighted,
        unplaced: seeded.scene.placement.unplaced().to_vec(),
    };
    render_mode(output, &out, render_text, render_pretty)
}
