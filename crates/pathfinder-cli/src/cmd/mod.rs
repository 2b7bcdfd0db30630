pub mod completions;
pub mod generate;
pub mod path;
pub mod render;
pub mod sim;
pub mod stats;

use anyhow::{Context, Result};
use clap::Args;
use pathfinder_core::rng::entropy_seed;
use pathfinder_core::{Bounds, Config, DeterministicRng, Scene};
use tracing::info;

/// Canvas and seed options shared by every scene-producing command.
#[derive(Args, Debug, Clone)]
pub struct SceneArgs {
    /// Seed for graph generation and layout; random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Canvas width.
    #[arg(long, default_value = "1600")]
    pub width: f64,

    /// Canvas height.
    #[arg(long, default_value = "900")]
    pub height: f64,
}

impl SceneArgs {
    pub const fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }
}

/// A scene together with the seed that reproduces it.
#[derive(Debug)]
pub struct SeededScene {
    pub seed: u64,
    pub scene: Scene,
}

/// Generate the scene described by `args` under `config`.
///
/// # Errors
///
/// Returns an error when the config is invalid or the canvas is smaller
/// than the margins.
pub fn build_scene(args: &SceneArgs, config: &Config) -> Result<SeededScene> {
    let seed = args.seed.unwrap_or_else(entropy_seed);
    let mut rng = DeterministicRng::new(seed);
    let scene = Scene::generate(config, args.bounds(), &mut rng)
        .with_context(|| format!("generating scene for seed {seed}"))?;
    info!(seed, "scene ready");
    Ok(SeededScene { seed, scene })
}

/// `A..J` style summary of the labels in a scene.
pub fn label_range(scene: &Scene) -> String {
    let mut labels = scene.graph.nodes();
    match (labels.next(), labels.last()) {
        (Some(first), Some(last)) => format!("{first}..{last}"),
        (Some(only), None) => only.to_owned(),
        _ => String::from("(none)"),
    }
}
