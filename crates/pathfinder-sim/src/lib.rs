#![forbid(unsafe_code)]
//! pathfinder-sim library.
//!
//! Seeded simulation runs: every seed builds one scene, solves every ordered
//! pair of its nodes, and hands the result to the [`oracle`] for checking.
//! [`campaign`] sweeps a seed range and reports the first failure for replay.
//!
//! # Conventions
//!
//! - **Errors**: Use `anyhow::Result` for return types.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`, `trace!`).

pub mod campaign;
pub mod oracle;

use anyhow::{Context, Result};
use pathfinder_core::{Bounds, Config, DeterministicRng, PathResult, Scene};
use serde::Serialize;
use tracing::debug;

/// Parameters for a single seeded run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub seed: u64,
    pub config: Config,
    pub bounds: Bounds,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            config: Config::default(),
            bounds: Bounds::new(1_600.0, 900.0),
        }
    }
}

/// The solver's answer for one ordered `(start, end)` pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairSolution {
    pub start: String,
    pub end: String,
    pub result: PathResult,
}

/// Everything one seeded run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub seed: u64,
    pub scene: Scene,
    pub solutions: Vec<PairSolution>,
}

impl SimulationResult {
    /// Number of ordered pairs with a route.
    #[must_use]
    pub fn reachable_pairs(&self) -> usize {
        self.solutions
            .iter()
            .filter(|s| s.result.is_reachable())
            .count()
    }

    /// Whether the layout ran out of budget before placing every node.
    #[must_use]
    pub const fn partial_layout(&self) -> bool {
        !self.scene.placement.is_complete()
    }

    /// Stable FNV-1a digest of the graph, the layout and every distance.
    ///
    /// Two runs of the same seed and config produce the same fingerprint.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
        const PRIME: u64 = 0x0000_0100_0000_01b3;

        let mut hash = OFFSET;
        let mut feed = |bytes: &[u8]| {
            for b in bytes {
                hash ^= u64::from(*b);
                hash = hash.wrapping_mul(PRIME);
            }
        };

        for (key, w) in self.scene.graph.edges() {
            feed(key.low().as_bytes());
            feed(key.high().as_bytes());
            feed(&w.to_bits().to_le_bytes());
        }
        for (label, circle) in &self.scene.placement.layout().circles {
            feed(label.as_bytes());
            feed(&circle.x.to_bits().to_le_bytes());
            feed(&circle.y.to_bits().to_le_bytes());
        }
        for solution in &self.solutions {
            feed(&solution.result.distance().to_bits().to_le_bytes());
        }
        hash
    }
}

/// Build the scene for `config.seed` and solve every ordered pair.
///
/// # Errors
///
/// Returns an error when the scene cannot be generated or a solver call
/// rejects one of the scene's own labels.
pub fn simulate(config: &SimulationConfig) -> Result<SimulationResult> {
    let mut rng = DeterministicRng::new(config.seed);
    let scene = Scene::generate(&config.config, config.bounds, &mut rng)
        .with_context(|| format!("seed {}: scene generation failed", config.seed))?;

    let labels: Vec<&str> = scene.graph.nodes().collect();
    let mut solutions = Vec::with_capacity(labels.len() * labels.len());
    for &start in &labels {
        for &end in &labels {
            let result = scene
                .solve(start, end)
                .with_context(|| format!("seed {}: solving {start} -> {end}", config.seed))?;
            solutions.push(PairSolution {
                start: start.to_owned(),
                end: end.to_owned(),
                result,
            });
        }
    }

    debug!(
        seed = config.seed,
        nodes = labels.len(),
        pairs = solutions.len(),
        "simulation finished"
    );

    Ok(SimulationResult {
        seed: config.seed,
        scene,
        solutions,
    })
}
