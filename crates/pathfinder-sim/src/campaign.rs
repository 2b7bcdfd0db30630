//! Campaign runner for deterministic simulation campaigns.
//!
//! Executes many seeds against one generation config, collecting pass/fail
//! results and identifying the first failing seed for replay.

use std::ops::Range;

use anyhow::{Context, Result, bail};
use pathfinder_core::{Bounds, Config};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::oracle::{DEFAULT_EXHAUSTIVE_LIMIT, InvariantViolation, OracleResult, SceneOracle};
use crate::{SimulationConfig, SimulationResult, simulate};

/// Campaign-level configuration controlling how many seeds to run and
/// what generation parameters to use for each seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignConfig {
    /// Range of seeds to execute, e.g., `0..100`.
    pub seed_range: Range<u64>,
    /// Generation and layout parameters shared by every seed.
    pub config: Config,
    /// Canvas width handed to the layout engine.
    pub width: f64,
    /// Canvas height handed to the layout engine.
    pub height: f64,
    /// Graphs with at most this many nodes are also brute-forced.
    pub exhaustive_limit: usize,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            seed_range: 0..100,
            config: Config::default(),
            width: 1_600.0,
            height: 900.0,
            exhaustive_limit: DEFAULT_EXHAUSTIVE_LIMIT,
        }
    }
}

impl CampaignConfig {
    /// Build a [`SimulationConfig`] for a specific seed.
    #[must_use]
    pub fn sim_config_for_seed(&self, seed: u64) -> SimulationConfig {
        SimulationConfig {
            seed,
            config: self.config.clone(),
            bounds: Bounds::new(self.width, self.height),
        }
    }

    /// Validate configuration before running.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of valid range.
    pub fn validate(&self) -> Result<()> {
        if self.seed_range.is_empty() {
            bail!("seed_range must not be empty");
        }
        if !(self.width.is_finite() && self.width > 0.0) {
            bail!("width must be > 0 (got {})", self.width);
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            bail!("height must be > 0 (got {})", self.height);
        }
        self.config
            .validate()
            .context("invalid generation config")?;
        Ok(())
    }
}

/// What happened to one seed.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedOutcome {
    pub seed: u64,
    /// The layout ran out of budget before placing every node.
    pub partial_layout: bool,
    /// Empty when every invariant held.
    pub violations: Vec<InvariantViolation>,
}

impl SeedOutcome {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Failure details for a single seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedFailure {
    /// The seed that failed.
    pub seed: u64,
    /// Invariant violations found.
    pub violations: Vec<String>,
}

/// Aggregate report produced by a campaign run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignReport {
    /// Total seeds executed.
    pub seeds_run: usize,
    /// Seeds that passed all invariants.
    pub seeds_passed: usize,
    /// First seed that failed (for prioritized replay).
    pub first_failure: Option<u64>,
    /// All seed failures with violation details.
    pub failures: Vec<SeedFailure>,
    /// Seeds whose layout came back partial.
    pub partial_layouts: usize,
}

impl CampaignReport {
    /// True if every seed passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Detailed trace produced by replaying a single seed.
#[derive(Debug, Clone)]
pub struct DetailedTrace {
    /// The scene and every pair solution.
    pub result: SimulationResult,
    /// Oracle check result with violation details.
    pub oracle: OracleResult,
}

/// Run a full campaign across all seeds in the config.
///
/// # Errors
///
/// Returns an error if config validation fails or a seed cannot be
/// simulated at all.
pub fn run_campaign(config: &CampaignConfig) -> Result<CampaignReport> {
    config.validate()?;

    let mut seeds_run = 0_usize;
    let mut seeds_passed = 0_usize;
    let mut first_failure: Option<u64> = None;
    let mut failures = Vec::new();
    let mut partial_layouts = 0_usize;

    for seed in config.seed_range.clone() {
        seeds_run += 1;

        let outcome = run_single_seed(seed, config)?;
        if outcome.partial_layout {
            partial_layouts += 1;
        }
        if outcome.passed() {
            seeds_passed += 1;
        } else {
            warn!(seed, violations = outcome.violations.len(), "seed failed");
            if first_failure.is_none() {
                first_failure = Some(seed);
            }
            failures.push(SeedFailure {
                seed,
                violations: outcome.violations.iter().map(format_violation).collect(),
            });
        }
    }

    info!(
        seeds_run,
        seeds_passed,
        partial_layouts,
        "campaign finished"
    );

    Ok(CampaignReport {
        seeds_run,
        seeds_passed,
        first_failure,
        failures,
        partial_layouts,
    })
}

/// Run a single seed through generation, layout, solving and the oracle.
///
/// # Errors
///
/// Returns an error if the seed cannot be simulated (invalid config, bounds
/// too small for the margins). Invariant violations are not errors; they
/// come back inside the [`SeedOutcome`].
pub fn run_single_seed(seed: u64, config: &CampaignConfig) -> Result<SeedOutcome> {
    let result = simulate(&config.sim_config_for_seed(seed))?;
    let oracle = SceneOracle::check_all(&result, &config.config, config.exhaustive_limit);
    Ok(SeedOutcome {
        seed,
        partial_layout: result.partial_layout(),
        violations: oracle.violations,
    })
}

/// Replay a single seed with full details for debugging.
///
/// # Errors
///
/// Returns an error when config validation or simulation fails.
pub fn replay_seed(seed: u64, config: &CampaignConfig) -> Result<DetailedTrace> {
    config.validate()?;

    let result = simulate(&config.sim_config_for_seed(seed))?;
    let oracle = SceneOracle::check_all(&result, &config.config, config.exhaustive_limit);

    Ok(DetailedTrace { result, oracle })
}

/// Format an invariant violation into a human-readable string.
#[must_use]
pub fn format_violation(v: &InvariantViolation) -> String {
    match v {
        InvariantViolation::Asymmetric {
            u,
            v,
            forward,
            backward,
        } => format!("Asymmetric: {u}->{v} is {forward:?} but {v}->{u} is {backward:?}"),
        InvariantViolation::SelfLoop { node } => format!("SelfLoop: {node} is its own neighbor"),
        InvariantViolation::EdgeCount {
            nodes,
            edges,
            min,
            max,
        } => format!("EdgeCount: {edges} edges for {nodes} nodes (allowed {min}..={max})"),
        InvariantViolation::Weight {
            edge,
            weight,
            w_min,
            w_max,
        } => format!("Weight: {edge} has weight {weight} (allowed {w_min}..={w_max})"),
        InvariantViolation::Overlap {
            a,
            b,
            distance,
            required,
        } => format!("Overlap: {a} and {b} are {distance:.3} apart (need {required:.3})"),
        InvariantViolation::Unplaced {
            nodes,
            placed,
            unplaced,
        } => format!("Unplaced: {placed} placed + {unplaced} unplaced != {nodes} nodes"),
        InvariantViolation::BrokenRoute { start, end, detail } => {
            format!("BrokenRoute: {start}->{end}: {detail}")
        }
        InvariantViolation::NotOptimal {
            start,
            end,
            solver,
            expected,
        } => format!("NotOptimal: {start}->{end} solver={solver} brute_force={expected}"),
        InvariantViolation::ReferenceMismatch {
            start,
            end,
            solver,
            reference,
        } => format!("ReferenceMismatch: {start}->{end} solver={solver} petgraph={reference}"),
    }
}
