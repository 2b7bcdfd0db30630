//! `pf sim`: deterministic simulation campaign commands.
//!
//! `pf sim run`: check every invariant across a range of seeds.
//! `pf sim replay`: rerun one seed with full details.

use std::process;

use anyhow::Result;
use clap::{Args, Subcommand};
use pathfinder_core::Config;
use pathfinder_sim::campaign::{CampaignConfig, format_violation, replay_seed, run_campaign};
use pathfinder_sim::oracle::DEFAULT_EXHAUSTIVE_LIMIT;
use serde::Serialize;

use crate::output::{OutputMode, pretty_kv, pretty_section};

/// Top-level arguments for `pf sim`.
#[derive(Args, Debug)]
pub struct SimArgs {
    #[command(subcommand)]
    pub command: SimCommand,
}

/// Simulation subcommands.
#[derive(Subcommand, Debug)]
pub enum SimCommand {
    /// Run a campaign across multiple seeds.
    #[command(
        about = "Run a simulation campaign across multiple seeds",
        long_about = "Generate, lay out and solve one scene per seed, checking symmetry, edge\n\
                      bounds, circle separation, route consistency and optimality against\n\
                      brute force and petgraph. Reports the first failing seed for replay.",
        after_help = "EXAMPLES:\n    # Run 100 seeds with the resolved config\n    pf sim run --seeds 100\n\n\
                      # Cramp the canvas to exercise partial layouts\n    pf sim run --seeds 200 --width 300 --height 300\n\n\
                      # Machine-readable output\n    pf sim run --seeds 100 --format json"
    )]
    Run(SimRunArgs),

    /// Replay a single seed.
    #[command(
        about = "Replay a single seed with detailed output",
        long_about = "Rerun one seed and print the scene fingerprint, oracle verdict and every\n\
                      violation. Use after a campaign failure to debug.",
        after_help = "EXAMPLES:\n    # Replay seed 42\n    pf sim replay --seed 42\n\n\
                      # Machine-readable output\n    pf sim replay --seed 42 --format json"
    )]
    Replay(SimReplayArgs),
}

/// Canvas and oracle options shared by both subcommands.
#[derive(Args, Debug, Clone)]
pub struct SimCanvasArgs {
    /// Canvas width.
    #[arg(long, default_value = "1600")]
    pub width: f64,

    /// Canvas height.
    #[arg(long, default_value = "900")]
    pub height: f64,

    /// Brute-force paths on graphs with at most this many nodes.
    #[arg(long, default_value_t = DEFAULT_EXHAUSTIVE_LIMIT)]
    pub exhaustive_limit: usize,
}

/// Arguments for `pf sim run`.
#[derive(Args, Debug)]
pub struct SimRunArgs {
    /// Number of seeds to run.
    #[arg(long, default_value = "100")]
    pub seeds: u64,

    /// Starting seed value.
    #[arg(long, default_value = "0")]
    pub seed_start: u64,

    #[command(flatten)]
    pub canvas: SimCanvasArgs,
}

/// Arguments for `pf sim replay`.
#[derive(Args, Debug)]
pub struct SimReplayArgs {
    /// Seed to replay.
    #[arg(long)]
    pub seed: u64,

    #[command(flatten)]
    pub canvas: SimCanvasArgs,
}

/// JSON output for `pf sim run`.
#[derive(Debug, Serialize)]
struct RunOutput {
    seeds_run: usize,
    seeds_passed: usize,
    seeds_failed: usize,
    first_failure: Option<u64>,
    partial_layouts: usize,
    all_passed: bool,
    failures: Vec<FailureOutput>,
}

#[derive(Debug, Serialize)]
struct FailureOutput {
    seed: u64,
    violations: Vec<String>,
}

/// JSON output for `pf sim replay`.
#[derive(Debug, Serialize)]
struct ReplayOutput {
    seed: u64,
    nodes: usize,
    edges: usize,
    pairs: usize,
    reachable_pairs: usize,
    partial_layout: bool,
    unplaced: Vec<String>,
    oracle_passed: bool,
    violations: Vec<String>,
    fingerprint: u64,
}

fn build_campaign_config(
    seed_start: u64,
    seeds: u64,
    canvas: &SimCanvasArgs,
    config: &Config,
) -> CampaignConfig {
    CampaignConfig {
        seed_range: seed_start..seed_start.saturating_add(seeds),
        config: config.clone(),
        width: canvas.width,
        height: canvas.height,
        exhaustive_limit: canvas.exhaustive_limit,
    }
}

/// Execute `pf sim run`.
pub fn run_sim_run(args: &SimRunArgs, config: &Config, output: OutputMode) -> Result<()> {
    let campaign = build_campaign_config(args.seed_start, args.seeds, &args.canvas, config);
    let report = run_campaign(&campaign)?;

    let out = RunOutput {
        seeds_run: report.seeds_run,
        seeds_passed: report.seeds_passed,
        seeds_failed: report.failures.len(),
        first_failure: report.first_failure,
        partial_layouts: report.partial_layouts,
        all_passed: report.all_passed(),
        failures: report
            .failures
            .iter()
            .map(|f| FailureOutput {
                seed: f.seed,
                violations: f.violations.clone(),
            })
            .collect(),
    };

    match output {
        OutputMode::Json => {
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputMode::Text => {
            println!(
                "campaign seeds_run={} seed_start={} width={} height={}",
                out.seeds_run, args.seed_start, args.canvas.width, args.canvas.height
            );
            println!(
                "results passed={} failed={} partial_layouts={} all_passed={}",
                out.seeds_passed, out.seeds_failed, out.partial_layouts, out.all_passed
            );
            if let Some(first) = out.first_failure {
                for failure in out.failures.iter().take(5) {
                    println!(
                        "failure seed={} violations={}",
                        failure.seed,
                        failure.violations.len()
                    );
                }
                if out.failures.len() > 5 {
                    println!("failures_truncated count={}", out.failures.len() - 5);
                }
                println!("hint replay_seed={first}");
            }
        }
        OutputMode::Pretty => {
            let stdout = std::io::stdout();
            let mut w = stdout.lock();
            pretty_section(&mut w, "Simulation Campaign")?;
            pretty_kv(&mut w, "Seeds", out.seeds_run.to_string())?;
            pretty_kv(
                &mut w,
                "Canvas",
                format!("{} x {}", args.canvas.width, args.canvas.height),
            )?;
            pretty_kv(
                &mut w,
                "Results",
                format!(
                    "{} passed / {} failed ({} partial layouts)",
                    out.seeds_passed, out.seeds_failed, out.partial_layouts
                ),
            )?;

            match out.first_failure {
                None => pretty_kv(&mut w, "Status", "all seeds passed")?,
                Some(first) => {
                    pretty_kv(
                        &mut w,
                        "Status",
                        format!("{} failures (first at seed {first})", out.seeds_failed),
                    )?;
                    println!();
                    pretty_section(&mut w, "Failure Samples")?;
                    for failure in out.failures.iter().take(5) {
                        println!("seed {:<8} violations={}", failure.seed, failure.violations.len());
                        for violation in &failure.violations {
                            println!("  - {violation}");
                        }
                    }
                    if out.failures.len() > 5 {
                        println!("... and {} more failures", out.failures.len() - 5);
                    }
                    println!();
                    pretty_kv(
                        &mut w,
                        "Replay",
                        format!(
                            "pf sim replay --seed {first} --width {} --height {}",
                            args.canvas.width, args.canvas.height
                        ),
                    )?;
                }
            }
        }
    }

    // Exit code 1 on any failure for CI integration
    if !report.all_passed() {
        process::exit(1);
    }

    Ok(())
}

/// Execute `pf sim replay`.
pub fn run_sim_replay(args: &SimReplayArgs, config: &Config, output: OutputMode) -> Result<()> {
    let campaign = build_campaign_config(args.seed, 1, &args.canvas, config);
    let trace = replay_seed(args.seed, &campaign)?;
    let result = &trace.result;

    let out = ReplayOutput {
        seed: args.seed,
        nodes: result.scene.graph.node_count(),
        edges: result.scene.graph.edge_count(),
        pairs: result.solutions.len(),
        reachable_pairs: result.reachable_pairs(),
        partial_layout: result.partial_layout(),
        unplaced: result.scene.placement.unplaced().to_vec(),
        oracle_passed: trace.oracle.passed,
        violations: trace.oracle.violations.iter().map(format_violation).collect(),
        fingerprint: result.fingerprint(),
    };

    match output {
        OutputMode::Json => {
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputMode::Text => {
            println!(
                "replay seed={} nodes={} edges={} width={} height={}",
                out.seed, out.nodes, out.edges, args.canvas.width, args.canvas.height
            );
            println!(
                "result oracle_passed={} pairs={} reachable_pairs={} partial_layout={} fingerprint={:016x}",
                out.oracle_passed,
                out.pairs,
                out.reachable_pairs,
                out.partial_layout,
                out.fingerprint
            );
            for violation in &out.violations {
                println!("violation={violation}");
            }
        }
        OutputMode::Pretty => {
            let stdout = std::io::stdout();
            let mut w = stdout.lock();
            pretty_section(&mut w, &format!("Replay Seed {}", out.seed))?;
            pretty_kv(&mut w, "Nodes", out.nodes.to_string())?;
            pretty_kv(&mut w, "Edges", out.edges.to_string())?;
            pretty_kv(
                &mut w,
                "Pairs",
                format!("{} ({} reachable)", out.pairs, out.reachable_pairs),
            )?;
            pretty_kv(
                &mut w,
                "Layout",
                if out.partial_layout {
                    format!("partial, unplaced: {}", out.unplaced.join(", "))
                } else {
                    "complete".to_string()
                },
            )?;
            pretty_kv(&mut w, "Fingerprint", format!("{:016x}", out.fingerprint))?;
            pretty_kv(&mut w, "Oracle", out.oracle_passed.to_string())?;

            if !out.oracle_passed {
                println!();
                pretty_section(&mut w, "Invariant Violations")?;
                for violation in &out.violations {
                    println!("- {violation}");
                }
            }
        }
    }

    if !trace.oracle.passed {
        process::exit(1);
    }

    Ok(())
}

/// Dispatch `pf sim` subcommands.
pub fn run_sim(args: &SimArgs, config: &Config, output: OutputMode) -> Result<()> {
    match &args.command {
        SimCommand::Run(run_args) => run_sim_run(run_args, config, output),
        SimCommand::Replay(replay_args) => run_sim_replay(replay_args, config, output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn campaign_config_covers_requested_seeds() {
        let canvas = SimCanvasArgs {
            width: 800.0,
            height: 600.0,
            exhaustive_limit: 6,
        };
        let campaign = build_campaign_config(10, 5, &canvas, &Config::default());
        assert_eq!(campaign.seed_range, 10..15);
        assert_eq!(campaign.exhaustive_limit, 6);
        assert!((campaign.width - 800.0).abs() < f64::EPSILON);
        assert!(campaign.validate().is_ok());
    }

    #[test]
    fn zero_seeds_fails_validation() {
        let canvas = SimCanvasArgs {
            width: 800.0,
            height: 600.0,
            exhaustive_limit: 6,
        };
        let campaign = build_campaign_config(3, 0, &canvas, &Config::default());
        assert!(campaign.validate().is_err());
    }
}
