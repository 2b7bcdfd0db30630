#![forbid(unsafe_code)]

mod cmd;
mod output;
mod query;
mod settings;
mod svg;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "pf: random weighted graphs, non-overlapping layouts and shortest paths",
    long_about = None
)]
struct Cli {
    /// Output format (defaults to pretty on a TTY, text when piped).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Config file (overrides PATHFINDER_CONFIG and the user config).
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Scene",
        about = "Generate a random graph and lay it out",
        long_about = "Generate a random weighted undirected graph, place its nodes as\n\
                      non-overlapping circles and print nodes, positions and edges.",
        after_help = "EXAMPLES:\n    # Fresh random scene\n    pf generate\n\n    # Reproducible scene on a smaller canvas\n    pf generate --seed 42 --width 1024 --height 768\n\n    # Machine-readable output\n    pf generate --seed 42 --json"
    )]
    Generate(cmd::generate::GenerateArgs),

    #[command(
        next_help_heading = "Scene",
        about = "Shortest route between two nodes",
        long_about = "Generate a scene and report the shortest route for a query such as\n\
                      \"a to c\", \"A-C\" or \"a,c\". Unreachable targets are reported, not errors.",
        after_help = "EXAMPLES:\n    # Route from A to C\n    pf path \"a to c\" --seed 42\n\n    # Machine-readable output\n    pf path A-C --seed 42 --format json"
    )]
    Path(cmd::path::PathArgs),

    #[command(
        next_help_heading = "Scene",
        about = "Render a scene as SVG",
        long_about = "Draw the scene: edges with weights, circles with labels, and an optional\n\
                      highlighted route. Writes the SVG to stdout unless --output is given.",
        after_help = "EXAMPLES:\n    # SVG to stdout\n    pf render --seed 42 > scene.svg\n\n    # Highlight a route and write to a file\n    pf render --seed 42 --route \"a to f\" -o scene.svg"
    )]
    Render(cmd::render::RenderArgs),

    #[command(
        next_help_heading = "Scene",
        about = "Graph statistics",
        long_about = "Report node and edge counts, density, connected components, isolated\n\
                      nodes, maximum degree and total weight for a generated graph.",
        after_help = "EXAMPLES:\n    # Statistics for seed 42\n    pf stats --seed 42\n\n    # Machine-readable output\n    pf stats --seed 42 --json"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        next_help_heading = "Testing",
        about = "Deterministic simulation campaigns",
        after_help = "EXAMPLES:\n    # Check 500 seeds\n    pf sim run --seeds 500\n\n    # Replay a failing seed\n    pf sim replay --seed 17"
    )]
    Sim(cmd::sim::SimArgs),

    #[command(
        next_help_heading = "Shell",
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n    # Bash\n    pf completions bash > /etc/bash_completion.d/pf\n\n    # Zsh\n    pf completions zsh > \"${fpath[1]}/_pf\""
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("PATHFINDER_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "pathfinder=debug,info"
        } else {
            "pathfinder=info,warn"
        })
    });

    let format = env::var("PATHFINDER_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn run(cli: &Cli, output: OutputMode) -> anyhow::Result<()> {
    if let Commands::Completions(args) = &cli.command {
        let mut command = Cli::command();
        return cmd::completions::run_completions(args, &mut command);
    }

    let (config, source) = settings::resolve_config(cli.config.as_deref())?;
    debug!(%source, "using config");

    match &cli.command {
        Commands::Generate(args) => cmd::generate::run_generate(args, &config, output),
        Commands::Path(args) => cmd::path::run_path(args, &config, output),
        Commands::Render(args) => cmd::render::run_render(args, &config, output),
        Commands::Stats(args) => cmd::stats::run_stats(args, &config, output),
        Commands::Sim(args) => cmd::sim::run_sim(args, &config, output),
        Commands::Completions(_) => Ok(()),
    }
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let output = cli.output_mode();

    match run(&cli, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let mut error = CliError::from_anyhow(&err);
            if let Some(unreadable) = err
                .chain()
                .find_map(|cause| cause.downcast_ref::<query::UnreadableQuery>())
            {
                error = error.with_suggestion(unreadable.suggestion());
            }
            if render_error(output, &error).is_err() {
                eprintln!("error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}
