//! `pf completions`: shell completion scripts.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use clap_complete::{Shell, generate};

/// Binary name completions are generated for.
const BIN_NAME: &str = "pf";

/// Arguments for `pf completions`.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Write the completion script for `args.shell` into `out`.
pub fn write_completions(args: &CompletionsArgs, command: &mut clap::Command, out: &mut dyn Write) {
    generate(args.shell, command, BIN_NAME, out);
}

/// Execute `pf completions`.
pub fn run_completions(args: &CompletionsArgs, command: &mut clap::Command) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_completions(args, command, &mut out);
    out.flush()?;
    Ok(())
}
