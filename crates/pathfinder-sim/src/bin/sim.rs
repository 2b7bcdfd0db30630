#![forbid(unsafe_code)]

use anyhow::Result;
use pathfinder_sim::campaign::{CampaignConfig, run_campaign};

fn main() -> Result<()> {
    let config = CampaignConfig::default();
    let report = run_campaign(&config)?;

    println!(
        "campaign complete: seeds_run={} passed={} partial_layouts={} first_failure={:?}",
        report.seeds_run, report.seeds_passed, report.partial_layouts, report.first_failure
    );

    if !report.all_passed() {
        std::process::exit(1);
    }
    Ok(())
}
