//! E2E tests for `pf sim run` and `pf sim replay`.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

fn pf_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("pf"));
    cmd.current_dir(home);
    cmd.env("PATHFINDER_LOG", "error");
    cmd.env("XDG_CONFIG_HOME", home);
    cmd.env_remove("PATHFINDER_CONFIG");
    cmd.env_remove("FORMAT");
    cmd
}

#[test]
fn sim_run_json_all_pass() {
    let dir = TempDir::new().expect("tempdir");
    let output = pf_cmd(dir.path())
        .args(["sim", "run", "--seeds", "20", "--json"])
        .output()
        .expect("sim run should not crash");
    assert!(
        output.status.success(),
        "sim run failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let report: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(report["seeds_run"], 20);
    assert_eq!(report["seeds_passed"], 20);
    assert_eq!(report["all_passed"], true);
    assert!(report["first_failure"].is_null());
}

#[test]
fn sim_run_on_cramped_canvas_counts_partial_layouts() {
    let dir = TempDir::new().expect("tempdir");
    let output = pf_cmd(dir.path())
        .args([
            "sim", "run", "--seeds", "5", "--width", "300", "--height", "300", "--json",
        ])
        .output()
        .expect("run");
    assert!(output.status.success());
    let report: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(report["partial_layouts"], 5);
    assert_eq!(report["all_passed"], true);
}

#[test]
fn sim_run_text_summary() {
    let dir = TempDir::new().expect("tempdir");
    pf_cmd(dir.path())
        .args(["sim", "run", "--seeds", "3", "--seed-start", "100", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("campaign seeds_run=3 seed_start=100"))
        .stdout(predicate::str::contains("all_passed=true"));
}

#[test]
fn sim_replay_is_deterministic() {
    let dir = TempDir::new().expect("tempdir");
    let run = || {
        let output = pf_cmd(dir.path())
            .args(["sim", "replay", "--seed", "17", "--json"])
            .output()
            .expect("replay");
        assert!(output.status.success());
        serde_json::from_slice::<Value>(&output.stdout).expect("valid JSON")
    };
    let first = run();
    let second = run();
    assert_eq!(first["oracle_passed"], true);
    assert_eq!(first["fingerprint"], second["fingerprint"]);
    let nodes = first["nodes"].as_u64().expect("nodes");
    assert_eq!(first["pairs"].as_u64(), Some(nodes * nodes));
}

#[test]
fn sim_run_rejects_empty_range() {
    let dir = TempDir::new().expect("tempdir");
    pf_cmd(dir.path())
        .args(["sim", "run", "--seeds", "0", "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("seed_range must not be empty"));
}
