//! E2E tests for the scene commands: `pf generate`, `pf path`, `pf render`,
//! `pf stats`, plus config resolution and error output.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test harness helpers
// ---------------------------------------------------------------------------

/// A `pf` command isolated from the caller's config and format settings.
fn pf_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("pf"));
    cmd.current_dir(home);
    cmd.env("PATHFINDER_LOG", "error");
    cmd.env("XDG_CONFIG_HOME", home);
    cmd.env("HOME", home);
    cmd.env_remove("PATHFINDER_CONFIG");
    cmd.env_remove("FORMAT");
    cmd
}

fn json_of(home: &Path, args: &[&str]) -> Value {
    let output = pf_cmd(home)
        .args(args)
        .arg("--json")
        .output()
        .expect("pf should not crash");
    assert!(
        output.status.success(),
        "pf {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid JSON")
}

fn write_config(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).expect("write config");
    path
}

// ---------------------------------------------------------------------------
// pf generate
// ---------------------------------------------------------------------------

#[test]
fn generate_json_has_expected_shape() {
    let dir = TempDir::new().expect("tempdir");
    let json = json_of(dir.path(), &["generate", "--seed", "42"]);

    assert_eq!(json["seed"], 42);
    let nodes = json["nodes"].as_array().expect("nodes array");
    let edges = json["edges"].as_array().expect("edges array");
    assert!((10..=22).contains(&nodes.len()));
    assert!(edges.len() + 1 >= nodes.len());
    assert_eq!(nodes[0]["label"], "A");
    for edge in edges {
        let weight = edge["weight"].as_f64().expect("weight");
        assert!((1.0..=100.0).contains(&weight));
        assert!(edge["edge"].as_str().expect("edge key").contains('-'));
    }
    assert!(json["complete"].is_boolean());
    let placed = nodes.iter().filter(|n| n["x"].is_number()).count();
    let unplaced = json["unplaced"].as_array().expect("unplaced").len();
    assert_eq!(placed + unplaced, nodes.len());
}

#[test]
fn generate_is_reproducible_for_a_seed() {
    let dir = TempDir::new().expect("tempdir");
    let first = pf_cmd(dir.path())
        .args(["generate", "--seed", "9", "--format", "text"])
        .output()
        .expect("run");
    let second = pf_cmd(dir.path())
        .args(["generate", "--seed", "9", "--format", "text"])
        .output()
        .expect("run");
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn cramped_canvas_reports_partial_layout() {
    let dir = TempDir::new().expect("tempdir");
    let json = json_of(
        dir.path(),
        &["generate", "--seed", "1", "--width", "200", "--height", "200"],
    );
    assert_eq!(json["complete"], false);
    assert!(!json["unplaced"].as_array().expect("unplaced").is_empty());
}

#[test]
fn canvas_smaller_than_margins_fails() {
    let dir = TempDir::new().expect("tempdir");
    pf_cmd(dir.path())
        .args(["generate", "--seed", "1", "--width", "60", "--height", "60"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

// ---------------------------------------------------------------------------
// pf path
// ---------------------------------------------------------------------------

#[test]
fn path_to_self_is_zero() {
    let dir = TempDir::new().expect("tempdir");
    let json = json_of(dir.path(), &["path", "a to a", "--seed", "3"]);
    assert_eq!(json["status"], "reachable");
    assert_eq!(json["distance"].as_f64(), Some(0.0));
    assert_eq!(json["start"], "A");
    assert_eq!(json["end"], "A");
}

#[test]
fn path_json_is_reachable_or_unreachable() {
    let dir = TempDir::new().expect("tempdir");
    let json = json_of(dir.path(), &["path", "A-E", "--seed", "11"]);
    match json["status"].as_str() {
        Some("reachable") => {
            let nodes = json["nodes"].as_array().expect("nodes");
            assert_eq!(nodes.first(), Some(&Value::from("A")));
            assert_eq!(nodes.last(), Some(&Value::from("E")));
            assert_eq!(json["edges"].as_array().expect("edges").len() + 1, nodes.len());
        }
        Some("unreachable") => assert!(json.get("distance").is_none()),
        other => panic!("unexpected status {other:?}"),
    }
}

#[test]
fn path_text_output() {
    let dir = TempDir::new().expect("tempdir");
    pf_cmd(dir.path())
        .args(["path", "b,c", "--seed", "5", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("path seed=5 start=B end=C status="));
}

#[test]
fn path_to_unknown_label_names_the_range() {
    let dir = TempDir::new().expect("tempdir");
    pf_cmd(dir.path())
        .args(["path", "a to z", "--seed", "5", "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"Z\" is not in the graph"))
        .stderr(predicate::str::contains("labels A.."));
}

#[test]
fn unreadable_query_fails_with_hint() {
    let dir = TempDir::new().expect("tempdir");
    let output = pf_cmd(dir.path())
        .args(["path", "from here", "--seed", "5", "--json"])
        .output()
        .expect("run");
    assert!(!output.status.success());
    let err: Value = serde_json::from_slice(&output.stderr).expect("JSON error");
    assert!(
        err["error"]["message"]
            .as_str()
            .expect("message")
            .contains("could not read a route")
    );
    assert!(err["error"]["suggestion"].is_string());
}

#[test]
fn unreadable_route_on_render_gets_the_same_hint() {
    let dir = TempDir::new().expect("tempdir");
    let output = pf_cmd(dir.path())
        .args(["render", "--seed", "5", "--route", "nowhere", "--json"])
        .output()
        .expect("run");
    assert!(!output.status.success());
    let err: Value = serde_json::from_slice(&output.stderr).expect("JSON error");
    assert!(
        err["error"]["suggestion"]
            .as_str()
            .expect("suggestion")
            .contains("pf path")
    );
}

// ---------------------------------------------------------------------------
// pf render
// ---------------------------------------------------------------------------

#[test]
fn render_writes_svg_to_stdout() {
    let dir = TempDir::new().expect("tempdir");
    pf_cmd(dir.path())
        .args(["render", "--seed", "4"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<svg"))
        .stdout(predicate::str::contains("#cbd5e1"))
        .stdout(predicate::str::contains("</svg>"));
}

#[test]
fn render_to_file_reports_summary() {
    let dir = TempDir::new().expect("tempdir");
    let target = dir.path().join("scene.svg");
    let target_arg = target.to_str().expect("utf8 path");
    let json = json_of(
        dir.path(),
        &["render", "--seed", "4", "--route", "a to a", "-o", target_arg],
    );
    let svg = fs::read_to_string(&target).expect("svg written");
    assert!(svg.starts_with("<svg"));
    assert_eq!(json["bytes"].as_u64(), Some(svg.len() as u64));
    assert_eq!(json["highlighted"], "A");
}

// ---------------------------------------------------------------------------
// pf stats
// ---------------------------------------------------------------------------

#[test]
fn stats_json_fields() {
    let dir = TempDir::new().expect("tempdir");
    let json = json_of(dir.path(), &["stats", "--seed", "13"]);
    let density = json["density"].as_f64().expect("density");
    assert!((0.0..=1.0).contains(&density));
    assert!(json["node_count"].as_u64().expect("nodes") >= 10);
    assert!(json["component_count"].as_u64().expect("components") >= 1);
    assert!(json["connected"].is_boolean());
}

// ---------------------------------------------------------------------------
// Config resolution
// ---------------------------------------------------------------------------

#[test]
fn config_flag_overrides_defaults() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_config(dir.path(), "small.toml", "items_min = 5\nitems_max = 5\n");
    let json = json_of(
        dir.path(),
        &["stats", "--seed", "1", "--config", path.to_str().expect("utf8")],
    );
    assert_eq!(json["node_count"], 5);
}

#[test]
fn config_env_is_used() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_config(dir.path(), "env.toml", "items_min = 6\nitems_max = 6\n");
    let output = pf_cmd(dir.path())
        .env("PATHFINDER_CONFIG", &path)
        .args(["stats", "--seed", "1", "--json"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(json["node_count"], 6);
}

#[test]
fn user_config_file_is_picked_up() {
    let dir = TempDir::new().expect("tempdir");
    fs::create_dir_all(dir.path().join("pathfinder")).expect("mkdir");
    write_config(
        &dir.path().join("pathfinder"),
        "config.toml",
        "items_min = 7\nitems_max = 7\n",
    );
    let json = json_of(dir.path(), &["stats", "--seed", "1"]);
    assert_eq!(json["node_count"], 7);
}

#[test]
fn invalid_config_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_config(dir.path(), "bad.toml", "items_max = 30\n");
    pf_cmd(dir.path())
        .args(["generate", "--config", path.to_str().expect("utf8"), "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("alphabet"));
}

// ---------------------------------------------------------------------------
// pf completions
// ---------------------------------------------------------------------------

#[test]
fn completions_bash() {
    let dir = TempDir::new().expect("tempdir");
    pf_cmd(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pf"));
}
