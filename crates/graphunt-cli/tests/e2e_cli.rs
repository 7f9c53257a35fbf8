//! E2E CLI tests covering:
//! - `graphunt score` ranking and JSON row shape
//! - `graphunt layout` seed handling and reproducibility
//! - `graphunt analyze` summary contract
//! - config resolution (`--config`, `./graphunt.toml`) and error codes
//!
//! Each test runs the `graphunt` binary as a subprocess in an isolated temp
//! directory.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test Harness
// ---------------------------------------------------------------------------

/// Build a Command targeting the graphunt binary, rooted in `dir`.
fn graphunt_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("graphunt"));
    cmd.current_dir(dir);
    cmd.env("GRAPHUNT_LOG", "error");
    cmd.env_remove("DEBUG");
    cmd
}

/// Run with `--json` and parse stdout.
fn run_json(dir: &Path, args: &[&str]) -> Value {
    let output = graphunt_cmd(dir)
        .args(args)
        .arg("--json")
        .output()
        .expect("graphunt should not crash");
    assert!(
        output.status.success(),
        "{args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("--json should produce valid JSON")
}

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

/// Two-indicator example: one hash contacting one domain.
fn write_pair(dir: &Path) -> (PathBuf, PathBuf) {
    let nodes = write_file(
        dir,
        "nodes.json",
        r#"[{"id": "hash_demo_a", "type": "hash"}, {"id": "example.com", "type": "domain"}]"#,
    );
    let edges = write_file(
        dir,
        "edges.json",
        r#"[{"src": "hash_demo_a", "dst": "example.com", "relationship": "contacted_domains"}]"#,
    );
    (nodes, edges)
}

fn ids(rows: &Value) -> Vec<String> {
    rows.as_array()
        .expect("rows array")
        .iter()
        .map(|row| row["id"].as_str().expect("id").to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// score
// ---------------------------------------------------------------------------

#[test]
fn score_demo_ranks_shared_infrastructure() {
    let dir = TempDir::new().expect("tempdir");
    let json = run_json(dir.path(), &["score", "--demo"]);

    assert_eq!(json["indicators"], 6);
    let ranked = ids(&json["rows"]);
    assert_eq!(ranked[0], "hash_demo_a");
    assert_eq!(ranked[1], "8.8.8.8");
    assert_eq!(json["rows"][0]["type"], "hash");
    assert_eq!(json["rows"][0]["c2_score_pct"], 1.0);
}

#[test]
fn score_two_node_example_from_files() {
    let dir = TempDir::new().expect("tempdir");
    let (nodes, edges) = write_pair(dir.path());
    let json = run_json(
        dir.path(),
        &[
            "score",
            "--nodes",
            nodes.to_str().expect("utf8 path"),
            "--edges",
            edges.to_str().expect("utf8 path"),
        ],
    );

    let rows = json["rows"].as_array().expect("rows");
    assert_eq!(rows.len(), 2);
    for row in rows {
        assert_eq!(row["degree"], 1.0);
        assert_eq!(row["betweenness"], 0.0);
        assert_eq!(row["clustering"], 0.0);
        assert_eq!(row["c2_score"], 0.45);
        for pct in ["degree_pct", "betweenness_pct", "clustering_pct", "c2_score_pct"] {
            assert_eq!(row[pct], 0.0, "{pct}");
        }
    }
    assert_eq!(ids(&json["rows"]), ["hash_demo_a", "example.com"]);
}

#[test]
fn score_top_limits_rows() {
    let dir = TempDir::new().expect("tempdir");
    let json = run_json(dir.path(), &["score", "--demo", "--top", "2"]);
    assert_eq!(json["rows"].as_array().expect("rows").len(), 2);
    assert_eq!(json["indicators"], 6);
}

#[test]
fn score_pretty_prints_table() {
    let dir = TempDir::new().expect("tempdir");
    graphunt_cmd(dir.path())
        .args(["score", "--demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("C2 ranking"))
        .stdout(predicate::str::contains("hash_demo_a"))
        .stdout(predicate::str::contains("0.5850"));
}

#[test]
fn edges_only_input_creates_unknown_vertices() {
    let dir = TempDir::new().expect("tempdir");
    let edges = write_file(
        dir.path(),
        "edges.json",
        r#"[{"src": "a", "dst": "b"}, {"src": "b", "dst": "b"}, {"src": "", "dst": "c"}]"#,
    );
    let json = run_json(
        dir.path(),
        &["score", "--edges", edges.to_str().expect("utf8 path")],
    );

    assert_eq!(json["indicators"], 2);
    assert_eq!(json["report"]["self_loops"], 1);
    assert_eq!(json["report"]["skipped_edges"], 1);
    assert!(
        json["rows"]
            .as_array()
            .expect("rows")
            .iter()
            .all(|row| row["type"] == "unknown")
    );
}

// ---------------------------------------------------------------------------
// layout
// ---------------------------------------------------------------------------

#[test]
fn layout_is_reproducible_for_a_seed() {
    let dir = TempDir::new().expect("tempdir");
    let first = run_json(dir.path(), &["layout", "--demo", "--seed", "7"]);
    let second = run_json(dir.path(), &["layout", "--demo", "--seed", "7"]);

    assert_eq!(first, second);
    assert_eq!(first["seed"], 7);
    assert_eq!(first["positions"].as_object().expect("positions").len(), 6);
}

#[test]
fn layout_seed_changes_coordinates() {
    let dir = TempDir::new().expect("tempdir");
    let a = run_json(dir.path(), &["layout", "--demo", "--seed", "1"]);
    let b = run_json(dir.path(), &["layout", "--demo", "--seed", "2"]);
    assert_ne!(a["positions"], b["positions"]);
    assert_eq!(a["content_hash"], b["content_hash"]);
}

// ---------------------------------------------------------------------------
// analyze
// ---------------------------------------------------------------------------

#[test]
fn analyze_summary_has_every_section() {
    let dir = TempDir::new().expect("tempdir");
    let json = run_json(dir.path(), &["analyze", "--demo", "--top", "3"]);

    assert_eq!(json["stats"]["node_count"], 6);
    assert_eq!(json["stats"]["edge_count"], 5);
    assert_eq!(json["stats"]["component_count"], 1);
    assert_eq!(json["top"].as_array().expect("top").len(), 3);
    assert_eq!(json["scores"].as_array().expect("scores").len(), 6);
    assert_eq!(json["styles"].as_array().expect("styles").len(), 6);
    assert_eq!(json["heatmap"]["metrics"].as_array().expect("metrics").len(), 4);
    assert_eq!(json["layout"]["seed"], 42);
    assert!(
        json["content_hash"]
            .as_str()
            .expect("hash")
            .starts_with("blake3:")
    );
}

#[test]
fn analyze_pretty_output() {
    let dir = TempDir::new().expect("tempdir");
    graphunt_cmd(dir.path())
        .args(["analyze", "--demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Graph"))
        .stdout(predicate::str::contains("Top 6 by C2 score"))
        .stdout(predicate::str::contains("6 positions, seed 42"));
}

#[test]
fn empty_tables_are_not_an_error() {
    let dir = TempDir::new().expect("tempdir");
    let edges = write_file(dir.path(), "edges.json", "[]");
    let json = run_json(
        dir.path(),
        &["analyze", "--edges", edges.to_str().expect("utf8 path")],
    );
    assert_eq!(json["stats"]["node_count"], 0);
    assert_eq!(json["scores"].as_array().expect("scores").len(), 0);
}

// ---------------------------------------------------------------------------
// Config and errors
// ---------------------------------------------------------------------------

#[test]
fn project_config_sets_seed_and_top() {
    let dir = TempDir::new().expect("tempdir");
    write_file(
        dir.path(),
        "graphunt.toml",
        "[layout]\nseed = 1234\n\n[report]\ntop_n = 2\n",
    );
    let json = run_json(dir.path(), &["analyze", "--demo"]);
    assert_eq!(json["layout"]["seed"], 1234);
    assert_eq!(json["top"].as_array().expect("top").len(), 2);
}

#[test]
fn oversized_batch_fails_with_code() {
    let dir = TempDir::new().expect("tempdir");
    let config = write_file(dir.path(), "small.toml", "[limits]\nmax_nodes = 3\n");

    graphunt_cmd(dir.path())
        .args(["score", "--demo", "--config", config.to_str().expect("utf8 path")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E3001"))
        .stderr(predicate::str::contains("6 nodes"));
}

#[test]
fn invalid_config_fails_with_code() {
    let dir = TempDir::new().expect("tempdir");
    let config = write_file(dir.path(), "bad.toml", "[layout]\niterations = 0\n");

    let output = graphunt_cmd(dir.path())
        .args(["layout", "--demo", "--json", "--config"])
        .arg(&config)
        .output()
        .expect("graphunt should not crash");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("E1002"), "stderr: {stderr}");
}

#[test]
fn malformed_config_fails_with_code() {
    let dir = TempDir::new().expect("tempdir");
    write_file(dir.path(), "graphunt.toml", "[layout\nseed = \n");

    graphunt_cmd(dir.path())
        .args(["score", "--demo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E1001"))
        .stderr(predicate::str::contains("graphunt.toml"));
}

#[test]
fn unparsable_input_fails_with_code() {
    let dir = TempDir::new().expect("tempdir");
    let edges = write_file(dir.path(), "edges.json", r#"{"src": "a"}"#);

    graphunt_cmd(dir.path())
        .args(["score", "--edges"])
        .arg(&edges)
        .assert()
        .failure()
        .stderr(predicate::str::contains("E2001"))
        .stderr(predicate::str::contains("edges.json"));
}

#[test]
fn missing_input_is_a_usage_error() {
    let dir = TempDir::new().expect("tempdir");
    graphunt_cmd(dir.path()).args(["score"]).assert().failure();
}
