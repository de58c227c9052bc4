//! Integration tests for the dagwalk CLI
//!
//! These tests run the dagwalk binary against manifests written to a
//! temporary directory.

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/// Get a Command for dagwalk with a config dir that holds no config
fn dagwalk(dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("dagwalk");
    cmd.env("DAGWALK_CONFIG_DIR", dir.join("config"))
        .env_remove("RUST_LOG")
        .env_remove("DAGWALK_LOG")
        .env_remove("DAGWALK_LOG_LEVEL");
    cmd
}

/// R -> A -> C, R -> B
const TREE: &str = r#"{
    "root": "R",
    "nodes": [
        { "cid": "R", "links": [{ "cid": "A" }, { "cid": "B" }] },
        { "cid": "A", "links": [{ "cid": "C" }] },
        { "cid": "B" },
        { "cid": "C" }
    ]
}"#;

/// R links to X twice
const SHARED: &str = r#"{
    "root": "R",
    "nodes": [
        { "cid": "R", "links": [{ "cid": "X" }, { "cid": "X" }] },
        { "cid": "X" }
    ]
}"#;

/// R -> lost (no node), R -> A
const MISSING: &str = r#"{
    "root": "R",
    "nodes": [
        { "cid": "R", "links": [{ "cid": "lost" }, { "cid": "A" }] },
        { "cid": "A" }
    ]
}"#;

fn write_manifest(content: &str) -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dag.json");
    fs::write(&path, content).unwrap();
    (dir, path)
}

fn stdout_lines(output: &std::process::Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|l| l.to_string())
        .collect()
}

// ============================================================================
// Help and version
// ============================================================================

#[test]
fn test_help_flag() {
    let dir = tempdir().unwrap();
    dagwalk(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: dagwalk"))
        .stdout(predicate::str::contains("walk"));
}

#[test]
fn test_no_command_prints_version() {
    let dir = tempdir().unwrap();
    dagwalk(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("dagwalk "));
}

// ============================================================================
// Orders
// ============================================================================

#[test]
fn test_walk_default_is_pre_order() {
    let (dir, path) = write_manifest(TREE);
    let output = dagwalk(dir.path()).arg("walk").arg(&path).output().unwrap();

    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), ["R", "  A", "    C", "  B"]);
}

#[test]
fn test_walk_post_order() {
    let (dir, path) = write_manifest(TREE);
    let output = dagwalk(dir.path())
        .args(["walk", "--order", "dfs-post"])
        .arg(&path)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), ["    C", "  A", "  B", "R"]);
}

#[test]
fn test_walk_bfs() {
    let (dir, path) = write_manifest(TREE);
    let output = dagwalk(dir.path())
        .args(["walk", "-o", "bfs"])
        .arg(&path)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), ["R", "  A", "  B", "    C"]);
}

#[test]
fn test_walk_from_explicit_root() {
    let (dir, path) = write_manifest(TREE);
    let output = dagwalk(dir.path())
        .args(["walk", "--root", "A"])
        .arg(&path)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), ["A", "  C"]);
}

#[test]
fn test_walk_unknown_root_is_data_error() {
    let (dir, path) = write_manifest(TREE);
    dagwalk(dir.path())
        .args(["walk", "--root", "Z"])
        .arg(&path)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("node not found: Z"));
}

#[test]
fn test_walk_unknown_order_is_usage_error() {
    let (dir, path) = write_manifest(TREE);
    dagwalk(dir.path())
        .args(["walk", "--order", "sideways"])
        .arg(&path)
        .assert()
        .code(2);
}

// ============================================================================
// Duplicates
// ============================================================================

#[test]
fn test_walk_keeps_duplicates_by_default() {
    let (dir, path) = write_manifest(SHARED);
    let output = dagwalk(dir.path()).arg("walk").arg(&path).output().unwrap();
    assert_eq!(stdout_lines(&output), ["R", "  X", "  X"]);
}

#[test]
fn test_walk_skip_duplicates() {
    let (dir, path) = write_manifest(SHARED);
    let output = dagwalk(dir.path())
        .args(["walk", "--skip-duplicates"])
        .arg(&path)
        .output()
        .unwrap();
    assert_eq!(stdout_lines(&output), ["R", "  X"]);
}

#[test]
fn test_skip_and_keep_duplicates_conflict() {
    let (dir, path) = write_manifest(SHARED);
    dagwalk(dir.path())
        .args(["walk", "--skip-duplicates", "--keep-duplicates"])
        .arg(&path)
        .assert()
        .code(2);
}

// ============================================================================
// Fetch failures
// ============================================================================

#[test]
fn test_walk_missing_node_aborts() {
    let (dir, path) = write_manifest(MISSING);
    dagwalk(dir.path())
        .arg("walk")
        .arg(&path)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "traversal aborted (fetch): node not found: lost",
        ));
}

#[test]
fn test_walk_missing_node_skipped() {
    let (dir, path) = write_manifest(MISSING);
    let output = dagwalk(dir.path())
        .args(["walk", "--on-error", "skip"])
        .arg(&path)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        ["R", "  A", "skipped lost: node not found: lost"]
    );
}

#[test]
fn test_walk_quiet_hides_skipped() {
    let (dir, path) = write_manifest(MISSING);
    let output = dagwalk(dir.path())
        .args(["walk", "--quiet", "--on-error", "skip"])
        .arg(&path)
        .output()
        .unwrap();

    assert_eq!(stdout_lines(&output), ["R", "  A"]);
}

// ============================================================================
// Manifests
// ============================================================================

#[test]
fn test_walk_invalid_manifest_is_data_error() {
    let (dir, path) = write_manifest("{ not json");
    dagwalk(dir.path())
        .arg("walk")
        .arg(&path)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("invalid manifest"));
}

#[test]
fn test_walk_missing_manifest_is_data_error() {
    let dir = tempdir().unwrap();
    dagwalk(dir.path())
        .arg("walk")
        .arg(dir.path().join("absent.json"))
        .assert()
        .code(3);
}

#[test]
fn test_walk_duplicate_node_entry() {
    let (dir, path) = write_manifest(
        r#"{"root": "R", "nodes": [{"cid": "R"}, {"cid": "R"}]}"#,
    );
    dagwalk(dir.path())
        .arg("walk")
        .arg(&path)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("duplicate node entry R"));
}

// ============================================================================
// Output formats
// ============================================================================

#[test]
fn test_walk_json_output() {
    let (dir, path) = write_manifest(TREE);
    let output = dagwalk(dir.path())
        .args(["--format", "json", "walk", "--order", "bfs"])
        .arg(&path)
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["root"], "R");
    assert_eq!(json["order"], "bfs");
    assert_eq!(json["skip_duplicates"], false);

    let visits = json["visits"].as_array().unwrap();
    let cids: Vec<&str> = visits.iter().map(|v| v["cid"].as_str().unwrap()).collect();
    assert_eq!(cids, ["R", "A", "B", "C"]);
    assert_eq!(visits[3]["depth"], 2);
    assert_eq!(visits[0]["links"], 2);
    assert!(json["skipped"].as_array().unwrap().is_empty());
}

#[test]
fn test_walk_json_error_envelope() {
    let (dir, path) = write_manifest(MISSING);
    let output = dagwalk(dir.path())
        .args(["--format", "json", "walk"])
        .arg(&path)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(json["error"]["type"], "traversal_aborted");
    assert_eq!(json["error"]["kind"], "fetch");
    assert_eq!(json["error"]["code"], 1);
}

#[test]
fn test_json_usage_error_envelope() {
    let dir = tempdir().unwrap();
    let output = dagwalk(dir.path())
        .args(["--format", "json", "walk", "--bogus"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let json: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(json["error"]["type"], "usage_error");
}

#[test]
fn test_walk_records_output() {
    let (dir, path) = write_manifest(MISSING);
    let output = dagwalk(dir.path())
        .args(["--format", "records", "walk", "--on-error", "skip"])
        .arg(&path)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        [
            "H dagwalk=1 records=1 mode=walk root=R order=dfs-pre skip_duplicates=false visits=2 skipped=1",
            "N 0 R links=2",
            "N 1 A links=0",
            "S lost \"node not found: lost\"",
        ]
    );
}

#[test]
fn test_unknown_format_is_usage_error() {
    let (dir, path) = write_manifest(TREE);
    dagwalk(dir.path())
        .args(["--format", "xml", "walk"])
        .arg(&path)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown format: xml"));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_dir_sets_defaults() {
    let (dir, path) = write_manifest(SHARED);
    let config_dir = dir.path().join("config");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[walk]\norder = \"bfs\"\nskip_duplicates = true\n",
    )
    .unwrap();

    let output = dagwalk(dir.path()).arg("walk").arg(&path).output().unwrap();
    assert_eq!(stdout_lines(&output), ["R", "  X"]);

    let output = dagwalk(dir.path())
        .args(["walk", "--keep-duplicates"])
        .arg(&path)
        .output()
        .unwrap();
    assert_eq!(stdout_lines(&output), ["R", "  X", "  X"]);
}

#[test]
fn test_explicit_config_file() {
    let (dir, path) = write_manifest(MISSING);
    let config_path = dir.path().join("walk.toml");
    fs::write(&config_path, "[walk]\non_error = \"skip\"\n").unwrap();

    dagwalk(dir.path())
        .arg("--config")
        .arg(&config_path)
        .arg("walk")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("skipped lost"));
}

#[test]
fn test_invalid_config_is_usage_error() {
    let (dir, path) = write_manifest(TREE);
    let config_path = dir.path().join("walk.toml");
    fs::write(&config_path, "[walk]\norder = \"sideways\"\n").unwrap();

    dagwalk(dir.path())
        .arg("--config")
        .arg(&config_path)
        .arg("walk")
        .arg(&path)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid config"));
}

// ============================================================================
// Logging
// ============================================================================

#[test]
fn test_log_level_debug_shows_traversal_events() {
    let (dir, path) = write_manifest(TREE);
    dagwalk(dir.path())
        .args(["--log-level", "debug", "walk"])
        .arg(&path)
        .assert()
        .success()
        .stderr(predicate::str::contains("traverse_start"))
        .stderr(predicate::str::contains("fetch_metrics"));
}

#[test]
fn test_default_log_level_is_quiet() {
    let (dir, path) = write_manifest(TREE);
    dagwalk(dir.path())
        .arg("walk")
        .arg(&path)
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_recovered_fetch_logs_warning() {
    let (dir, path) = write_manifest(MISSING);
    dagwalk(dir.path())
        .args(["walk", "--on-error", "skip"])
        .arg(&path)
        .assert()
        .success()
        .stderr(predicate::str::contains("fetch failed, skipping subtree"));
}
