#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn logbook(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("logbook").unwrap();
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn snapshot_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "{output:?}");
    serde_json::from_slice(&output.stdout).unwrap()
}

/// Workspace at `tmp/ws` with sibling projects `alpha` and `beta`.
fn two_project_workspace(dir: &TempDir) -> PathBuf {
    let config = dir.path().join("ws/.claude/logbook.local.md");
    write(
        &config,
        "---\nprojects:\n  alpha:\n    path: ../alpha\n  beta:\n    path: ../beta\n---\n",
    );
    write(
        &dir.path().join("alpha/.claude/system/features.json"),
        r#"[
            {"id": "A1", "title": "Login", "status": "complete", "priority": 1},
            {"id": "A2", "title": "Logout", "status": "in_progress"}
        ]"#,
    );
    write(
        &dir.path().join("beta/.claude/system/features.json"),
        r#"{"features": [{"id": "B1", "name": "Search", "status": "new", "priority": 2}]}"#,
    );
    config
}

// ---------------------------------------------------------------------------
// logbook snapshot
// ---------------------------------------------------------------------------

#[test]
fn snapshot_of_missing_default_file_is_empty() {
    let dir = TempDir::new().unwrap();
    let json = snapshot_json(logbook(&dir).args(["snapshot", "--json"]));
    assert_eq!(json["total"], 0);
    assert_eq!(json["completion_pct"], 0);
    assert_eq!(json["features"], serde_json::json!([]));
}

#[test]
fn snapshot_reads_default_path_from_cwd() {
    let dir = TempDir::new().unwrap();
    write(
        &dir.path().join(".claude/system/features.json"),
        r#"[{"id": "F1", "title": "One", "status": "complete"},
            {"id": "F2", "title": "Two", "status": "new"},
            {"id": "F3", "title": "Three", "status": "new"}]"#,
    );
    let json = snapshot_json(logbook(&dir).args(["snapshot", "--json"]));
    assert_eq!(json["total"], 3);
    assert_eq!(json["completion_pct"], 33);
    assert_eq!(json["features"][0]["_project"], "Project");
}

#[test]
fn snapshot_workspace_json() {
    let dir = TempDir::new().unwrap();
    let config = two_project_workspace(&dir);
    let json = snapshot_json(
        logbook(&dir)
            .args(["snapshot", "--json", "--workspace"])
            .arg(&config),
    );
    assert_eq!(json["total"], 3);
    assert_eq!(json["by_status"]["in_progress"], 1);
    assert_eq!(json["per_project"]["alpha"]["completion_pct"], 50);
    assert_eq!(json["per_project"]["beta"]["total"], 1);
    let ids: Vec<&str> = json["features"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["A1", "B1", "A2"]);
}

#[test]
fn snapshot_table_lists_features() {
    let dir = TempDir::new().unwrap();
    let config = two_project_workspace(&dir);
    logbook(&dir)
        .args(["snapshot", "--workspace"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Features: 3"))
        .stdout(predicate::str::contains("PROJECT"))
        .stdout(predicate::str::contains("Search"))
        .stdout(predicate::str::contains("In Progress"));
}

#[test]
fn snapshot_schema_error_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("features.json");
    write(&path, "42");
    logbook(&dir)
        .arg("snapshot")
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error:"))
        .stderr(predicate::str::contains(path.display().to_string()))
        .stderr(predicate::str::contains("got number"));
}

#[test]
fn snapshot_with_unusable_workspace_config_is_empty() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("logbook.local.md");
    write(&config, "no front-matter here\n");
    let json = snapshot_json(
        logbook(&dir)
            .args(["snapshot", "--json", "--workspace"])
            .arg(&config),
    );
    assert_eq!(json["total"], 0);
}

// ---------------------------------------------------------------------------
// logbook sources
// ---------------------------------------------------------------------------

#[test]
fn sources_single_mode_reports_missing_file() {
    let dir = TempDir::new().unwrap();
    let json = snapshot_json(logbook(&dir).args(["sources", "--json"]));
    assert_eq!(json["mode"], "single");
    assert_eq!(json["sources"][0]["name"], "Project");
    assert_eq!(json["sources"][0]["exists"], false);
}

#[test]
fn sources_workspace_table() {
    let dir = TempDir::new().unwrap();
    let config = two_project_workspace(&dir);
    logbook(&dir)
        .args(["sources", "--workspace"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("alpha"))
        .stdout(predicate::str::contains("beta"))
        .stdout(predicate::str::contains("FEATURES FILE"));
}

#[test]
fn unknown_subcommand_fails() {
    let dir = TempDir::new().unwrap();
    logbook(&dir).arg("bogus").assert().failure();
}
