//! End-to-end CLI integration tests for the `rodney` binary.
//!
//! Each test works in its own temporary directory with a snapshot file and
//! exercises the `rodney` binary as a subprocess via `assert_cmd`.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const SNAPSHOT: &str = r#"{
  "record_id": "101",
  "collection_id": "7",
  "name": "Kickoff",
  "fields": [
    { "id": "name", "title": "Name", "text": "Kickoff" },
    { "id": "status", "title": "Status", "text": "Done" },
    { "id": "date4", "title": "Due", "text": "", "value": null }
  ],
  "columns": [
    { "id": "name", "title": "Name", "type": "name" },
    { "id": "text0", "title": "Notes", "type": "text" }
  ]
}"#;

/// Build a `Command` targeting the cargo-built `rodney` binary, isolated
/// from the caller's environment.
fn rodney(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("rodney").unwrap();
    cmd.current_dir(tmp.path())
        .env("NO_COLOR", "1")
        .env_remove("CLICOLOR_FORCE")
        .env_remove("RUST_LOG")
        .env_remove("RODNEY_DIR")
        .env_remove("RODNEY_API__TOKEN")
        .env_remove("RODNEY_DEFAULTS__FORMULA")
        .env_remove("RODNEY_DEFAULTS__ACTION")
        .env_remove("RODNEY_JSON");
    cmd
}

/// A temp directory holding `item.json`; returns the dir and snapshot path.
fn workspace() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("item.json");
    std::fs::write(&path, SNAPSHOT).unwrap();
    (tmp, path)
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim_end().to_string()
}

fn json_of(output: &std::process::Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

// ---------------------------------------------------------------------------
// preview
// ---------------------------------------------------------------------------

#[test]
fn preview_evaluates_fields_and_date() {
    let (tmp, snap) = workspace();
    let output = rodney(&tmp)
        .args(["preview", "{Status} - {Name} ({Date|format:DD/MM/YYYY})"])
        .arg("--snapshot")
        .arg(&snap)
        .args(["--today", "2024-03-07"])
        .output()
        .unwrap();
    assert!(output.status.success());
    insta::assert_snapshot!(stdout_of(&output), @"Done - Kickoff (07/03/2024)");
}

#[test]
fn preview_without_record_is_verbatim() {
    let (tmp, _) = workspace();
    let output = rodney(&tmp)
        .args(["preview", "{Status} - {Name}"])
        .output()
        .unwrap();
    assert!(output.status.success());
    insta::assert_snapshot!(stdout_of(&output), @"{Status} - {Name}");
}

#[test]
fn preview_warns_about_unknown_fields() {
    let (tmp, snap) = workspace();
    rodney(&tmp)
        .args(["preview", "{Owner}: {status}"])
        .arg("--snapshot")
        .arg(&snap)
        .assert()
        .success()
        .stdout("{Owner}: Done\n")
        .stderr(predicate::str::contains("no matching field: {Owner}"));

    // --quiet silences the warning.
    rodney(&tmp)
        .args(["preview", "{Owner}", "--quiet"])
        .arg("--snapshot")
        .arg(&snap)
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn preview_json() {
    let (tmp, snap) = workspace();
    let output = rodney(&tmp)
        .args(["preview", "{Name} {Owner} {Owner}", "--json"])
        .arg("--snapshot")
        .arg(&snap)
        .output()
        .unwrap();
    let json = json_of(&output);
    assert_eq!(json["preview"], "Kickoff {Owner} {Owner}");
    assert_eq!(json["unresolved"], serde_json::json!(["Owner"]));
}

#[test]
fn preview_uses_configured_formula() {
    let (tmp, snap) = workspace();
    rodney(&tmp)
        .arg("preview")
        .arg("--snapshot")
        .arg(&snap)
        .env("RODNEY_DEFAULTS__FORMULA", "{Name}")
        .assert()
        .success()
        .stdout("Kickoff\n");
}

#[test]
fn numeric_env_formula_still_loads() {
    let (tmp, _) = workspace();
    rodney(&tmp)
        .arg("version")
        .env("RODNEY_DEFAULTS__FORMULA", "2024")
        .assert()
        .success();
}

#[test]
fn yaml_snapshot_is_accepted() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("item.yaml");
    std::fs::write(
        &path,
        "record_id: '5'\ncollection_id: '6'\nname: Plan\nfields:\n  - id: status\n    title: Status\n    text: Stuck\n",
    )
    .unwrap();
    rodney(&tmp)
        .args(["preview", "[{Status}]"])
        .arg("--snapshot")
        .arg(&path)
        .assert()
        .success()
        .stdout("[Stuck]\n");
}

// ---------------------------------------------------------------------------
// fields
// ---------------------------------------------------------------------------

#[test]
fn fields_lists_values_and_columns() {
    let (tmp, snap) = workspace();
    rodney(&tmp)
        .arg("fields")
        .arg("--snapshot")
        .arg(&snap)
        .assert()
        .success()
        .stdout(predicate::str::contains("Kickoff (item 101, board 7)"))
        .stdout(predicate::str::contains("{Status} = Done\n"))
        .stdout(predicate::str::contains("{Due} = (empty)\n"))
        .stdout(predicate::str::contains("text0  Notes  (text)"));
}

#[test]
fn fields_json_round_trips_snapshot() {
    let (tmp, snap) = workspace();
    let output = rodney(&tmp)
        .args(["fields", "--json"])
        .arg("--snapshot")
        .arg(&snap)
        .output()
        .unwrap();
    let json = json_of(&output);
    assert_eq!(json["record_id"], "101");
    assert_eq!(json["fields"].as_array().unwrap().len(), 3);
    assert_eq!(json["columns"][1]["kind"], "text");
}

#[test]
fn fields_requires_a_record() {
    let (tmp, _) = workspace();
    rodney(&tmp)
        .arg("fields")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no record selected"));
}

#[test]
fn remote_record_requires_token() {
    let (tmp, _) = workspace();
    rodney(&tmp)
        .args(["fields", "--item", "1", "--board", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no API token configured"));
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

#[test]
fn dry_run_rename() {
    let (tmp, snap) = workspace();
    rodney(&tmp)
        .args(["run", "{Status} - {Name}", "--dry-run"])
        .arg("--snapshot")
        .arg(&snap)
        .assert()
        .success()
        .stdout(predicate::str::contains("rename"))
        .stdout(predicate::str::contains("Item renamed to: Done - Kickoff"));
}

#[test]
fn dry_run_creates_subitems_in_order() {
    let (tmp, snap) = workspace();
    let output = rodney(&tmp)
        .args(["run", "A, B, C", "--action", "create_subitems", "--dry-run", "--json"])
        .arg("--snapshot")
        .arg(&snap)
        .output()
        .unwrap();
    let json = json_of(&output);
    assert_eq!(json["outcome"]["success"], true);
    assert_eq!(json["outcome"]["message"], "Created 3 subitems!");

    let names: Vec<&str> = json["requests"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["payload"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["A", "B", "C"]);
}

#[test]
fn dry_run_update_without_target_fails() {
    let (tmp, snap) = workspace();
    rodney(&tmp)
        .args(["run", "x", "--action", "update-column", "--dry-run"])
        .arg("--snapshot")
        .arg(&snap)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Please select a target column"));
}

#[test]
fn dry_run_update_with_target() {
    let (tmp, snap) = workspace();
    let output = rodney(&tmp)
        .args([
            "run",
            "Due {Date|format:YYYY-MM-DD}",
            "--action",
            "update_column",
            "--target",
            "text0",
            "--today",
            "2024-03-07",
            "--dry-run",
            "--json",
        ])
        .arg("--snapshot")
        .arg(&snap)
        .output()
        .unwrap();
    let json = json_of(&output);
    assert_eq!(json["evaluated"], "Due 2024-03-07");
    assert_eq!(json["requests"][0]["target_field_id"], "text0");
    assert_eq!(
        json["outcome"]["message"],
        "Column updated with: Due 2024-03-07"
    );
}

#[test]
fn unknown_action_is_a_usage_error() {
    let (tmp, snap) = workspace();
    rodney(&tmp)
        .args(["run", "x", "--action", "explode"])
        .arg("--snapshot")
        .arg(&snap)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown action 'explode'"));
}

// ---------------------------------------------------------------------------
// actions / config / version
// ---------------------------------------------------------------------------

#[test]
fn actions_lists_all_kinds() {
    let (tmp, _) = workspace();
    let output = rodney(&tmp).args(["actions", "--json"]).output().unwrap();
    let json = json_of(&output);
    let kinds: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["kind"].as_str().unwrap())
        .collect();
    assert_eq!(
        kinds,
        vec!["rename", "update_column", "duplicate", "create_subitems"]
    );
    assert_eq!(json[0]["default"], true);
}

#[test]
fn config_init_then_show() {
    let (tmp, _) = workspace();
    rodney(&tmp)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.yaml"));
    assert!(tmp.path().join(".rodney/config.yaml").is_file());

    // A second init refuses to overwrite.
    rodney(&tmp)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    std::fs::write(
        tmp.path().join(".rodney/config.yaml"),
        "api:\n  token: abc\ndefaults:\n  action: duplicate\n",
    )
    .unwrap();
    let output = rodney(&tmp)
        .args(["config", "show", "--json"])
        .output()
        .unwrap();
    let json = json_of(&output);
    assert_eq!(json["defaults"]["action"], "duplicate");
    assert_eq!(json["api"]["token"], "********");
}

#[test]
fn configured_default_action_is_used() {
    let (tmp, snap) = workspace();
    std::fs::create_dir(tmp.path().join(".rodney")).unwrap();
    std::fs::write(
        tmp.path().join(".rodney/config.yaml"),
        "defaults:\n  action: duplicate\n",
    )
    .unwrap();
    rodney(&tmp)
        .args(["run", "--dry-run"])
        .arg("--snapshot")
        .arg(&snap)
        .assert()
        .success()
        .stdout(predicate::str::contains("Item duplicated successfully!"));
}

#[test]
fn version_prints() {
    let (tmp, _) = workspace();
    rodney(&tmp)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("rodney version "));
}
