//! CLI integration tests
//!
//! Tests the command-line interface using assert_cmd

mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

use common::Workspace;

/// Command for the persona-order binary, isolated from the user's own config
fn order_cmd(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("persona-order").unwrap();
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("PERSONA_ORDER_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn listed_ids(stdout: &[u8]) -> Vec<i64> {
    let rows: Value = serde_json::from_slice(stdout).unwrap();
    rows.as_array()
        .unwrap()
        .iter()
        .map(|row| row["id"].as_i64().unwrap())
        .collect()
}

fn list_json(ws: &Workspace, extra: &[&str]) -> Vec<i64> {
    let output = order_cmd(ws.path())
        .arg("--config")
        .arg(ws.config_path())
        .arg("list")
        .arg("--json")
        .args(extra)
        .output()
        .unwrap();
    assert!(output.status.success(), "list failed: {:?}", output);
    listed_ids(&output.stdout)
}

// ─────────────────────────────────────────────────────────────────
// Help and Version
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    let ws = Workspace::new("alice", "basic");
    order_cmd(ws.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("reorder"))
        .stdout(predicate::str::contains("priorities"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version_command() {
    let ws = Workspace::new("alice", "basic");
    order_cmd(ws.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("persona-order"))
        .stdout(predicate::str::contains("Build Information"));
}

// ─────────────────────────────────────────────────────────────────
// Priorities
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_priorities_map() {
    let ws = Workspace::new("alice", "basic");
    let output = order_cmd(ws.path())
        .args(["priorities", "7", "2", "9"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let body: Value = serde_json::from_slice(&output.stdout).unwrap();
    let map = &body["display_priority_map"];
    assert_eq!(map["7"], 0);
    assert_eq!(map["2"], 1);
    assert_eq!(map["9"], 2);
}

#[test]
fn test_priorities_duplicate_id() {
    let ws = Workspace::new("alice", "basic");
    order_cmd(ws.path())
        .args(["priorities", "1", "-4", "1"])
        .assert()
        .failure()
        .code(50)
        .stderr(predicate::str::contains("E501"));
}

// ─────────────────────────────────────────────────────────────────
// List
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_list_visible_for_owner() {
    let ws = Workspace::new("alice", "basic");
    assert_eq!(list_json(&ws, &[]), vec![3, 6, -1, -2]);
}

#[test]
fn test_list_all_includes_hidden() {
    let ws = Workspace::new("alice", "basic");
    assert_eq!(list_json(&ws, &["--all"]), vec![5, 3, 6, -1, -2]);
}

#[test]
fn test_list_admin_sees_private() {
    let ws = Workspace::new("root", "admin");
    assert_eq!(list_json(&ws, &["--all"]), vec![5, 3, 6, -1, -2, 4]);
}

#[test]
fn test_list_table_labels() {
    let ws = Workspace::new("alice", "basic");
    order_cmd(ws.path())
        .arg("--config")
        .arg(ws.config_path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("PRIORITY"))
        .stdout(predicate::str::contains("Built-in"))
        .stdout(predicate::str::contains("You"))
        .stdout(predicate::str::contains("Sales Helper"));
}

#[test]
fn test_list_missing_store_file() {
    let ws = Workspace::new("alice", "basic");
    std::fs::remove_file(ws.store_path()).unwrap();
    order_cmd(ws.path())
        .arg("--config")
        .arg(ws.config_path())
        .arg("list")
        .assert()
        .failure()
        .code(20);
}

// ─────────────────────────────────────────────────────────────────
// Reorder
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_reorder_move_persists() {
    let ws = Workspace::new("alice", "basic");
    order_cmd(ws.path())
        .arg("--config")
        .arg(ws.config_path())
        .args(["reorder", "--move", "-2", "--to", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Paraphrase"));

    assert_eq!(list_json(&ws, &[]), vec![-2, 3, 6, -1]);
    // Hidden persona 5 is renumbered after the visible ones; private 4 stays null.
    assert_eq!(list_json(&ws, &["--all"]), vec![-2, 3, 6, -1, 5]);

    let admin = Workspace::new("root", "admin");
    std::fs::copy(ws.store_path(), admin.store_path()).unwrap();
    assert_eq!(list_json(&admin, &["--all"]), vec![-2, 3, 6, -1, 5, 4]);
}

#[test]
fn test_reorder_full_order() {
    let ws = Workspace::new("alice", "basic");
    order_cmd(ws.path())
        .arg("--config")
        .arg(ws.config_path())
        .args(["reorder", "--order", "-1,-2,6,3"])
        .assert()
        .success();

    assert_eq!(list_json(&ws, &[]), vec![-1, -2, 6, 3]);
}

#[test]
fn test_reorder_rejects_invisible_id() {
    let ws = Workspace::new("alice", "basic");
    order_cmd(ws.path())
        .arg("--config")
        .arg(ws.config_path())
        .args(["reorder", "--order", "3,4"])
        .assert()
        .failure()
        .code(50)
        .stderr(predicate::str::contains("Persona not found: 4"));

    assert_eq!(list_json(&ws, &[]), vec![3, 6, -1, -2]);
}

#[test]
fn test_reorder_rejects_partial_order() {
    let ws = Workspace::new("alice", "basic");
    order_cmd(ws.path())
        .arg("--config")
        .arg(ws.config_path())
        .args(["reorder", "--order", "6,3"])
        .assert()
        .failure()
        .code(50)
        .stderr(predicate::str::contains("E502"))
        .stderr(predicate::str::contains("[-1, -2]"));

    assert_eq!(list_json(&ws, &[]), vec![3, 6, -1, -2]);
}

#[test]
fn test_reorder_needs_target() {
    let ws = Workspace::new("alice", "basic");
    order_cmd(ws.path())
        .arg("--config")
        .arg(ws.config_path())
        .arg("reorder")
        .assert()
        .failure();
}

// ─────────────────────────────────────────────────────────────────
// Config
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_config_validate_default() {
    let ws = Workspace::new("alice", "basic");
    order_cmd(ws.path())
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_config_validate_fixture() {
    let ws = Workspace::new("alice", "basic");
    order_cmd(ws.path())
        .arg("--config")
        .arg(common::valid_config_fixture())
        .args(["config", "validate"])
        .assert()
        .success();
}

#[test]
fn test_config_validate_invalid_file() {
    let ws = Workspace::new("alice", "basic");
    order_cmd(ws.path())
        .arg("--config")
        .arg(common::invalid_config_fixture())
        .args(["config", "validate"])
        .assert()
        .failure()
        .code(10)
        .stderr(predicate::str::contains("E102"));
}

#[test]
fn test_config_validate_nonexistent_file() {
    let ws = Workspace::new("alice", "basic");
    order_cmd(ws.path())
        .args(["--config", "/nonexistent/path/config.toml", "config", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_config_show() {
    let ws = Workspace::new("alice", "basic");
    order_cmd(ws.path())
        .arg("--config")
        .arg(ws.config_path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[user]"))
        .stdout(predicate::str::contains("[store]"))
        .stdout(predicate::str::contains("alice@example.com"));
}

#[test]
fn test_config_init() {
    let ws = Workspace::new("alice", "basic");
    let target = ws.path().join("new").join("config.toml");
    order_cmd(ws.path())
        .args(["config", "init", "--path"])
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file created"));
    assert!(target.exists());

    order_cmd(ws.path())
        .args(["config", "init", "--path"])
        .arg(&target)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

// ─────────────────────────────────────────────────────────────────
// Error Handling
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_unknown_command() {
    let ws = Workspace::new("alice", "basic");
    order_cmd(ws.path())
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}
