//! CLI tests: run the built binary against fixture trees

mod common;

use common::{customer_class, order_class, write_file};
use std::path::Path;
use std::process::{Command, Output};

fn smellgraph(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_smellgraph"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run smellgraph")
}

fn fixture() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    write_file(dir.path(), "shop/Customer.class", &customer_class());
    write_file(dir.path(), "shop/Order.class", &order_class());
    write_file(dir.path(), "docs/notes.txt", b"unrelated");
    dir
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("utf-8 temp path")
}

#[test]
fn analyze_json_has_ten_lists_and_skip_count() {
    let dir = fixture();
    let out = smellgraph(&["analyze", path_arg(dir.path()), "--format", "json"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let report: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json report");
    assert_eq!(report["smells"].as_array().expect("smells").len(), 10);
    assert_eq!(report["classes"], 2);
    assert_eq!(report["skipped"], 1);
    assert_eq!(report["smells"][7]["findings"][0], "shop.Order.a [Chain=a → b → c]");
}

#[test]
fn analyze_text_is_the_default() {
    let dir = fixture();
    let out = smellgraph(&["analyze", path_arg(dir.path())]);
    assert!(out.status.success());
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.contains("Feature Envy (1)"));
    assert!(text.contains("Skipped/failed artifacts"));
}

#[test]
fn config_disables_a_rule() {
    let dir = fixture();
    write_file(
        dir.path(),
        "smellgraph.toml",
        b"[defaults]\nformat = \"json\"\n\n[detectors.message-chains]\nenabled = false\n",
    );

    let out = smellgraph(&["analyze", path_arg(dir.path())]);
    assert!(out.status.success());
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json from config");
    assert_eq!(report["smells"][7]["disabled"], true);
    assert!(report["smells"][7]["findings"].as_array().expect("list").is_empty());
}

#[test]
fn export_then_analyze_model() {
    let dir = fixture();
    let model_path = dir.path().join("model.json");

    let out = smellgraph(&[
        "export",
        path_arg(dir.path()),
        "--output",
        path_arg(&model_path),
    ]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let document: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&model_path).expect("read model"))
            .expect("parse model");
    let order = document
        .as_array()
        .expect("array")
        .iter()
        .find(|c| c["name"] == "shop.Order")
        .expect("order entry");
    assert_eq!(order["metrics"]["methodCount"], 4);
    assert_eq!(order["metrics"]["atfd"], 3);

    let out = smellgraph(&[
        "analyze",
        "--model",
        path_arg(&model_path),
        "--format",
        "json",
    ]);
    assert!(out.status.success());
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json report");
    assert_eq!(report["classes"], 2);
    assert_eq!(report["smells"][4]["findings"].as_array().expect("envy").len(), 1);
}

#[test]
fn stats_prints_edge_counts() {
    let dir = fixture();
    let out = smellgraph(&["stats", path_arg(dir.path())]);
    assert!(out.status.success());
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.contains("CALLS"));
    assert!(text.contains("ACCESSES"));
}

#[test]
fn single_unsupported_artifact_exits_nonzero() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_file(dir.path(), "notes.md", b"hello");
    let out = smellgraph(&["analyze", path_arg(&dir.path().join("notes.md"))]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Unsupported artifact"));
}
