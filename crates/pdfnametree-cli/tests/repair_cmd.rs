//! Integration tests for the `repair` subcommand.

mod common;

use common::{broken_pdf, cmd, stdout_json, valid_pdf, write_temp_pdf};
use predicates::prelude::*;

#[test]
fn repair_writes_valid_file() {
    let tmp = write_temp_pdf(&broken_pdf());
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("fixed.pdf");

    cmd()
        .args(["repair", tmp.path().to_str().unwrap(), "-o", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Dests: salvaged 2 entries, dropped 1 duplicates, skipped 0 items, created 0 nodes",
        ))
        .stdout(predicate::str::contains("Wrote"));

    cmd()
        .args(["check", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found"));

    cmd()
        .args(["list", out.to_str().unwrap(), "--no-repair"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 entries, valid"));
}

#[test]
fn repair_with_small_fan_out_builds_levels() {
    let tmp = write_temp_pdf(&valid_pdf());
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("fanned.pdf");

    let output = cmd()
        .args([
            "repair",
            tmp.path().to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "--fan-out",
            "2",
            "--format",
            "json",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json = stdout_json(&output);
    let trees = json["trees"].as_array().unwrap();
    assert_eq!(trees.len(), 2);
    assert_eq!(trees[0]["name"], "Dests");
    assert_eq!(trees[0]["nodes_created"], 0);
    assert_eq!(trees[1]["name"], "JavaScript");
    assert_eq!(trees[1]["salvaged"], 3);
    assert_eq!(trees[1]["nodes_created"], 2);

    cmd()
        .args(["get", out.to_str().unwrap(), "--tree", "JavaScript", "zoom"])
        .assert()
        .success()
        .stdout(predicate::str::diff("3\n"));
}

#[test]
fn repair_requires_output() {
    let tmp = write_temp_pdf(&valid_pdf());

    cmd()
        .args(["repair", tmp.path().to_str().unwrap()])
        .assert()
        .failure();
}
