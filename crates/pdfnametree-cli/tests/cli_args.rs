mod common;

use common::cmd;
use predicates::prelude::*;

#[test]
fn help_flag_prints_usage_with_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("repair"));
}

#[test]
fn list_subcommand_help() {
    cmd()
        .args(["list", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FILE"))
        .stdout(predicate::str::contains("--tree"))
        .stdout(predicate::str::contains("--no-repair"));
}

#[test]
fn repair_subcommand_help() {
    cmd()
        .args(["repair", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--fan-out"));
}

#[test]
fn version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pdfnametree"));
}

#[test]
fn unknown_subcommand_fails() {
    cmd().arg("extract").assert().failure();
}

#[test]
fn get_without_tree_fails() {
    cmd()
        .args(["get", "file.pdf", "key"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--tree"));
}
