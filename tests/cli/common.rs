//! Cross-cutting CLI tests (help, version, error handling)

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help() {
    cargo_bin_cmd!("gavel")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Gavel is a CLI linter"));
}

#[test]
fn test_version() {
    cargo_bin_cmd!("gavel")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_subcommand() {
    cargo_bin_cmd!("gavel")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_invalid_subcommand() {
    cargo_bin_cmd!("gavel")
        .arg("invalid")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_lint_help() {
    cargo_bin_cmd!("gavel")
        .args(["lint", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Check one or more proposal"));
}

#[test]
fn test_rules_help() {
    cargo_bin_cmd!("gavel")
        .args(["rules", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("List every rule"));
}

#[test]
fn test_parse_help() {
    cargo_bin_cmd!("gavel")
        .args(["parse", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Parse a proposal document"));
}
