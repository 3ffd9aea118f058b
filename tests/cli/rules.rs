//! Rules subcommand tests

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_rules_lists_builtins() {
    cargo_bin_cmd!("gavel")
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("Available rules:"))
        .stdout(predicate::str::contains("preamble-required"))
        .stdout(predicate::str::contains("preamble-requires-status"))
        .stdout(predicate::str::contains("(preamble-regex)"));
}

#[test]
fn test_rules_includes_configured_lints() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("config.toml");
    fs::write(
        &config_file,
        "[default_lints.proposal-banana]\n\
         kind = \"preamble-regex\"\n\
         header = \"title\"\n\
         mode = \"excludes\"\n\
         pattern = \"[Bb]anana\"\n\
         message = \"titles must not reference bananas\"\n",
    )
    .unwrap();

    cargo_bin_cmd!("gavel")
        .args(["rules", "--config", config_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("proposal-banana"));
}

#[test]
fn test_rules_rejects_shadowing_builtins() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("config.toml");
    fs::write(
        &config_file,
        "[default_lints.preamble-trim]\n\
         kind = \"preamble-regex\"\n\
         header = \"title\"\n\
         mode = \"includes\"\n\
         pattern = \"x\"\n\
         message = \"m\"\n",
    )
    .unwrap();

    cargo_bin_cmd!("gavel")
        .args(["rules", "--config", config_file.to_str().unwrap()])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("configuration error"))
        .stderr(predicate::str::contains("already registered"));
}
