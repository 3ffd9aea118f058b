//! Parse subcommand tests

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const PROPOSAL: &str = "\
---
proposal: 4
title: Deterministic state hashing
status: Draft
---

Body text.
";

#[test]
fn test_parse_stdin() {
    cargo_bin_cmd!("gavel")
        .arg("parse")
        .write_stdin(PROPOSAL)
        .assert()
        .success()
        .stdout(predicate::str::contains("Document"))
        .stdout(predicate::str::contains("proposal"));
}

#[test]
fn test_parse_file() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("proposal-4.md");
    fs::write(&test_file, PROPOSAL).unwrap();

    cargo_bin_cmd!("gavel")
        .args(["parse", test_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Document"))
        .stdout(predicate::str::contains("title"));
}

#[test]
fn test_parse_missing_preamble() {
    cargo_bin_cmd!("gavel")
        .arg("parse")
        .write_stdin("no preamble here\n")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("first line must be `---`"));
}

#[test]
fn test_parse_malformed_field() {
    cargo_bin_cmd!("gavel")
        .arg("parse")
        .write_stdin("---\nproposal 4\n---\n\nBody text.\n")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("missing delimiter"));
}

#[test]
fn test_parse_undecodable_input() {
    cargo_bin_cmd!("gavel")
        .arg("parse")
        .write_stdin(&b"---\ntitle: caf\xff\n---\n"[..])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("document is not valid UTF-8"));
}
