//! Lint subcommand tests

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// A proposal that passes every default rule, parameterized so tests
/// can break exactly one of them.
fn proposal(number: u64, title: &str) -> String {
    format!(
        "---\n\
         proposal: {number}\n\
         title: {title}\n\
         description: A canonical hash over account state\n\
         author: Ada Lovelace <ada@example.com>\n\
         discussions-to: https://forum.example.com/t/{number}\n\
         status: Draft\n\
         type: Meta\n\
         created: 2024-01-01\n\
         ---\n\
         \n\
         Body text.\n"
    )
}

fn last_call_proposal(number: u64, requires: u64) -> String {
    format!(
        "---\n\
         proposal: {number}\n\
         title: Deterministic state hashing\n\
         description: A canonical hash over account state\n\
         author: Ada Lovelace <ada@example.com>\n\
         discussions-to: https://forum.example.com/t/{number}\n\
         status: Last Call\n\
         type: Standards Track\n\
         category: Core\n\
         created: 2024-01-01\n\
         requires: {requires}\n\
         ---\n\
         \n\
         Body text.\n"
    )
}

#[test]
fn test_lint_clean_file() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("proposal-9.md");
    fs::write(&test_file, proposal(9, "Deterministic state hashing")).unwrap();

    cargo_bin_cmd!("gavel")
        .args(["lint", test_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found"));
}

#[test]
fn test_lint_reports_violations() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("proposal-9.md");
    fs::write(&test_file, proposal(9, "Continues proposal 3")).unwrap();

    cargo_bin_cmd!("gavel")
        .args(["lint", test_file.to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("error[preamble-re-title]"))
        .stdout(predicate::str::contains(
            "should not contain a proposal number",
        ))
        .stdout(predicate::str::contains("Found 1 issue(s)"));
}

#[test]
fn test_lint_allow_silences_a_rule() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("proposal-9.md");
    fs::write(&test_file, proposal(9, "Continues proposal 3")).unwrap();

    cargo_bin_cmd!("gavel")
        .args([
            "lint",
            "-A",
            "preamble-re-title",
            test_file.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found"));
}

#[test]
fn test_lint_warn_downgrades_the_exit_code() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("proposal-9.md");
    fs::write(&test_file, proposal(9, "Continues proposal 3")).unwrap();

    cargo_bin_cmd!("gavel")
        .args([
            "lint",
            "-W",
            "preamble-re-title",
            test_file.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("warning[preamble-re-title]"))
        .stdout(predicate::str::contains("Found 1 issue(s)"));
}

#[test]
fn test_lint_conflicting_severities() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("proposal-9.md");
    fs::write(&test_file, proposal(9, "Deterministic state hashing")).unwrap();

    cargo_bin_cmd!("gavel")
        .args([
            "lint",
            "-W",
            "preamble-trim",
            "-D",
            "preamble-trim",
            test_file.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("configuration error"));
}

#[test]
fn test_lint_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("proposal-9.md");
    fs::write(&test_file, proposal(9, "Continues proposal 3")).unwrap();

    let output = cargo_bin_cmd!("gavel")
        .args(["lint", "--format", "json", test_file.to_str().unwrap()])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let list = value.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["title"]["id"], "preamble-re-title");
    assert_eq!(list[0]["title"]["annotation_type"], "Error");
}

#[test]
fn test_lint_directory() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("proposal-9.md"),
        proposal(9, "Deterministic state hashing"),
    )
    .unwrap();
    fs::write(
        temp_dir.path().join("proposal-10.md"),
        proposal(10, "Continues proposal 3"),
    )
    .unwrap();
    fs::write(temp_dir.path().join("notes.txt"), "not a proposal").unwrap();

    cargo_bin_cmd!("gavel")
        .args(["lint", temp_dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("proposal-10.md"))
        .stdout(predicate::str::contains("Found 1 issue(s)"));
}

#[test]
fn test_lint_loads_required_siblings_from_disk() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("proposal-20.md"),
        proposal(20, "Account state layout"),
    )
    .unwrap();
    let test_file = temp_dir.path().join("proposal-21.md");
    fs::write(&test_file, last_call_proposal(21, 20)).unwrap();

    cargo_bin_cmd!("gavel")
        .args(["lint", test_file.to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("preamble-requires-status"))
        .stdout(predicate::str::contains("not stable enough"));
}

#[test]
fn test_lint_reports_missing_siblings() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("proposal-21.md");
    fs::write(&test_file, last_call_proposal(21, 20)).unwrap();

    cargo_bin_cmd!("gavel")
        .args(["lint", test_file.to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("unable to read file"));
}

#[test]
fn test_lint_empty_directory() {
    let temp_dir = TempDir::new().unwrap();

    cargo_bin_cmd!("gavel")
        .args(["lint", temp_dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("no .md files found"));
}

#[test]
fn test_lint_invalid_explicit_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("config.toml");
    fs::write(&config_file, "warn = 3\n").unwrap();
    let test_file = temp_dir.path().join("proposal-9.md");
    fs::write(&test_file, proposal(9, "Deterministic state hashing")).unwrap();

    cargo_bin_cmd!("gavel")
        .args([
            "lint",
            "--config",
            config_file.to_str().unwrap(),
            test_file.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("configuration error"))
        .stderr(predicate::str::contains("invalid config"));
}

#[test]
fn test_lint_discovers_config_next_to_the_input() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(".gavel.toml"),
        "allow = [\"preamble-re-title\"]\n",
    )
    .unwrap();
    let test_file = temp_dir.path().join("proposal-9.md");
    fs::write(&test_file, proposal(9, "Continues proposal 3")).unwrap();

    cargo_bin_cmd!("gavel")
        .args(["lint", test_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found"));
}

#[test]
fn test_lint_unparseable_document() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("proposal-9.md");
    fs::write(&test_file, "no preamble here\n").unwrap();

    cargo_bin_cmd!("gavel")
        .args(["lint", test_file.to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("first line must be `---`"));
}

#[test]
fn test_lint_undecodable_file_does_not_abort_the_rest() {
    let temp_dir = TempDir::new().unwrap();
    let binary = temp_dir.path().join("proposal-7.md");
    let flagged = temp_dir.path().join("proposal-9.md");
    fs::write(&binary, b"---\ntitle: caf\xff\xfe\n---\n").unwrap();
    fs::write(&flagged, proposal(9, "Continues proposal 3")).unwrap();

    cargo_bin_cmd!("gavel")
        .args(["lint", temp_dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("document is not valid UTF-8"))
        .stdout(predicate::str::contains("error[preamble-re-title]"))
        .stdout(predicate::str::contains("Found 2 issue(s)"));
}
