//! Integration tests for `lockgraph fmt`.

use assert_cmd::Command;
use lockgraph_cli::test_utils::LockfileFixture;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn lockgraph() -> Command {
    let mut cmd = Command::cargo_bin("lockgraph").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_fmt_canonical_file_is_untouched() {
    let temp = TempDir::new().unwrap();
    let path = LockfileFixture::workspace().write_to(temp.path()).unwrap();

    lockgraph()
        .arg("fmt")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("already formatted"));

    assert_eq!(fs::read_to_string(&path).unwrap(), LockfileFixture::workspace().content);
}

#[test]
fn test_fmt_upgrades_legacy_lockfile() {
    let temp = TempDir::new().unwrap();
    let path = LockfileFixture::v2().write_to(temp.path()).unwrap();

    lockgraph()
        .arg("fmt")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Formatted"));

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("{\n  \"version\": \"3\","));
    assert!(written.contains("\"npm:nanoid\": \"npm:nanoid@3.3.4\""));
    assert!(written.ends_with("}\n"));
}

#[test]
fn test_fmt_check_fails_without_writing() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("deno.lock");
    let messy = r#"{"remote":{"b":"2","a":"1"},"version":"3"}"#;
    fs::write(&path, messy).unwrap();

    lockgraph()
        .args(["fmt", "--check"])
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not in canonical form"));

    assert_eq!(fs::read_to_string(&path).unwrap(), messy);
}

#[test]
fn test_fmt_reports_parse_errors() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("deno.lock");
    fs::write(&path, "{ not json").unwrap();

    lockgraph()
        .arg("fmt")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse lockfile"));
}

#[test]
fn test_fmt_missing_file() {
    let temp = TempDir::new().unwrap();

    lockgraph()
        .arg("fmt")
        .arg(temp.path().join("missing.lock"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}
