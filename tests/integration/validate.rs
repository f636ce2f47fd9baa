//! Integration tests for `lockgraph validate`.

use assert_cmd::Command;
use lockgraph_cli::test_utils::LockfileFixture;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const DANGLING: &str = r#"{
  "version": "3",
  "packages": {
    "specifiers": {
      "npm:a@1": "npm:a@1.0.0"
    }
  },
  "remote": {}
}
"#;

fn lockgraph() -> Command {
    let mut cmd = Command::cargo_bin("lockgraph").unwrap();
    cmd.env_remove("RUST_LOG").env_remove("LOCKGRAPH_STRICT");
    cmd
}

#[test]
fn test_validate_prints_summary() {
    let temp = TempDir::new().unwrap();
    let path = LockfileFixture::workspace().write_to(temp.path()).unwrap();

    lockgraph()
        .arg("validate")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Valid lockfile"))
        .stdout(predicate::str::contains("Specifiers: 6"))
        .stdout(predicate::str::contains("JSR packages: 4"))
        .stdout(predicate::str::contains("npm packages: 4"))
        .stdout(predicate::str::contains("Workspace members: 1"));
}

#[test]
fn test_validate_lenient_warns_on_dangling_reference() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("deno.lock");
    fs::write(&path, DANGLING).unwrap();

    lockgraph()
        .arg("validate")
        .arg(&path)
        .assert()
        .success()
        .stderr(predicate::str::contains("npm:a@1.0.0"));
}

#[test]
fn test_validate_strict_rejects_dangling_reference() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("deno.lock");
    fs::write(&path, DANGLING).unwrap();

    lockgraph()
        .args(["validate", "--strict"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to validate lockfile"));
}

#[test]
fn test_validate_strict_from_environment() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("deno.lock");
    fs::write(&path, DANGLING).unwrap();

    lockgraph().env("LOCKGRAPH_STRICT", "true").arg("validate").arg(&path).assert().failure();
}

#[test]
fn test_validate_unsupported_version() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("deno.lock");
    fs::write(&path, r#"{ "version": "2000" }"#).unwrap();

    lockgraph()
        .arg("validate")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("2000"));
}

#[test]
fn test_validate_quiet_prints_nothing() {
    let temp = TempDir::new().unwrap();
    let path = LockfileFixture::basic().write_to(temp.path()).unwrap();

    lockgraph()
        .args(["--quiet", "validate"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
