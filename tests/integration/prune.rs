//! Integration tests for `lockgraph prune`.

use assert_cmd::Command;
use lockgraph_cli::lockfile::Lockfile;
use lockgraph_cli::test_utils::LockfileFixture;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn lockgraph() -> Command {
    let mut cmd = Command::cargo_bin("lockgraph").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn setup(declaration: &str) -> (TempDir, std::path::PathBuf, std::path::PathBuf) {
    let temp = TempDir::new().unwrap();
    let lockfile_path = LockfileFixture::workspace().write_to(temp.path()).unwrap();
    let config_path = temp.path().join("workspace.json");
    fs::write(&config_path, declaration).unwrap();
    (temp, lockfile_path, config_path)
}

#[test]
fn test_prune_writes_pruned_lockfile() {
    let (_temp, lockfile_path, config_path) =
        setup(r#"{ "packageJson": { "dependencies": ["npm:chalk@5"] } }"#);

    lockgraph()
        .arg("prune")
        .arg(&lockfile_path)
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("jsr:@std/testing@1.0.0"))
        .stdout(predicate::str::contains("Pruned"));

    let written = fs::read_to_string(&lockfile_path).unwrap();
    let lockfile = Lockfile::parse("deno.lock", &written).unwrap();
    assert!(lockfile.content().packages.jsr.is_empty());
    assert!(lockfile.npm_package("chalk@5.0.0").is_some());
    assert!(lockfile.npm_package("ansi-styles@4.1.0").is_some());
    assert!(lockfile.npm_package("left-pad@1.3.0").is_none());
    assert!(lockfile.workspace().members.is_empty());
}

#[test]
fn test_prune_dry_run_leaves_file_alone() {
    let (_temp, lockfile_path, config_path) = setup("{}");

    lockgraph()
        .args(["prune", "--dry-run"])
        .arg(&lockfile_path)
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"remote\""))
        .stdout(predicate::str::contains("\"packages\"").not())
        .stderr(predicate::str::contains("would remove"));

    assert_eq!(fs::read_to_string(&lockfile_path).unwrap(), LockfileFixture::workspace().content);
}

#[test]
fn test_prune_no_config_uses_recorded_workspace() {
    let temp = TempDir::new().unwrap();
    let lockfile_path = LockfileFixture::workspace().write_to(temp.path()).unwrap();

    lockgraph()
        .args(["prune", "--no-config"])
        .arg(&lockfile_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 entries removed"));

    let lockfile = Lockfile::parse("deno.lock", &fs::read_to_string(&lockfile_path).unwrap()).unwrap();
    assert!(lockfile.jsr_package("@std/assert@1.0.0").is_none());
    assert!(lockfile.npm_package("is-odd@3.0.1").is_none());
    assert!(lockfile.npm_package("left-pad@1.3.0").is_some());
}

#[test]
fn test_prune_invalid_declaration() {
    let (_temp, lockfile_path, config_path) = setup(r#"{ "dependencies": "jsr:@std/fs@1" }"#);

    lockgraph()
        .arg("prune")
        .arg(&lockfile_path)
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid workspace declaration"));
}

#[test]
fn test_prune_twice_reports_up_to_date() {
    let (_temp, lockfile_path, config_path) =
        setup(r#"{ "dependencies": ["jsr:@std/path@1"] }"#);

    for _ in 0..2 {
        lockgraph()
            .arg("prune")
            .arg(&lockfile_path)
            .arg("--config")
            .arg(&config_path)
            .assert()
            .success();
    }

    lockgraph()
        .arg("prune")
        .arg(&lockfile_path)
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("up to date"));
}
