//! Workspace pruning against realistic lockfiles.

use lockgraph_cli::lockfile::{Lockfile, SetWorkspaceConfigOptions, WorkspaceConfig};
use lockgraph_cli::test_utils::LockfileFixture;

fn workspace_lockfile() -> Lockfile {
    let fixture = LockfileFixture::workspace();
    Lockfile::parse("deno.lock", &fixture.content).unwrap()
}

fn config(json: &str) -> WorkspaceConfig {
    serde_json::from_str(json).unwrap()
}

#[test]
fn pruning_keeps_exactly_the_transitive_closure() {
    let mut lockfile = workspace_lockfile();
    lockfile.set_workspace_config(config(r#"{ "dependencies": ["jsr:@std/fs@1"] }"#).into());

    let specifiers: Vec<&str> = lockfile.specifiers().keys().map(String::as_str).collect();
    assert_eq!(specifiers, vec!["jsr:@std/fs@1", "jsr:@std/path@1"]);
    assert!(lockfile.jsr_package("@std/fs@1.0.0").is_some());
    assert!(lockfile.jsr_package("@std/path@1.0.0").is_some());
    assert!(lockfile.jsr_package("@std/testing@1.0.0").is_none());
    assert!(lockfile.content().packages.npm.is_empty());
}

#[test]
fn npm_dependencies_are_followed_by_identity() {
    let mut lockfile = workspace_lockfile();
    lockfile.set_workspace_config(
        config(r#"{ "packageJson": { "dependencies": ["npm:chalk@5"] } }"#).into(),
    );

    let npm: Vec<&str> = lockfile.content().packages.npm.keys().map(String::as_str).collect();
    assert_eq!(npm, vec!["ansi-styles@4.1.0", "chalk@5.0.0"]);
}

#[test]
fn pruning_is_idempotent() {
    let declaration = config(
        r#"{ "dependencies": ["jsr:@std/testing@1"], "members": { "tools": { "packageJson": { "dependencies": ["npm:left-pad@1"] } } } }"#,
    );

    let mut once = workspace_lockfile();
    once.set_workspace_config(declaration.clone().into());

    let mut twice = once.copy();
    twice.resolve_write_bytes().unwrap();
    twice.set_workspace_config(declaration.into());

    assert_eq!(once.to_json().unwrap(), twice.to_json().unwrap());
    assert!(twice.resolve_write_bytes().unwrap().is_none());
}

#[test]
fn pruning_never_touches_remote_or_redirects() {
    let original = workspace_lockfile();
    let mut lockfile = original.copy();
    lockfile.set_workspace_config(WorkspaceConfig::default().into());

    assert_eq!(lockfile.remote(), original.remote());
    assert_eq!(lockfile.redirects(), original.redirects());
}

#[test]
fn no_config_keeps_recorded_declaration() {
    let mut lockfile = workspace_lockfile();
    let recorded = lockfile.workspace().clone();

    lockfile.set_workspace_config(SetWorkspaceConfigOptions {
        config: WorkspaceConfig::default(),
        no_config: true,
        no_npm: false,
    });

    assert_eq!(lockfile.workspace(), &recorded);
    assert!(lockfile.jsr_package("@std/testing@1.0.0").is_some());
    assert!(lockfile.npm_package("left-pad@1.3.0").is_some());
    // entries outside the recorded declaration are still pruned
    assert!(lockfile.npm_package("is-odd@3.0.1").is_none());
}

#[test]
fn unknown_roots_are_ignored() {
    let mut lockfile = workspace_lockfile();
    lockfile.set_workspace_config(
        config(r#"{ "dependencies": ["jsr:@std/unknown@9", "jsr:@std/path@1"] }"#).into(),
    );

    assert_eq!(lockfile.specifiers().len(), 1);
    assert!(lockfile.jsr_package("@std/path@1.0.0").is_some());
    assert_eq!(lockfile.workspace().root.dependencies.len(), 2);
}
