//! Properties of the lockfile engine, exercised through the public API only.

use lockgraph_cli::core::LockfileError;
use lockgraph_cli::lockfile::{
    Lockfile, NpmPackageInfo, ParseOptions, WorkspaceConfig, WorkspaceMemberConfig,
};
use lockgraph_cli::test_utils::{LockfileFixture, init_test_logging};
use std::collections::BTreeMap;

fn all_fixtures() -> Vec<LockfileFixture> {
    vec![LockfileFixture::basic(), LockfileFixture::workspace(), LockfileFixture::v2()]
}

#[test]
fn printing_is_a_fixed_point() {
    init_test_logging(None);

    for fixture in all_fixtures() {
        let lockfile = Lockfile::parse(&fixture.name, &fixture.content).unwrap();
        let printed = lockfile.to_json().unwrap();
        let reparsed = Lockfile::parse(&fixture.name, &printed).unwrap();

        assert_eq!(reparsed.content(), lockfile.content(), "{}", fixture.name);
        assert_eq!(reparsed.to_json().unwrap(), printed, "{}", fixture.name);
    }
}

#[test]
fn output_is_independent_of_insertion_order() {
    let entries = [
        ("https://deno.land/x/c.ts", "hash-c"),
        ("https://deno.land/x/a.ts", "hash-a"),
        ("https://deno.land/x/b.ts", "hash-b"),
    ];

    let mut forward = Lockfile::new_empty("deno.lock", false);
    for (url, hash) in entries {
        forward.insert_remote(url, hash).unwrap();
    }
    let mut backward = Lockfile::new_empty("deno.lock", false);
    for (url, hash) in entries.iter().rev() {
        backward.insert_remote(*url, *hash).unwrap();
    }

    assert_eq!(forward.to_json().unwrap(), backward.to_json().unwrap());
}

#[test]
fn output_is_always_current_version() {
    let v1 = r#"{ "https://deno.land/x/mod.ts": "hash" }"#;
    let v2 = LockfileFixture::v2().content;

    for text in [v1, v2.as_str()] {
        let lockfile = Lockfile::parse("deno.lock", text).unwrap();
        let json: serde_json::Value = serde_json::from_str(&lockfile.to_json().unwrap()).unwrap();
        assert_eq!(json["version"], "3");
    }
}

#[test]
fn unsupported_version_is_rejected() {
    for version in ["0", "4", "2000", ""] {
        let text = format!(r#"{{ "version": "{version}", "remote": {{}} }}"#);
        let err = Lockfile::parse("deno.lock", &text).unwrap_err();
        assert!(
            matches!(err, LockfileError::UnsupportedVersion { version: ref v, .. } if v == version),
            "{version}: {err:?}"
        );
    }
}

#[test]
fn failed_mutation_leaves_document_untouched() {
    let fixture = LockfileFixture::workspace();
    let mut lockfile = Lockfile::parse("deno.lock", &fixture.content).unwrap();

    assert!(lockfile.add_package_dependencies("@std/missing@1.0.0", ["jsr:@std/path@1"]).is_err());
    assert!(lockfile.insert_package("@std/path@1.0.0", "").is_err());
    assert!(lockfile.insert_remote("https://deno.land/x/new.ts", "").is_err());

    assert_eq!(lockfile.to_json().unwrap(), fixture.content);
    assert!(lockfile.resolve_write_bytes().unwrap().is_none());
}

#[test]
fn npm_package_round_trips_through_text() {
    let mut lockfile = Lockfile::new_empty("deno.lock", false);
    lockfile.insert_package_specifier("npm:which@2", "npm:which@2.0.2");
    lockfile
        .insert_npm_package(
            "which@2.0.2",
            NpmPackageInfo {
                integrity: "sha512-which".to_string(),
                dependencies: BTreeMap::from([("isexe".to_string(), "isexe@2.0.0".to_string())]),
            },
        )
        .unwrap();
    lockfile
        .insert_npm_package(
            "isexe@2.0.0",
            NpmPackageInfo {
                integrity: "sha512-isexe".to_string(),
                dependencies: BTreeMap::new(),
            },
        )
        .unwrap();

    let options = ParseOptions {
        strict: true,
        overwrite: false,
    };
    let printed = lockfile.to_json().unwrap();
    let reparsed = Lockfile::parse_with_options("deno.lock", &printed, options).unwrap();
    let which = reparsed.npm_package("which@2.0.2").unwrap();
    assert_eq!(which.integrity, "sha512-which");
    assert_eq!(which.dependencies["isexe"], "isexe@2.0.0");
}

#[test]
fn copy_can_be_discarded() {
    let fixture = LockfileFixture::workspace();
    let lockfile = Lockfile::parse("deno.lock", &fixture.content).unwrap();

    let mut trial = lockfile.copy();
    trial.set_workspace_config(WorkspaceConfig::default().into());
    assert!(trial.content().packages.is_empty());
    drop(trial);

    assert_eq!(lockfile.to_json().unwrap(), fixture.content);
}

#[test]
fn workspace_member_declarations_survive_printing() {
    let mut lockfile = Lockfile::new_empty("deno.lock", false);
    lockfile.insert_redirect("https://deno.land/x/a.ts", "https://deno.land/x/a@1/a.ts");

    let mut config = WorkspaceConfig::default();
    config.members.insert(
        "web".to_string(),
        WorkspaceMemberConfig::new(["jsr:@std/http@1"], ["npm:react@18"]),
    );
    lockfile.set_workspace_config(config.clone().into());

    let reparsed = Lockfile::parse("deno.lock", &lockfile.to_json().unwrap()).unwrap();
    assert_eq!(reparsed.workspace(), &config);
}
