//! Workspace declarations and reachability pruning.
//!
//! The `workspace` section records which requirements the workspace root and
//! each of its members declared when the lockfile was last written. Setting a
//! new declaration rebuilds `packages` from scratch so that only what those
//! roots can reach survives. `redirects` and `remote` are keyed by URL, not by
//! the dependency graph, and are never touched here.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use super::Lockfile;
use super::package_graph::PackageGraph;

/// Dependencies declared in a `package.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageJsonDeps {
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub dependencies: BTreeSet<String>,
}

impl PackageJsonDeps {
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }
}

/// Dependency declarations of the workspace root or of one member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceMemberConfig {
    /// Registry-style requirement strings, eg. `jsr:@std/path@^1`.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub dependencies: BTreeSet<String>,

    /// npm-style dependencies, eg. `npm:chalk@^5`.
    #[serde(default, skip_serializing_if = "PackageJsonDeps::is_empty")]
    pub package_json: PackageJsonDeps,
}

impl WorkspaceMemberConfig {
    /// Build a member declaration from requirement lists.
    pub fn new<D, P>(dependencies: D, package_json_deps: P) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self {
            dependencies: dependencies.into_iter().map(Into::into).collect(),
            package_json: PackageJsonDeps {
                dependencies: package_json_deps.into_iter().map(Into::into).collect(),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty() && self.package_json.is_empty()
    }

    /// All declared requirements, npm-style first.
    pub fn all_dependencies(&self) -> impl Iterator<Item = &String> {
        self.package_json.dependencies.iter().chain(self.dependencies.iter())
    }
}

/// The `workspace` section: the root's own declarations plus named members.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    #[serde(flatten)]
    pub root: WorkspaceMemberConfig,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub members: BTreeMap<String, WorkspaceMemberConfig>,
}

impl WorkspaceConfig {
    pub fn is_empty(&self) -> bool {
        self.root.is_empty() && self.members.is_empty()
    }

    /// Every requirement declared by the root and all members.
    ///
    /// These are the roots of the reachability walk.
    pub fn all_dependencies(&self) -> impl Iterator<Item = &String> {
        self.root
            .all_dependencies()
            .chain(self.members.values().flat_map(WorkspaceMemberConfig::all_dependencies))
    }
}

/// Options for [`Lockfile::set_workspace_config`].
#[derive(Debug, Clone, Default)]
pub struct SetWorkspaceConfigOptions {
    /// The new declaration.
    pub config: WorkspaceConfig,
    /// Keep the currently recorded registry-style dependencies (and members)
    /// instead of the ones in `config`. Implies `no_npm`.
    ///
    /// Used when a one-off script runs without its configuration file.
    pub no_config: bool,
    /// Keep the currently recorded `package.json` dependencies instead of the
    /// ones in `config`.
    pub no_npm: bool,
}

impl From<WorkspaceConfig> for SetWorkspaceConfigOptions {
    fn from(config: WorkspaceConfig) -> Self {
        Self {
            config,
            no_config: false,
            no_npm: false,
        }
    }
}

impl SetWorkspaceConfigOptions {
    /// Produce the declaration to store, merging in preserved parts of `current`.
    pub fn resolve(self, current: &WorkspaceConfig) -> WorkspaceConfig {
        let no_config = self.no_config;
        let no_npm = self.no_npm || self.no_config;
        if !no_config && !no_npm {
            return self.config;
        }

        let merge = |new: WorkspaceMemberConfig, current: Option<&WorkspaceMemberConfig>| {
            let current = current.cloned().unwrap_or_default();
            WorkspaceMemberConfig {
                dependencies: if no_config { current.dependencies } else { new.dependencies },
                package_json: if no_npm { current.package_json } else { new.package_json },
            }
        };

        let root = merge(self.config.root, Some(&current.root));
        let mut members: BTreeMap<String, WorkspaceMemberConfig> = self
            .config
            .members
            .into_iter()
            .map(|(name, member)| {
                let merged = merge(member, current.members.get(&name));
                (name, merged)
            })
            .collect();

        if no_config {
            for (name, member) in &current.members {
                members.entry(name.clone()).or_insert_with(|| member.clone());
            }
        }

        WorkspaceConfig { root, members }
    }
}

impl Lockfile {
    /// Replace the workspace declaration and prune `packages` to what it reaches.
    ///
    /// `specifiers`, `jsr` and `npm` are rebuilt to contain exactly the entries
    /// transitively reachable from the declared requirements. Dangling
    /// specifiers are dropped silently and cycles are fine.
    ///
    /// Setting a declaration on a lockfile that was empty does not flag the
    /// lockfile as changed on its own, so that merely describing a workspace
    /// does not cause a lockfile to be created.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lockgraph_cli::lockfile::{Lockfile, WorkspaceConfig};
    ///
    /// let mut lockfile = Lockfile::new_empty("deno.lock", false);
    /// lockfile.insert_package("A", "sha-a").unwrap();
    /// lockfile.insert_package("B", "sha-b").unwrap();
    /// lockfile.add_package_dependencies("A", ["B"]).unwrap();
    ///
    /// let mut config = WorkspaceConfig::default();
    /// config.root.dependencies.insert("A".to_string());
    /// lockfile.set_workspace_config(config.into());
    /// assert!(lockfile.jsr_package("B").is_some());
    ///
    /// lockfile.set_workspace_config(WorkspaceConfig::default().into());
    /// assert!(lockfile.content().packages.is_empty());
    /// ```
    pub fn set_workspace_config(&mut self, options: SetWorkspaceConfigOptions) {
        let was_empty_before = self.content.is_empty();

        let config = options.resolve(&self.content.workspace);
        let workspace_changed = config != self.content.workspace;
        self.content.workspace = config;

        let graph = PackageGraph::build(&self.content.packages);
        let reachable = graph.reachable(self.content.workspace.all_dependencies());
        let pruned = reachable.retain(&self.content.packages);

        debug!(
            "Pruned lockfile '{}': kept {} specifiers, {} jsr and {} npm packages (was {}, {}, {})",
            self.source_id,
            pruned.specifiers.len(),
            pruned.jsr.len(),
            pruned.npm.len(),
            self.content.packages.specifiers.len(),
            self.content.packages.jsr.len(),
            self.content.packages.npm.len(),
        );

        let packages_changed = pruned != self.content.packages;
        self.content.packages = pruned;

        if (workspace_changed || packages_changed) && !was_empty_before {
            self.has_content_changed = true;
        }
    }
}
