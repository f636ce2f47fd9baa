//! In-memory document model of a lockfile.
//!
//! Every table is a `BTreeMap`/`BTreeSet`, so iteration (and therefore the
//! serialized form) is always in lexicographic key order. Optional tables are
//! always present in memory and are only dropped again when serializing.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::workspace::WorkspaceConfig;

/// The lockfile format version written by this crate.
pub const CURRENT_VERSION: &str = "3";

/// A registry-style (JSR) package entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsrPackageInfo {
    /// Opaque content hash, stored verbatim.
    pub integrity: String,

    /// Requirement strings this package depends on.
    ///
    /// Each one is resolved through the `specifiers` table when walking the graph.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub dependencies: BTreeSet<String>,
}

/// An npm-style package entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpmPackageInfo {
    /// Opaque content hash, stored verbatim.
    pub integrity: String,

    /// Dependency name to resolved npm package identity, eg.
    /// `"ansi-styles": "ansi-styles@4.1.0"`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dependencies: BTreeMap<String, String>,
}

/// The `packages` section: specifiers plus one table per ecosystem.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackagesContent {
    /// Requirement to resolved package identity, eg.
    /// `"jsr:@std/path@^1": "jsr:@std/path@1.0.0"` or
    /// `"npm:chalk@5": "npm:chalk@5.0.0"`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub specifiers: BTreeMap<String, String>,

    /// Resolved JSR identity (`@std/path@1.0.0`) to package info.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub jsr: BTreeMap<String, JsrPackageInfo>,

    /// Resolved npm identity (`chalk@5.0.0`) to package info.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub npm: BTreeMap<String, NpmPackageInfo>,
}

impl PackagesContent {
    pub fn is_empty(&self) -> bool {
        self.specifiers.is_empty() && self.jsr.is_empty() && self.npm.is_empty()
    }

    /// Resolve a package identity to an entry that exists in this table set.
    ///
    /// `npm:`/`jsr:` prefixes select the ecosystem. The key is looked up with
    /// the prefix stripped first, then verbatim, since some writers keep the
    /// prefix in the table key. A bare identity is looked up in the JSR table
    /// first, then npm.
    pub fn resolve_id(&self, id: &str) -> Option<PackageId> {
        if let Some(npm_id) = id.strip_prefix("npm:") {
            return [npm_id, id]
                .into_iter()
                .find(|key| self.npm.contains_key(*key))
                .map(|key| PackageId::Npm(key.to_string()));
        }
        if let Some(jsr_id) = id.strip_prefix("jsr:") {
            return [jsr_id, id]
                .into_iter()
                .find(|key| self.jsr.contains_key(*key))
                .map(|key| PackageId::Jsr(key.to_string()));
        }
        if self.jsr.contains_key(id) {
            Some(PackageId::Jsr(id.to_string()))
        } else if self.npm.contains_key(id) {
            Some(PackageId::Npm(id.to_string()))
        } else {
            None
        }
    }

    /// Resolve a requirement string to a package.
    ///
    /// Specifier keys go through the `specifiers` table; anything else is tried
    /// as a package identity.
    pub fn resolve_req(&self, req: &str) -> Option<PackageId> {
        match self.specifiers.get(req) {
            Some(id) => self.resolve_id(id),
            None => self.resolve_id(req),
        }
    }
}

/// Identity of one package entry, tagged with the table it lives in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PackageId {
    /// Key into [`PackagesContent::jsr`]
    Jsr(String),
    /// Key into [`PackagesContent::npm`]
    Npm(String),
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jsr(id) => write!(f, "jsr:{id}"),
            Self::Npm(id) => write!(f, "npm:{id}"),
        }
    }
}

/// The full lockfile document.
///
/// Field order matches the canonical output: `version`, `packages`,
/// `redirects`, `remote`, `workspace`. `version` and `remote` are always
/// written; the other sections are omitted while empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockfileContent {
    pub(crate) version: String,

    #[serde(default, skip_serializing_if = "PackagesContent::is_empty")]
    pub packages: PackagesContent,

    /// Requested URL to the URL it was redirected to.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub redirects: BTreeMap<String, String>,

    /// Remote module URL to its content hash.
    #[serde(default)]
    pub remote: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "WorkspaceConfig::is_empty")]
    pub workspace: WorkspaceConfig,
}

impl LockfileContent {
    /// An empty document at the current format version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            version: CURRENT_VERSION.to_string(),
            packages: PackagesContent::default(),
            redirects: BTreeMap::new(),
            remote: BTreeMap::new(),
            workspace: WorkspaceConfig::default(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
            && self.redirects.is_empty()
            && self.remote.is_empty()
            && self.workspace.is_empty()
    }
}

impl Default for LockfileContent {
    fn default() -> Self {
        Self::new()
    }
}
