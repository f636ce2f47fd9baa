//! Lockfile management for reproducible module graphs.
//!
//! A lockfile maps abstract package requirements to exact resolved versions,
//! records their integrity hashes and dependency edges, and pins the content
//! hashes of remote modules. This module is the in-memory engine: it parses a
//! document into a validated model, applies mutations, prunes the package graph
//! against a workspace declaration and prints a canonical form. Reading and
//! writing files is left to the caller.
//!
//! # Lockfile Format
//!
//! ```json
//! {
//!   "version": "3",
//!   "packages": {
//!     "specifiers": {
//!       "jsr:@std/path@^1": "jsr:@std/path@1.0.0",
//!       "npm:chalk@5": "npm:chalk@5.0.0"
//!     },
//!     "jsr": {
//!       "@std/path@1.0.0": {
//!         "integrity": "1a2b...",
//!         "dependencies": ["npm:chalk@5"]
//!       }
//!     },
//!     "npm": {
//!       "chalk@5.0.0": {
//!         "integrity": "sha512-...",
//!         "dependencies": { "ansi-styles": "ansi-styles@4.1.0" }
//!       }
//!     }
//!   },
//!   "redirects": { "https://deno.land/x/mod.ts": "https://deno.land/x/mod@1.0.0/mod.ts" },
//!   "remote": { "https://deno.land/x/mod@1.0.0/mod.ts": "3118d7a4..." },
//!   "workspace": {
//!     "dependencies": ["jsr:@std/path@^1"],
//!     "packageJson": { "dependencies": ["npm:chalk@5"] },
//!     "members": { "app": { "dependencies": ["jsr:@std/fs@1"] } }
//!   }
//! }
//! ```
//!
//! `version` and `remote` are always written. `packages`, `redirects` and
//! `workspace` are omitted while empty. Keys are printed in lexicographic order.
//!
//! ## Tables
//!
//! - **specifiers**: requirement string to resolved identity. Values carry an
//!   ecosystem prefix (`jsr:`/`npm:`).
//! - **jsr**: registry packages. Their `dependencies` are requirement strings
//!   resolved through `specifiers`.
//! - **npm**: npm packages. Their `dependencies` map a dependency name straight
//!   to a resolved npm identity.
//! - **redirects** / **remote**: keyed by URL and never pruned.
//! - **workspace**: the requirements declared when the lockfile was last pruned.
//!
//! # Versions
//!
//! Version `"3"` is read as is. Version `"2"` and unversioned (v1) documents are
//! upgraded on load; output is always version `"3"`. Anything else fails with
//! [`LockfileError::UnsupportedVersion`](crate::core::LockfileError::UnsupportedVersion).
//!
//! # Snapshots
//!
//! [`Lockfile::copy`] returns a deep, independent copy. Mutating either side
//! never affects the other, which lets a caller try a workspace change and
//! throw it away.
//!
//! # Example
//!
//! ```rust
//! use lockgraph_cli::lockfile::{Lockfile, NpmPackageInfo};
//! use std::collections::BTreeMap;
//!
//! # fn example() -> Result<(), lockgraph_cli::core::LockfileError> {
//! let mut lockfile = Lockfile::parse("deno.lock", r#"{ "version": "3", "remote": {} }"#)?;
//! lockfile.insert_package_specifier("npm:which@2", "npm:which@2.0.2");
//! lockfile.insert_npm_package(
//!     "which@2.0.2",
//!     NpmPackageInfo {
//!         integrity: "sha512-which".to_string(),
//!         dependencies: BTreeMap::from([("isexe".to_string(), "isexe@2.0.0".to_string())]),
//!     },
//! )?;
//! assert!(lockfile.has_content_changed());
//! let text = lockfile.to_json()?;
//! assert!(text.contains("\"which@2.0.2\""));
//! # Ok(())
//! # }
//! ```

mod content;
mod io;
mod mutations;
pub mod package_graph;
mod transforms;
mod validation;
mod workspace;

pub use content::{
    CURRENT_VERSION, JsrPackageInfo, LockfileContent, NpmPackageInfo, PackageId, PackagesContent,
};
pub use io::ParseOptions;
pub use workspace::{
    PackageJsonDeps, SetWorkspaceConfigOptions, WorkspaceConfig, WorkspaceMemberConfig,
};

use std::collections::BTreeMap;

/// A lockfile document together with its session state.
///
/// Cloning (or [`Lockfile::copy`]) duplicates every table; no mutable state is
/// shared between a lockfile and its copy.
#[derive(Debug, Clone)]
pub struct Lockfile {
    /// Opaque label of the document, usually the path it was read from.
    source_id: String,
    /// Ignore existing content and always produce output on write.
    overwrite: bool,
    /// Set by every operation that actually changed the content.
    has_content_changed: bool,
    content: LockfileContent,
}

impl Lockfile {
    /// Create an empty lockfile.
    ///
    /// With `overwrite` set, [`Lockfile::resolve_write_bytes`] always returns
    /// bytes even if nothing was inserted.
    #[must_use]
    pub fn new_empty(source_id: impl Into<String>, overwrite: bool) -> Self {
        Self {
            source_id: source_id.into(),
            overwrite,
            has_content_changed: false,
            content: LockfileContent::new(),
        }
    }

    /// Deep copy of this lockfile. See the [module docs](self#snapshots).
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// The label this lockfile was created with.
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn content(&self) -> &LockfileContent {
        &self.content
    }

    /// Whether any operation changed the content since creation or the last
    /// [`Lockfile::resolve_write_bytes`].
    pub fn has_content_changed(&self) -> bool {
        self.has_content_changed
    }

    pub fn overwrite(&self) -> bool {
        self.overwrite
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn specifiers(&self) -> &BTreeMap<String, String> {
        &self.content.packages.specifiers
    }

    pub fn jsr_package(&self, key: &str) -> Option<&JsrPackageInfo> {
        self.content.packages.jsr.get(key)
    }

    pub fn npm_package(&self, key: &str) -> Option<&NpmPackageInfo> {
        self.content.packages.npm.get(key)
    }

    pub fn redirects(&self) -> &BTreeMap<String, String> {
        &self.content.redirects
    }

    pub fn remote(&self) -> &BTreeMap<String, String> {
        &self.content.remote
    }

    pub fn workspace(&self) -> &WorkspaceConfig {
        &self.content.workspace
    }
}
