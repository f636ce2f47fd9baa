//! Insert, update and remove operations.
//!
//! Every operation either applies completely or leaves the lockfile untouched,
//! and is idempotent. The change flag is only raised when the content really
//! changed.

use std::collections::btree_map::Entry;
use tracing::trace;

use super::Lockfile;
use super::content::{JsrPackageInfo, NpmPackageInfo};
use crate::core::LockfileError;

/// Insert or update a map entry, returning whether anything changed.
fn upsert<V: PartialEq>(entry: Entry<'_, String, V>, value: V) -> bool {
    match entry {
        Entry::Vacant(entry) => {
            entry.insert(value);
            true
        }
        Entry::Occupied(mut entry) => {
            if *entry.get() == value {
                false
            } else {
                entry.insert(value);
                true
            }
        }
    }
}

impl Lockfile {
    /// Map a requirement to a resolved package identity.
    ///
    /// The package does not need to exist yet.
    pub fn insert_package_specifier(
        &mut self,
        requirement: impl Into<String>,
        resolved_key: impl Into<String>,
    ) {
        let requirement = requirement.into();
        let resolved_key = resolved_key.into();
        trace!("specifier {requirement} -> {resolved_key}");
        let entry = self.content.packages.specifiers.entry(requirement);
        self.has_content_changed |= upsert(entry, resolved_key);
    }

    /// Insert a registry package, or update the integrity of an existing one.
    ///
    /// Dependencies of an existing entry are preserved.
    ///
    /// WARNING: the caller is responsible for the integrity being correct.
    pub fn insert_package(
        &mut self,
        resolved_key: impl Into<String>,
        integrity: impl Into<String>,
    ) -> Result<(), LockfileError> {
        let resolved_key = resolved_key.into();
        let integrity = integrity.into();
        if integrity.is_empty() {
            return Err(LockfileError::EmptyIntegrity { key: resolved_key });
        }

        match self.content.packages.jsr.entry(resolved_key) {
            Entry::Vacant(entry) => {
                entry.insert(JsrPackageInfo {
                    integrity,
                    dependencies: Default::default(),
                });
                self.has_content_changed = true;
            }
            Entry::Occupied(mut entry) => {
                if entry.get().integrity != integrity {
                    entry.get_mut().integrity = integrity;
                    self.has_content_changed = true;
                }
            }
        }
        Ok(())
    }

    /// Add requirements to the dependency set of an existing registry package.
    ///
    /// # Errors
    ///
    /// [`LockfileError::UnknownPackage`] if `resolved_key` is not in the
    /// lockfile. Nothing is modified in that case.
    pub fn add_package_dependencies<I, S>(
        &mut self,
        resolved_key: &str,
        requirements: I,
    ) -> Result<(), LockfileError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let Some(package) = self.content.packages.jsr.get_mut(resolved_key) else {
            return Err(LockfileError::UnknownPackage {
                key: resolved_key.to_string(),
            });
        };

        let before = package.dependencies.len();
        package.dependencies.extend(requirements.into_iter().map(Into::into));
        if package.dependencies.len() != before {
            self.has_content_changed = true;
        }
        Ok(())
    }

    /// Insert an npm package, replacing any existing entry with the same key.
    ///
    /// WARNING: the caller is responsible for the integrity being correct.
    pub fn insert_npm_package(
        &mut self,
        resolved_key: impl Into<String>,
        info: NpmPackageInfo,
    ) -> Result<(), LockfileError> {
        let resolved_key = resolved_key.into();
        if info.integrity.is_empty() {
            return Err(LockfileError::EmptyIntegrity { key: resolved_key });
        }
        let entry = self.content.packages.npm.entry(resolved_key);
        self.has_content_changed |= upsert(entry, info);
        Ok(())
    }

    /// Record that `from` redirects to `to`.
    ///
    /// Redirect chains are not followed or checked for cycles here. Redirects
    /// from `jsr:` specifiers are ignored; those resolve through `specifiers`.
    pub fn insert_redirect(&mut self, from: impl Into<String>, to: impl Into<String>) {
        let from = from.into();
        if from.starts_with("jsr:") {
            trace!("ignoring redirect from {from}");
            return;
        }
        let entry = self.content.redirects.entry(from);
        self.has_content_changed |= upsert(entry, to.into());
    }

    /// Remove a redirect, returning its target.
    pub fn remove_redirect(&mut self, from: &str) -> Option<String> {
        let removed = self.content.redirects.remove(from);
        if removed.is_some() {
            self.has_content_changed = true;
        }
        removed
    }

    /// Record the content hash of a remote module.
    ///
    /// WARNING: the caller is responsible for the hash being correct.
    pub fn insert_remote(
        &mut self,
        url: impl Into<String>,
        hash: impl Into<String>,
    ) -> Result<(), LockfileError> {
        let url = url.into();
        let hash = hash.into();
        if hash.is_empty() {
            return Err(LockfileError::EmptyIntegrity { key: url });
        }
        let entry = self.content.remote.entry(url);
        self.has_content_changed |= upsert(entry, hash);
        Ok(())
    }

    /// Remove a remote module, returning its hash.
    pub fn remove_remote(&mut self, url: &str) -> Option<String> {
        let removed = self.content.remote.remove(url);
        if removed.is_some() {
            self.has_content_changed = true;
        }
        removed
    }
}
