//! Parsing and printing of lockfile documents.
//!
//! This module turns text into a validated [`Lockfile`] and back. It never
//! touches the filesystem: callers hand in the text and decide where the
//! bytes from [`Lockfile::resolve_write_bytes`] go.

use serde_json::Value;
use tracing::{debug, warn};

use super::content::{CURRENT_VERSION, LockfileContent};
use super::transforms::{JsonMap, transform1_to_2, transform2_to_3};
use super::{Lockfile, validation};
use crate::core::LockfileError;

/// Options controlling how a document is loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Fail with [`LockfileError::InvalidReference`] instead of accepting
    /// references to packages that are not in the document.
    pub strict: bool,
    /// Ignore the text and start from an empty lockfile that is always written.
    pub overwrite: bool,
}

impl Lockfile {
    /// Parse a lockfile with default options.
    ///
    /// `source_id` is an opaque label (usually the path) carried alongside the
    /// document and used in error messages.
    pub fn parse(source_id: impl Into<String>, text: &str) -> Result<Self, LockfileError> {
        Self::parse_with_options(source_id, text, ParseOptions::default())
    }

    /// Parse a lockfile.
    ///
    /// # Errors
    ///
    /// - [`LockfileError::Parse`] for empty input, invalid JSON, wrong value
    ///   types or empty integrity tokens
    /// - [`LockfileError::UnsupportedVersion`] for unknown versions
    /// - [`LockfileError::InvalidReference`] in strict mode when an entry
    ///   references a package that is not defined
    pub fn parse_with_options(
        source_id: impl Into<String>,
        text: &str,
        options: ParseOptions,
    ) -> Result<Self, LockfileError> {
        let source_id = source_id.into();

        if options.overwrite {
            debug!("Ignoring existing content of '{source_id}' (overwrite)");
            return Ok(Self::new_empty(source_id, true));
        }

        if text.trim().is_empty() {
            return Err(LockfileError::parse(&source_id, "lockfile is empty"));
        }

        let json: JsonMap = serde_json::from_str(text)
            .map_err(|err| LockfileError::parse(&source_id, err.to_string()))?;
        let json = upgrade(&source_id, json)?;
        let content: LockfileContent = serde_json::from_value(Value::Object(json))
            .map_err(|err| LockfileError::parse(&source_id, err.to_string()))?;

        validation::check_integrity(&source_id, &content)?;
        for dangling in validation::dangling_references(&content) {
            if options.strict {
                return Err(LockfileError::InvalidReference {
                    source_id,
                    referrer: dangling.referrer,
                    target: dangling.target,
                });
            }
            warn!(
                "Lockfile '{}': '{}' references '{}', which is not in the lockfile",
                source_id, dangling.referrer, dangling.target
            );
        }

        Ok(Self {
            source_id,
            overwrite: false,
            has_content_changed: false,
            content,
        })
    }

    /// The canonical text form of the lockfile.
    ///
    /// JSON indented with two spaces, tables in lexicographic key order and a
    /// trailing newline. Always printed from the model, even when nothing
    /// changed: non-canonical input text is not echoed back.
    ///
    /// # Errors
    ///
    /// [`LockfileError::Serialize`] if `serde_json` fails to print the model.
    pub fn to_json(&self) -> Result<String, LockfileError> {
        let mut text = serde_json::to_string_pretty(&self.content).map_err(|err| {
            LockfileError::Serialize {
                source_id: self.source_id.clone(),
                reason: err.to_string(),
            }
        })?;
        text.push('\n');
        Ok(text)
    }

    /// Bytes to write to disk, if anything needs writing.
    ///
    /// Returns `None` when nothing changed (and the lockfile is not in
    /// overwrite mode). Otherwise returns the canonical text and resets the
    /// change flag, so the caller is expected to actually write it.
    pub fn resolve_write_bytes(&mut self) -> Result<Option<Vec<u8>>, LockfileError> {
        if !self.has_content_changed && !self.overwrite {
            return Ok(None);
        }
        let bytes = self.to_json()?.into_bytes();
        self.has_content_changed = false;
        Ok(Some(bytes))
    }
}

fn upgrade(source_id: &str, json: JsonMap) -> Result<JsonMap, LockfileError> {
    let version = match json.get("version") {
        None => None,
        Some(Value::String(version)) => Some(version.clone()),
        Some(other) => {
            return Err(LockfileError::parse(
                source_id,
                format!("'version' must be a string, found {other}"),
            ));
        }
    };

    match version.as_deref() {
        Some(CURRENT_VERSION) => Ok(json),
        Some("2") => {
            debug!("Upgrading '{source_id}' from lockfile version 2");
            Ok(transform2_to_3(json))
        }
        None => {
            debug!("Upgrading unversioned lockfile '{source_id}'");
            Ok(transform2_to_3(transform1_to_2(json)))
        }
        Some(version) => Err(LockfileError::UnsupportedVersion {
            source_id: source_id.to_string(),
            version: version.to_string(),
        }),
    }
}
