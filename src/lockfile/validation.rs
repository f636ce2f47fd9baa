//! Consistency checks run after a document is parsed.
//!
//! Empty integrity tokens are always rejected. Dangling references are a soft
//! condition: lockfiles written in stages may mention packages whose entries
//! have not been filled in yet, so they only fail the parse in strict mode.

use super::content::LockfileContent;
use crate::core::LockfileError;

/// A reference from one entry to a package identity that is not present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DanglingReference {
    pub referrer: String,
    pub target: String,
}

pub(crate) fn check_integrity(source_id: &str, content: &LockfileContent) -> Result<(), LockfileError> {
    let packages = &content.packages;
    let empty = packages
        .jsr
        .iter()
        .map(|(key, info)| (key, &info.integrity))
        .chain(packages.npm.iter().map(|(key, info)| (key, &info.integrity)))
        .chain(content.remote.iter())
        .find(|(_, integrity)| integrity.is_empty());

    match empty {
        Some((key, _)) => Err(LockfileError::parse(
            source_id,
            format!("entry '{key}' has an empty integrity"),
        )),
        None => Ok(()),
    }
}

pub(crate) fn dangling_references(content: &LockfileContent) -> Vec<DanglingReference> {
    let packages = &content.packages;
    let mut dangling = Vec::new();

    for (req, id) in &packages.specifiers {
        if packages.resolve_id(id).is_none() {
            dangling.push(DanglingReference {
                referrer: req.clone(),
                target: id.clone(),
            });
        }
    }

    for (key, info) in &packages.jsr {
        for req in &info.dependencies {
            // a dependency on a dangling specifier is already reported above
            if !packages.specifiers.contains_key(req) && packages.resolve_id(req).is_none() {
                dangling.push(DanglingReference {
                    referrer: format!("jsr:{key}"),
                    target: req.clone(),
                });
            }
        }
    }

    for (key, info) in &packages.npm {
        for dep_id in info.dependencies.values() {
            if !packages.npm.contains_key(dep_id) {
                dangling.push(DanglingReference {
                    referrer: format!("npm:{key}"),
                    target: dep_id.clone(),
                });
            }
        }
    }

    dangling
}
