//! Error handling for lockgraph
//!
//! Two layers live here:
//! - [`LockfileError`] - the strongly-typed failures of the lockfile engine. Every
//!   variant is recoverable and no failing operation leaves a partial write behind.
//! - [`ErrorContext`] - a CLI-facing wrapper that adds a suggestion and details to
//!   an error before it is printed.
//!
//! # Examples
//!
//! ```rust,no_run
//! use lockgraph_cli::core::{LockfileError, user_friendly_error};
//! use lockgraph_cli::lockfile::Lockfile;
//!
//! match Lockfile::parse("deno.lock", "{ \"version\": \"2000\" }") {
//!     Err(LockfileError::UnsupportedVersion { version, .. }) => assert_eq!(version, "2000"),
//!     other => panic!("unexpected: {other:?}"),
//! }
//!
//! let err = Lockfile::parse("deno.lock", "not json").unwrap_err();
//! user_friendly_error(anyhow::Error::from(err)).display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// Failures reported by the lockfile engine.
///
/// Parsing failures carry the source identifier of the document so that callers
/// juggling several lockfiles can tell them apart. Mutation failures carry the
/// package key they were called with.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LockfileError {
    /// The document is not valid JSON or does not have the lockfile shape.
    ///
    /// Also raised for empty input and for package entries with an empty
    /// integrity token.
    #[error("Unable to parse contents of lockfile '{source_id}': {reason}")]
    Parse {
        /// Opaque label of the document (usually its path)
        source_id: String,
        /// What was wrong with it
        reason: String,
    },

    /// The document declares a `version` this engine cannot read.
    #[error(
        "Unsupported lockfile version '{version}' in '{source_id}'. Try upgrading or recreating the lockfile."
    )]
    UnsupportedVersion {
        /// Opaque label of the document
        source_id: String,
        /// The version string found in the document
        version: String,
    },

    /// Strict mode only: an entry points at a package that is not in the document.
    #[error("Lockfile '{source_id}' has a dangling reference from '{referrer}' to '{target}'")]
    InvalidReference {
        /// Opaque label of the document
        source_id: String,
        /// The specifier or package holding the reference
        referrer: String,
        /// The package identity that could not be found
        target: String,
    },

    /// A mutation targeted a registry package that is not in the document.
    #[error("Package '{key}' is not present in the lockfile")]
    UnknownPackage {
        /// The resolved package key that was looked up
        key: String,
    },

    /// The model could not be printed as JSON.
    #[error("Unable to serialize lockfile '{source_id}': {reason}")]
    Serialize {
        /// Opaque label of the document
        source_id: String,
        /// What the serializer reported
        reason: String,
    },

    /// A mutation supplied an empty integrity token.
    #[error("Integrity for '{key}' must not be empty")]
    EmptyIntegrity {
        /// The key the integrity was supplied for
        key: String,
    },
}

impl LockfileError {
    pub(crate) fn parse(source_id: &str, reason: impl Into<String>) -> Self {
        Self::Parse {
            source_id: source_id.to_string(),
            reason: reason.into(),
        }
    }
}

/// An error message decorated with an optional suggestion and details.
///
/// Used by the binary to print failures in a consistent, colored format.
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// The primary error message
    pub message: String,
    /// What the user can do about it
    pub suggestion: Option<String>,
    /// Additional background
    pub details: Option<String>,
}

impl ErrorContext {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            details: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print to stderr with colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.message);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with suggestions where we know the cause.
///
/// The whole `anyhow` chain is searched, so a [`LockfileError`] wrapped in
/// `.context(...)` still gets its specific advice.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(ctx) = error.downcast_ref::<ErrorContext>() {
        return ctx.clone();
    }

    let message = format!("{error:#}");
    for cause in error.chain() {
        if let Some(lockfile_error) = cause.downcast_ref::<LockfileError>() {
            return create_error_context(message, lockfile_error);
        }

        if let Some(io_error) = cause.downcast_ref::<std::io::Error>() {
            return match io_error.kind() {
                std::io::ErrorKind::NotFound => ErrorContext::new(message)
                    .with_suggestion("Check that the file exists and the path is correct"),
                std::io::ErrorKind::PermissionDenied => ErrorContext::new(message)
                    .with_suggestion("Check the file ownership and permissions"),
                _ => ErrorContext::new(message),
            };
        }
    }

    ErrorContext::new(message)
}

fn create_error_context(message: String, error: &LockfileError) -> ErrorContext {
    match error {
        LockfileError::Parse { .. } => ErrorContext::new(message)
            .with_suggestion("Fix the JSON syntax or delete the lockfile so it can be regenerated")
            .with_details("The lockfile must be a JSON object with a string 'version' field"),
        LockfileError::UnsupportedVersion { .. } => ErrorContext::new(message)
            .with_suggestion("Upgrade lockgraph or recreate the lockfile")
            .with_details("Supported lockfile versions are 1, 2 and 3; older versions are upgraded on load"),
        LockfileError::InvalidReference { .. } => ErrorContext::new(message)
            .with_suggestion("Run without --strict to accept partially constructed lockfiles"),
        LockfileError::UnknownPackage { .. } => ErrorContext::new(message)
            .with_suggestion("Insert the package before adding dependencies to it"),
        LockfileError::Serialize { .. } => ErrorContext::new(message),
        LockfileError::EmptyIntegrity { .. } => ErrorContext::new(message)
            .with_details("Every package and remote entry needs a non-empty integrity token"),
    }
}
