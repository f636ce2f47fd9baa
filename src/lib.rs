//! lockgraph - lockfile engine for reproducible module graphs
//!
//! A lockfile pins every package requirement of a workspace to an exact resolved
//! version together with its integrity hash and dependency edges, and records the
//! content hashes of remote modules. This crate parses such documents into a
//! validated in-memory model, lets a resolver insert and update entries, prunes
//! the package graph down to what the workspace actually declares, and prints a
//! canonical, diff-friendly form.
//!
//! # Architecture Overview
//!
//! - The engine ([`lockfile`]) is pure: it takes text and returns text or bytes.
//!   Reading, writing and locking files is the caller's job.
//! - Pruning is a reachability walk over a [`petgraph`] graph of requirements
//!   and packages, recomputed from scratch each time a workspace is declared.
//! - Errors are typed ([`core::LockfileError`]) so callers can match on them;
//!   the CLI turns them into messages with suggestions.
//!
//! # Core Modules
//!
//! - [`lockfile`] - document model, parser, mutations and pruning
//! - [`core`] - error types and user-facing error formatting
//! - [`cli`] - the `lockgraph` command-line front end (`fmt`, `validate`, `prune`)
//! - [`utils`] - file helpers used by the CLI
//!
//! # Example
//!
//! ```rust
//! use lockgraph_cli::lockfile::{Lockfile, WorkspaceConfig};
//!
//! # fn example() -> Result<(), lockgraph_cli::core::LockfileError> {
//! let mut lockfile = Lockfile::new_empty("deno.lock", false);
//! lockfile.insert_package_specifier("jsr:@std/path@1", "jsr:@std/path@1.0.0");
//! lockfile.insert_package("@std/path@1.0.0", "sha-path")?;
//!
//! let mut workspace = WorkspaceConfig::default();
//! workspace.root.dependencies.insert("jsr:@std/path@1".to_string());
//! lockfile.set_workspace_config(workspace.into());
//!
//! let bytes = lockfile.resolve_write_bytes()?;
//! assert!(bytes.is_some());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod core;
pub mod lockfile;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
