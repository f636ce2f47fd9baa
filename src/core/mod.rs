//! Core types for lockgraph
//!
//! Currently this is the error layer shared by the lockfile engine and the
//! command-line front end:
//!
//! - [`LockfileError`] for precise matching in library code
//! - [`ErrorContext`] and [`user_friendly_error`] for printing failures with a
//!   suggestion attached

pub mod error;

pub use error::{ErrorContext, LockfileError, user_friendly_error};
