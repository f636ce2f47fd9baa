//! Utilities shared by the command-line front end.
//!
//! The lockfile engine itself never touches the filesystem; these helpers are
//! where the bytes it produces end up on disk.

pub mod fs;

pub use fs::{atomic_write, read_text};
