//! Test utilities for lockgraph
//!
//! Shared fixtures and a one-time logging initialiser for tests.
//!
//! # Example
//!
//! ```rust,no_run
//! use lockgraph_cli::lockfile::Lockfile;
//! use lockgraph_cli::test_utils::{LockfileFixture, init_test_logging};
//!
//! init_test_logging(None);
//! let fixture = LockfileFixture::workspace();
//! let lockfile = Lockfile::parse(&fixture.name, &fixture.content).unwrap();
//! assert!(!lockfile.is_empty());
//! ```

pub mod fixtures;

pub use fixtures::LockfileFixture;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Respects `RUST_LOG` if set, otherwise uses `level`. With neither, logging
/// stays off.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
