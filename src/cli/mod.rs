//! Command-line interface for lockgraph.
//!
//! The CLI is a thin collaborator around the [`lockfile`](crate::lockfile)
//! engine: it reads files, hands their text to the engine and writes the bytes
//! it gets back. Each command lives in its own module with its own argument
//! structure.
//!
//! # Available Commands
//!
//! - `fmt` - rewrite a lockfile in canonical form, or check that it already is
//! - `validate` - parse a lockfile and report what it contains
//! - `prune` - apply a workspace declaration and drop unreachable packages
//!
//! # Global Options
//!
//! - `--verbose` / `-v` - debug logging
//! - `--quiet` / `-q` - errors only
//!
//! `RUST_LOG` takes precedence over both.
//!
//! # Examples
//!
//! ```bash
//! lockgraph fmt deno.lock --check
//! lockgraph validate deno.lock --strict
//! lockgraph --verbose prune deno.lock --config workspace.json --dry-run
//! ```

mod fmt;
mod prune;
mod validate;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

pub use fmt::FmtCommand;
pub use prune::PruneCommand;
pub use validate::ValidateCommand;

/// Runtime configuration derived from the global flags.
///
/// Kept separate from [`Cli`] so tests can build one directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Default log filter, used when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

impl CliConfig {
    /// Install the global `tracing` subscriber writing to stderr.
    ///
    /// Does nothing if a subscriber is already installed.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.log_level));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Lockfile maintenance tool.
#[derive(Parser)]
#[command(
    name = "lockgraph",
    about = "Inspect, format and prune dependency lockfiles",
    version,
    long_about = "lockgraph reads version 1-3 lockfiles, validates them, prints them in canonical form and prunes packages a workspace no longer reaches."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output.
    ///
    /// Equivalent to `RUST_LOG=debug`. Mutually exclusive with `--quiet`.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print errors.
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite a lockfile in canonical form
    Fmt(FmtCommand),

    /// Check that a lockfile parses and report its contents
    Validate(ValidateCommand),

    /// Apply a workspace declaration and remove unreachable packages
    Prune(PruneCommand),
}

impl Cli {
    /// Execute the parsed command.
    pub fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config)
    }

    /// Translate global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };

        CliConfig {
            log_level: log_level.to_string(),
        }
    }

    /// Execute the command with an explicit configuration.
    pub fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        match self.command {
            Commands::Fmt(cmd) => cmd.execute(self.quiet),
            Commands::Validate(cmd) => cmd.execute(self.quiet),
            Commands::Prune(cmd) => cmd.execute(self.quiet),
        }
    }
}
