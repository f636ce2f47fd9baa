//! Validate a lockfile and print a summary of its tables.
//!
//! Without `--strict`, references to packages missing from the document are
//! logged as warnings and the lockfile is still accepted. With it, the first
//! such reference fails the command.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::lockfile::{Lockfile, ParseOptions};
use crate::utils::fs::read_text;

/// Arguments of `lockgraph validate`.
#[derive(Args, Debug)]
pub struct ValidateCommand {
    /// Lockfile to validate
    #[arg(value_name = "LOCKFILE")]
    pub file: PathBuf,

    /// Treat references to missing packages as errors
    #[arg(long, env = "LOCKGRAPH_STRICT")]
    pub strict: bool,
}

impl ValidateCommand {
    pub fn execute(self, quiet: bool) -> Result<()> {
        let text = read_text(&self.file)?;
        let source_id = self.file.display().to_string();
        let options = ParseOptions {
            strict: self.strict,
            overwrite: false,
        };
        let lockfile = Lockfile::parse_with_options(&source_id, &text, options)
            .with_context(|| format!("Failed to validate lockfile: {source_id}"))?;

        if quiet {
            return Ok(());
        }

        let content = lockfile.content();
        println!("{} Valid lockfile {}", "✓".green(), source_id.bold());
        println!("  Specifiers: {}", content.packages.specifiers.len());
        println!("  JSR packages: {}", content.packages.jsr.len());
        println!("  npm packages: {}", content.packages.npm.len());
        println!("  Redirects: {}", content.redirects.len());
        println!("  Remote modules: {}", content.remote.len());
        if !content.workspace.is_empty() {
            println!("  Workspace members: {}", content.workspace.members.len());
        }
        Ok(())
    }
}
