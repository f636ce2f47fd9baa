//! Rewrite a lockfile in canonical form.
//!
//! Legacy documents are upgraded to version 3 on the way, so `fmt` doubles as
//! the migration command.
//!
//! # Examples
//!
//! ```bash
//! lockgraph fmt deno.lock           # rewrite in place if needed
//! lockgraph fmt deno.lock --check   # exit 1 if the file is not canonical
//! ```

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use tracing::debug;

use crate::lockfile::Lockfile;
use crate::utils::fs::{atomic_write, read_text};

/// Arguments of `lockgraph fmt`.
#[derive(Args, Debug)]
pub struct FmtCommand {
    /// Lockfile to format
    #[arg(value_name = "LOCKFILE")]
    pub file: PathBuf,

    /// Fail instead of writing when the file is not in canonical form
    #[arg(long)]
    pub check: bool,
}

impl FmtCommand {
    pub fn execute(self, quiet: bool) -> Result<()> {
        let text = read_text(&self.file)?;
        let source_id = self.file.display().to_string();
        let lockfile = Lockfile::parse(&source_id, &text)
            .with_context(|| format!("Failed to parse lockfile: {source_id}"))?;

        let canonical = lockfile.to_json()?;
        if canonical == text {
            if !quiet {
                println!("{} {} is already formatted", "✓".green(), source_id);
            }
            return Ok(());
        }

        if self.check {
            bail!("Lockfile {source_id} is not in canonical form (run `lockgraph fmt` to fix)");
        }

        debug!("Rewriting {source_id} ({} -> {} bytes)", text.len(), canonical.len());
        atomic_write(&self.file, canonical.as_bytes())?;
        if !quiet {
            println!("{} Formatted {}", "✓".green(), source_id);
        }
        Ok(())
    }
}
