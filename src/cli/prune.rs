//! Apply a workspace declaration and remove packages it no longer reaches.
//!
//! The declaration is a JSON file in the same shape as the lockfile's
//! `workspace` section:
//!
//! ```json
//! {
//!   "dependencies": ["jsr:@std/path@1"],
//!   "packageJson": { "dependencies": ["npm:chalk@5"] },
//!   "members": { "tools": { "dependencies": ["jsr:@std/fs@1"] } }
//! }
//! ```
//!
//! # Examples
//!
//! ```bash
//! lockgraph prune deno.lock --config workspace.json
//! lockgraph prune deno.lock --config workspace.json --no-npm
//! lockgraph prune deno.lock --no-config --dry-run
//! ```

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::lockfile::{Lockfile, PackagesContent, SetWorkspaceConfigOptions, WorkspaceConfig};
use crate::utils::fs::{atomic_write, read_text};

/// Arguments of `lockgraph prune`.
#[derive(Args, Debug)]
pub struct PruneCommand {
    /// Lockfile to prune
    #[arg(value_name = "LOCKFILE")]
    pub file: PathBuf,

    /// Workspace declaration (JSON)
    #[arg(long, value_name = "FILE", required_unless_present = "no_config")]
    pub config: Option<PathBuf>,

    /// Keep the registry dependencies currently recorded in the lockfile
    #[arg(long)]
    pub no_config: bool,

    /// Keep the package.json dependencies currently recorded in the lockfile
    #[arg(long)]
    pub no_npm: bool,

    /// Print the pruned lockfile instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

impl PruneCommand {
    pub fn execute(self, quiet: bool) -> Result<()> {
        let text = read_text(&self.file)?;
        let source_id = self.file.display().to_string();
        let mut lockfile = Lockfile::parse(&source_id, &text)
            .with_context(|| format!("Failed to parse lockfile: {source_id}"))?;

        let config = match &self.config {
            Some(path) => load_workspace_config(path)?,
            None => WorkspaceConfig::default(),
        };

        let before = lockfile.content().packages.clone();
        lockfile.set_workspace_config(SetWorkspaceConfigOptions {
            config,
            no_config: self.no_config,
            no_npm: self.no_npm,
        });
        let removed = removed_entries(&before, &lockfile.content().packages);

        if self.dry_run {
            print!("{}", lockfile.to_json()?);
            if !quiet {
                for entry in &removed {
                    eprintln!("{} would remove {}", "-".red(), entry);
                }
            }
            return Ok(());
        }

        match lockfile.resolve_write_bytes()? {
            Some(bytes) => {
                atomic_write(&self.file, &bytes)?;
                if !quiet {
                    for entry in &removed {
                        println!("{} {}", "-".red(), entry);
                    }
                    println!(
                        "{} Pruned {} ({} entries removed)",
                        "✓".green(),
                        source_id,
                        removed.len()
                    );
                }
            }
            None => {
                if !quiet {
                    println!("{} {} is up to date", "✓".green(), source_id);
                }
            }
        }
        Ok(())
    }
}

fn load_workspace_config(path: &Path) -> Result<WorkspaceConfig> {
    let text = read_text(path)?;
    serde_json::from_str(&text)
        .with_context(|| format!("Invalid workspace declaration: {}", path.display()))
}

/// Human-readable labels of the entries present in `before` but not in `after`.
fn removed_entries(before: &PackagesContent, after: &PackagesContent) -> Vec<String> {
    let specifiers = before
        .specifiers
        .keys()
        .filter(|req| !after.specifiers.contains_key(*req))
        .map(|req| format!("specifier {req}"));
    let jsr = before
        .jsr
        .keys()
        .filter(|key| !after.jsr.contains_key(*key))
        .map(|key| format!("jsr:{key}"));
    let npm = before
        .npm
        .keys()
        .filter(|key| !after.npm.contains_key(*key))
        .map(|key| format!("npm:{key}"));
    specifiers.chain(jsr).chain(npm).collect()
}
