//! CLI `new` command: scaffold a research note and print its path.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use quarry::config::{expand_tilde, QuarryConfig};
use quarry::notes::{NoteScaffolder, ScaffoldOptions};

#[derive(Args)]
pub struct NewArgs {
    /// Research topic (see `quarry topics`)
    #[arg(long)]
    pub topic: String,

    /// Short label for the filename; normalized to lowercase kebab-case
    #[arg(long)]
    pub slug: String,

    /// Workspace root (default: config `workspace.root` / $OPENCLAW_WORKSPACE)
    #[arg(long)]
    pub workspace: Option<PathBuf>,
}

pub fn new_note(config: &QuarryConfig, args: NewArgs) -> Result<()> {
    let workspace = match args.workspace {
        Some(path) => expand_tilde(&path.to_string_lossy()),
        None => config.resolved_workspace(),
    };

    let scaffolder = NoteScaffolder::new(workspace, ScaffoldOptions::from(&config.workspace));
    let path = scaffolder.create_note(&args.topic, &args.slug)?;

    println!("{}", path.display());
    Ok(())
}
