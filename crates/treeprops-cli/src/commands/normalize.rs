//! Normalize command implementation
//!
//! Loads a file and saves it again, which sorts elements by path, merges
//! repeated branch elements, and drops attributes and comments.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;
use treeprops::{PathOptions, SaveOptions};

/// Arguments for the normalize command
#[derive(Debug)]
pub struct NormalizeArgs {
    pub file: PathBuf,
    pub output: Option<PathBuf>,
    pub root_label: String,
    pub compact: bool,
}

pub fn execute(args: NormalizeArgs, options: &PathOptions) -> Result<()> {
    let store = super::load_store(&args.file, options)?;

    let mut save_options = SaveOptions::default().with_root_label(&args.root_label);
    if args.compact {
        save_options = save_options.compact();
    }

    let output = args.output.as_ref().unwrap_or(&args.file);
    store
        .save(output, &save_options)
        .with_context(|| format!("Failed to save '{}'", output.display()))?;

    info!(
        input = %args.file.display(),
        output = %output.display(),
        count = store.len(),
        "Normalized"
    );
    Ok(())
}
