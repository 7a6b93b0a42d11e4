//! Set command implementation

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;
use treeprops::{PathOptions, SaveOptions};

/// Arguments for the set command
#[derive(Debug)]
pub struct SetArgs {
    pub file: PathBuf,
    pub key: String,
    pub value: String,
    /// Destination; the input file when absent
    pub output: Option<PathBuf>,
    pub root_label: String,
}

pub fn execute(args: SetArgs, options: &PathOptions) -> Result<()> {
    let mut store = super::load_store(&args.file, options)?;
    let previous = store.get_opt(&args.key).map(str::to_string);
    store.set(args.key.as_str(), args.value.as_str());

    let output = args.output.as_ref().unwrap_or(&args.file);
    store
        .save(output, &SaveOptions::default().with_root_label(&args.root_label))
        .with_context(|| format!("Failed to save '{}'", output.display()))?;

    info!(
        key = %args.key,
        previous = previous.as_deref().unwrap_or("<unset>"),
        value = %args.value,
        "Property set"
    );
    Ok(())
}
