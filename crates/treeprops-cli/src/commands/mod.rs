//! Command implementations for the treeprops CLI
//!
//! Each command module handles the CLI interface and delegates to the
//! treeprops library for the actual work.

pub mod get;
pub mod list;
pub mod normalize;
pub mod set;
pub mod temp;

use anyhow::{Context, Result};
use std::path::Path;
use treeprops::{PathOptions, PropertyStore};

use crate::diagnostics;

/// Load `file` into a store, printing an annotated report for errors that
/// point into the file.
pub fn load_store(file: &Path, options: &PathOptions) -> Result<PropertyStore> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read '{}'", file.display()))?;

    let mut store = PropertyStore::with_options(options.clone());
    if let Err(err) = store.load_str(&content) {
        let name = file.display().to_string();
        if let Some(report) = diagnostics::render_load_error(&name, &content, &err) {
            eprint!("{}", report);
        }
        return Err(err).with_context(|| format!("Failed to load '{}'", name));
    }

    tracing::debug!(path = %file.display(), count = store.len(), "Loaded store");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_store_uses_options() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("in.xml");
        fs::write(&path, "<config><a.b>1</a.b><c><d>2</d></c></config>").unwrap();

        let options = PathOptions {
            separator: '.',
            include_root: true,
            ..PathOptions::default()
        };
        let store = load_store(&path, &options).unwrap();
        assert_eq!(store.get(".config.c.d").unwrap(), "2");
        assert_eq!(store.get(".config.a.b").unwrap(), "1");
    }

    #[test]
    fn test_load_store_keeps_library_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dup.xml");
        fs::write(&path, "<config><a>1</a><a>2</a></config>").unwrap();

        let err = load_store(&path, &PathOptions::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<treeprops::Error>(),
            Some(treeprops::Error::DuplicatePath { .. })
        ));
    }

    #[test]
    fn test_load_store_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_store(&dir.path().join("absent.xml"), &PathOptions::default()).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
