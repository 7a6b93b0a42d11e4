//! Temp command implementation

use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;
use treeprops::{PathOptions, SaveOptions};

/// Arguments for the temp command
#[derive(Debug)]
pub struct TempArgs {
    pub file: PathBuf,
    pub label: Option<String>,
}

pub fn execute(args: TempArgs, options: &PathOptions) -> Result<()> {
    let path = save_copy(&args, options)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", path.display())?;
    Ok(())
}

fn save_copy(args: &TempArgs, options: &PathOptions) -> Result<PathBuf> {
    let store = super::load_store(&args.file, options)?;
    store
        .save_temp(args.label.as_deref(), &SaveOptions::default())
        .context("Failed to save temporary copy")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use treeprops::PropertyStore;

    #[test]
    fn test_temp_copy_matches_input() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("in.xml");
        fs::write(&file, "<config><a><b>1</b></a></config>").unwrap();

        let args = TempArgs {
            file: file.clone(),
            label: Some("copy".to_string()),
        };
        let path = save_copy(&args, &PathOptions::default()).unwrap();
        let copy = PropertyStore::from_path(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert!(path.to_string_lossy().ends_with("-copy.xml"));
        assert_eq!(copy, PropertyStore::from_path(&file).unwrap());
    }
}
