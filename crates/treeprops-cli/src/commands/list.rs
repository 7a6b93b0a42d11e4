//! List command implementation

use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;
use treeprops::{PathOptions, PropertyStore};

/// Arguments for the list command
#[derive(Debug)]
pub struct ListArgs {
    pub file: PathBuf,
    pub json: bool,
}

pub fn execute(args: ListArgs, options: &PathOptions) -> Result<()> {
    let store = super::load_store(&args.file, options)?;
    let mut stdout = std::io::stdout().lock();
    write_listing(&store, args.json, &mut stdout)
}

fn write_listing(store: &PropertyStore, json: bool, out: &mut impl Write) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, store.properties())?;
        writeln!(out)?;
    } else {
        write!(out, "{}", store)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(json: bool) -> String {
        let store: PropertyStore = [("/b", "2"), ("/a/x", "1")].into_iter().collect();
        let mut out = Vec::new();
        write_listing(&store, json, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_plain_listing() {
        assert_eq!(render(false), "/a/x -> 1\n/b -> 2\n");
    }

    #[test]
    fn test_json_listing() {
        let parsed: serde_json::Value = serde_json::from_str(&render(true)).unwrap();
        assert_eq!(parsed, serde_json::json!({ "/a/x": "1", "/b": "2" }));
    }
}
