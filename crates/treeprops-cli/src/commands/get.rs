//! Get command implementation

use anyhow::{Context, Result};
use clap::ValueEnum;
use std::fmt::Display;
use std::io::Write;
use std::path::PathBuf;
use treeprops::{FromPropertyValue, PathOptions, PropertyStore};

/// Type a value is converted to before printing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValueKind {
    Bool,
    Int,
    Float,
}

/// Arguments for the get command
#[derive(Debug)]
pub struct GetArgs {
    pub file: PathBuf,
    pub key: String,
    pub default: Option<String>,
    pub kind: Option<ValueKind>,
    pub strict: bool,
}

pub fn execute(args: GetArgs, options: &PathOptions) -> Result<()> {
    let store = super::load_store(&args.file, options)?;
    let value = lookup(&store, &args)?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", value)?;
    Ok(())
}

/// The text printed for `args.key`.
///
/// Without `--strict`, a missing key or unconvertible value falls back to
/// `--default`, or to the type's zero value when converting.
fn lookup(store: &PropertyStore, args: &GetArgs) -> Result<String> {
    match args.kind {
        None => match (store.get_opt(&args.key), &args.default) {
            (Some(value), _) => Ok(value.to_string()),
            (None, Some(default)) if !args.strict => Ok(default.clone()),
            (None, _) => Ok(store.get(&args.key)?.to_string()),
        },
        Some(ValueKind::Bool) => typed::<bool>(store, args),
        Some(ValueKind::Int) => typed::<i64>(store, args),
        Some(ValueKind::Float) => typed::<f64>(store, args),
    }
}

fn typed<T>(store: &PropertyStore, args: &GetArgs) -> Result<String>
where
    T: FromPropertyValue + Default + Display,
{
    if args.strict {
        return Ok(store.try_get_as::<T>(&args.key)?.to_string());
    }

    let default = match &args.default {
        Some(text) => T::from_property_value(text)
            .with_context(|| format!("Default '{}' is not a valid {}", text, T::TYPE_NAME))?,
        None => T::default(),
    };
    Ok(store.get_as(&args.key, default).to_string())
}
