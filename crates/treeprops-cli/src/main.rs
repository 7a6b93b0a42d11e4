//! treeprops CLI - Main entry point

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use treeprops::{DEFAULT_ROOT_LABEL, DEFAULT_SEPARATOR, PathOptions};

mod commands;
mod diagnostics;

#[derive(Parser)]
#[command(name = "treeprops")]
#[command(version)]
#[command(about = "Read and edit XML configuration files as flat property paths", long_about = None)]
struct Cli {
    /// Character joining path segments
    #[arg(long, global = true, default_value_t = DEFAULT_SEPARATOR)]
    separator: char,

    /// Use the document root's name as the first path segment
    #[arg(long, global = true)]
    include_root: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every property of a file
    List {
        /// Configuration file
        file: PathBuf,

        /// Print a JSON object instead of `path -> value` lines
        #[arg(long)]
        json: bool,
    },

    /// Print the value of one property
    Get {
        /// Configuration file
        file: PathBuf,

        /// Property path, e.g. /server/port
        key: String,

        /// Value printed when the property is missing or does not convert
        #[arg(short, long)]
        default: Option<String>,

        /// Convert the value before printing it
        #[arg(long = "as", value_enum)]
        kind: Option<commands::get::ValueKind>,

        /// Fail instead of falling back to the default
        #[arg(long)]
        strict: bool,
    },

    /// Set one property and save the file
    Set {
        /// Configuration file
        file: PathBuf,

        /// Property path, e.g. /server/port
        key: String,

        /// New value
        value: String,

        /// Write the result to FILE instead of overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Label of the element wrapping all properties, unused with --include-root
        #[arg(long, default_value = DEFAULT_ROOT_LABEL)]
        root_label: String,
    },

    /// Rewrite a file in canonical form
    Normalize {
        /// Configuration file
        file: PathBuf,

        /// Write the result to FILE instead of overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Label of the element wrapping all properties, unused with --include-root
        #[arg(long, default_value = DEFAULT_ROOT_LABEL)]
        root_label: String,

        /// Write the document on a single line
        #[arg(long)]
        compact: bool,
    },

    /// Save a copy of a file to the temp directory and print its path
    Temp {
        /// Configuration file
        file: PathBuf,

        /// Suffix for the generated file name
        #[arg(short, long)]
        label: Option<String>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "treeprops=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let options = PathOptions {
        separator: cli.separator,
        include_root: cli.include_root,
        ..PathOptions::default()
    };

    match cli.command {
        Commands::List { file, json } => {
            commands::list::execute(commands::list::ListArgs { file, json }, &options)
        }
        Commands::Get {
            file,
            key,
            default,
            kind,
            strict,
        } => commands::get::execute(
            commands::get::GetArgs {
                file,
                key,
                default,
                kind,
                strict,
            },
            &options,
        ),
        Commands::Set {
            file,
            key,
            value,
            output,
            root_label,
        } => commands::set::execute(
            commands::set::SetArgs {
                file,
                key,
                value,
                output,
                root_label,
            },
            &options,
        ),
        Commands::Normalize {
            file,
            output,
            root_label,
            compact,
        } => commands::normalize::execute(
            commands::normalize::NormalizeArgs {
                file,
                output,
                root_label,
                compact,
            },
            &options,
        ),
        Commands::Temp { file, label } => {
            commands::temp::execute(commands::temp::TempArgs { file, label }, &options)
        }
    }
}
