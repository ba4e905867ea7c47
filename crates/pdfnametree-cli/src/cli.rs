use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use pdfnametree::DEFAULT_FAN_OUT;

/// List, look up, check and repair the name trees of PDF documents.
#[derive(Debug, Parser)]
#[command(name = "pdfnametree", about, version)]
pub struct Cli {
    /// Increase log verbosity (-v for debug, -vv for trace). RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the entries of the document's name trees
    List {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Name tree category (e.g. Dests, EmbeddedFiles). Default: all categories
        #[arg(long)]
        tree: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Fail on malformed trees instead of repairing them in memory
        #[arg(long)]
        no_repair: bool,
    },

    /// Print the value stored under one key
    Get {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Name tree category (e.g. Dests)
        #[arg(long)]
        tree: String,

        /// Key to look up (UTF-8)
        #[arg(value_name = "KEY")]
        key: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Check every name tree for structural problems
    Check {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Rebuild every name tree and write the result to a new file
    Repair {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Path of the repaired PDF
        #[arg(short, long, value_name = "OUT")]
        output: PathBuf,

        /// Maximum entries per leaf and kids per intermediate node
        #[arg(long, default_value_t = DEFAULT_FAN_OUT)]
        fan_out: usize,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

/// Output format for all subcommands.
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Text,
    /// JSON output
    Json,
}
