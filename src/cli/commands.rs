//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Schema-driven contract fuzzing for HTTP APIs
#[derive(Parser, Debug)]
#[command(name = "schemaprobe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the service under test (overrides the config file)
    #[arg(short, long, global = true)]
    pub base_url: Option<String>,

    /// OpenAPI document URL (defaults to {base_url}/openapi.yaml)
    #[arg(long, global = true)]
    pub schema_url: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute the suite against the live service
    Run {
        /// Run a single operation instead of the whole suite
        #[arg(long)]
        operation: Option<String>,

        /// RNG seed for reproducing a previous run
        #[arg(long)]
        seed: Option<u64>,

        /// Examples generated per operation per mode
        #[arg(long)]
        max_examples: Option<usize>,
    },

    /// Show the registered operations and their modes
    List,

    /// Fetch the document and print the resolved operation table
    Schema,
}
