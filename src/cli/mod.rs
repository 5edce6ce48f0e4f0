//! CLI module
//!
//! Command-line interface for running the contract suite.
//!
//! # Commands
//!
//! - `run` - Execute the suite against the live service
//! - `list` - Show the registered operations
//! - `schema` - Fetch the document and print the operation table

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
