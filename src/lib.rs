//! # schemaprobe
//!
//! Schema-driven contract fuzzing for HTTP APIs.
//!
//! Fetches an OpenAPI document from the service under test, synthesizes
//! positive (schema-valid) and negative (deliberately schema-violating)
//! request cases per operation, executes them, and checks every response
//! against the declared statuses and body schemas. A create-or-login
//! bootstrap supplies the session cookie for authenticated operations.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use schemaprobe::config::RunConfig;
//! use schemaprobe::runner::{default_suite, Executor};
//!
//! #[tokio::main]
//! async fn main() -> schemaprobe::Result<()> {
//!     let config = RunConfig::new("http://api:8080").with_seed(42);
//!     let mut executor = Executor::from_config(&config).await?;
//!     let report = executor.run(&default_suite()).await?;
//!     assert!(report.is_success());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                         Executor                           │
//! │  run(suite) → RunReport                                    │
//! └────────────────────────────────────────────────────────────┘
//!            │              │               │            │
//! ┌──────────┴───┬──────────┴────┬──────────┴───┬────────┴────┐
//! │    Schema    │   Generate    │     Auth     │    Http     │
//! ├──────────────┼───────────────┼──────────────┼─────────────┤
//! │ Fetch doc    │ Positive case │ Signup 201   │ Execute     │
//! │ Resolve refs │ Negative case │ 409 → login  │ Capture     │
//! │ Validate     │ Seeded RNG    │ Cookie apply │             │
//! └──────────────┴───────────────┴──────────────┴─────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Run configuration
pub mod config;

/// Authentication bootstrap
pub mod auth;

/// OpenAPI schema handling
pub mod schema;

/// Case generation
pub mod generate;

/// HTTP execution
pub mod http;

/// Suite execution
pub mod runner;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
