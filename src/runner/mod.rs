//! Suite execution
//!
//! Drives the whole run: resolve each registered operation from the
//! document, synthesize cases, bootstrap authentication when the entry
//! needs it, execute, and check every response against the declared
//! contract.

mod executor;
mod report;
mod suite;

pub use executor::Executor;
pub use report::{CaseFailure, RunReport};
pub use suite::{default_suite, SuiteEntry};
