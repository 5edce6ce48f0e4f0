//! HTTP execution
//!
//! A thin client over reqwest that executes generated cases. Timeouts come
//! from the run config; no retry or rate limiting is layered on top, so a
//! flaky service surfaces as a case failure rather than being papered over.

mod client;

pub use client::{HttpClient, HttpResponse};
