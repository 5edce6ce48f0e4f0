//! Authentication bootstrap
//!
//! Before authenticated cases run, a session credential must exist. The
//! provider creates a throwaway account (or logs into it when a prior run
//! already created it) and hands the resulting session cookie to the
//! executor, which attaches it to each generated request.

mod provider;

pub use provider::{AuthProvider, CookieAuthProvider, Credential};
