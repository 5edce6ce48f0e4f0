//! Declarative operation registrations

use crate::generate::Mode;

/// One registered operation: what to target, whether it needs a session,
/// and whether schema-violating cases are allowed against it.
#[derive(Debug, Clone)]
pub struct SuiteEntry {
    /// Operation ID in the document
    pub operation_id: String,
    /// Whether cases carry the session credential
    pub auth: bool,
    /// Whether negative cases are generated. Endpoints whose whole input
    /// surface is a session cookie have nothing schema-shaped to violate.
    pub negative: bool,
}

impl SuiteEntry {
    /// Register an operation accepting both positive and negative cases
    pub fn new(operation_id: impl Into<String>, auth: bool) -> Self {
        Self {
            operation_id: operation_id.into(),
            auth,
            negative: true,
        }
    }

    /// Restrict the entry to positive cases only
    pub fn positive_only(mut self) -> Self {
        self.negative = false;
        self
    }

    /// Generation modes this entry runs
    pub fn modes(&self) -> Vec<Mode> {
        if self.negative {
            vec![Mode::Positive, Mode::Negative]
        } else {
            vec![Mode::Positive]
        }
    }
}

/// The full registration table for the service under test.
///
/// Mirrors the auth, user and websites endpoints: signup and website
/// creation run unauthenticated, everything else carries the session.
pub fn default_suite() -> Vec<SuiteEntry> {
    vec![
        SuiteEntry::new("post-user", false),
        SuiteEntry::new("get-user", true).positive_only(),
        SuiteEntry::new("patch-user", true),
        SuiteEntry::new("delete-user", true).positive_only(),
        SuiteEntry::new("auth-login", true),
        SuiteEntry::new("post-websites", false),
        SuiteEntry::new("get-websites", true).positive_only(),
        SuiteEntry::new("get-websites-id", true),
        SuiteEntry::new("patch-websites-id", true),
        SuiteEntry::new("delete-websites-id", true),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_suite_covers_all_operations() {
        let suite = default_suite();
        assert_eq!(suite.len(), 10);
        let ids: Vec<&str> = suite.iter().map(|e| e.operation_id.as_str()).collect();
        for id in [
            "post-user",
            "get-user",
            "patch-user",
            "delete-user",
            "auth-login",
            "post-websites",
            "get-websites",
            "get-websites-id",
            "patch-websites-id",
            "delete-websites-id",
        ] {
            assert!(ids.contains(&id), "missing registration for {id}");
        }
    }

    #[test]
    fn test_positive_only_entries_never_run_negative() {
        for entry in default_suite() {
            let modes = entry.modes();
            if entry.negative {
                assert_eq!(modes, vec![Mode::Positive, Mode::Negative]);
            } else {
                assert_eq!(modes, vec![Mode::Positive]);
            }
        }
    }

    #[test]
    fn test_read_endpoints_are_positive_only() {
        let suite = default_suite();
        for id in ["get-user", "delete-user", "get-websites"] {
            let entry = suite.iter().find(|e| e.operation_id == id).unwrap();
            assert!(!entry.negative, "{id} must be positive-only");
        }
    }

    #[test]
    fn test_signup_endpoints_run_unauthenticated() {
        let suite = default_suite();
        for id in ["post-user", "post-websites"] {
            let entry = suite.iter().find(|e| e.operation_id == id).unwrap();
            assert!(!entry.auth, "{id} must not carry a session");
        }
    }
}
