//! Error types for schemaprobe
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for schemaprobe
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Auth setup failed with status {status}: {body}")]
    AuthSetup { status: u16, body: String },

    // ============================================================================
    // Schema Errors
    // ============================================================================
    #[error("Failed to fetch schema from {url}: {message}")]
    SchemaFetch { url: String, message: String },

    #[error("Schema error: {message}")]
    Schema { message: String },

    #[error("Operation '{operation_id}' not found in schema")]
    OperationNotFound { operation_id: String },

    #[error("Unresolved schema reference: {reference}")]
    UnresolvedRef { reference: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an auth setup error carrying the response body
    pub fn auth_setup(status: u16, body: impl Into<String>) -> Self {
        Self::AuthSetup {
            status,
            body: body.into(),
        }
    }

    /// Create a schema error
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    /// Create a schema fetch error
    pub fn schema_fetch(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SchemaFetch {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create an operation-not-found error
    pub fn operation_not_found(operation_id: impl Into<String>) -> Self {
        Self::OperationNotFound {
            operation_id: operation_id.into(),
        }
    }

    /// Create an unresolved reference error
    pub fn unresolved_ref(reference: impl Into<String>) -> Self {
        Self::UnresolvedRef {
            reference: reference.into(),
        }
    }
}

/// Result type alias for schemaprobe
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::auth_setup(500, "internal server error");
        assert_eq!(
            err.to_string(),
            "Auth setup failed with status 500: internal server error"
        );

        let err = Error::operation_not_found("get-user");
        assert_eq!(err.to_string(), "Operation 'get-user' not found in schema");
    }

    #[test]
    fn test_auth_setup_carries_body() {
        let err = Error::auth_setup(503, "service unavailable");
        match err {
            Error::AuthSetup { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "service unavailable");
            }
            other => panic!("unexpected variant: {other}"),
        }
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
