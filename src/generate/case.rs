//! Generated request cases

use reqwest::Method;
use serde_json::Value;
use std::collections::HashMap;

/// How a case was generated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Schema-valid input; the service is expected to handle it
    Positive,
    /// Deliberately schema-violating input; the service is expected to
    /// reject it with a declared error status
    Negative,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Positive => write!(f, "positive"),
            Mode::Negative => write!(f, "negative"),
        }
    }
}

/// One synthesized request, ready for execution
#[derive(Debug, Clone)]
pub struct Case {
    /// Operation this case targets
    pub operation_id: String,
    /// HTTP method
    pub method: Method,
    /// Path with path parameters substituted
    pub path: String,
    /// Request headers; the auth provider writes the Cookie header here
    pub headers: HashMap<String, String>,
    /// Query string pairs
    pub query: Vec<(String, String)>,
    /// JSON request body, when the operation declares one
    pub body: Option<Value>,
    /// Generation mode
    pub mode: Mode,
}

impl Case {
    /// One-line description used in failure reports
    pub fn summary(&self) -> String {
        let body = match &self.body {
            Some(b) => b.to_string(),
            None => "-".to_string(),
        };
        format!(
            "[{}] {} {} body={}",
            self.mode, self.method, self.path, body
        )
    }
}
