//! Run configuration
//!
//! All knobs for a fuzzing run live in [`RunConfig`], built in code or
//! loaded from a YAML file. The config is constructed once at startup and
//! passed into the session explicitly; nothing here is process-global.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default number of generated examples per operation
pub const DEFAULT_MAX_EXAMPLES: usize = 100;

/// The throwaway account used for the whole run.
///
/// Created lazily on first authenticated case; never persisted locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestIdentity {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
}

impl Default for TestIdentity {
    fn default() -> Self {
        Self {
            email: "test@e2e.com".to_string(),
            password: "test1234".to_string(),
        }
    }
}

/// Complete configuration for one fuzzing run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Base URL of the service under test (e.g. "http://api:8080")
    pub base_url: String,

    /// URL the OpenAPI document is fetched from at run start.
    /// Defaults to `{base_url}/openapi.yaml` when omitted.
    #[serde(default)]
    pub schema_url: Option<String>,

    /// Identity used for the create-or-login bootstrap
    #[serde(default)]
    pub identity: TestIdentity,

    /// Examples generated per operation per mode
    #[serde(default = "default_max_examples")]
    pub max_examples: usize,

    /// RNG seed for reproducible case generation. Random when omitted.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_max_examples() -> usize {
    DEFAULT_MAX_EXAMPLES
}

fn default_timeout_secs() -> u64 {
    30
}

impl RunConfig {
    /// Create a config targeting the given base URL, everything else defaulted
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            schema_url: None,
            identity: TestIdentity::default(),
            max_examples: DEFAULT_MAX_EXAMPLES,
            seed: None,
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Load a config from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    /// Parse a config from a YAML string
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate required fields
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(Error::missing_field("base_url"));
        }
        if self.identity.email.is_empty() {
            return Err(Error::missing_field("identity.email"));
        }
        if self.identity.password.is_empty() {
            return Err(Error::missing_field("identity.password"));
        }
        if self.max_examples == 0 {
            return Err(Error::config("max_examples must be at least 1"));
        }
        Ok(())
    }

    /// Effective schema URL (explicit or derived from the base URL)
    pub fn schema_url(&self) -> String {
        self.schema_url.clone().unwrap_or_else(|| {
            format!("{}/openapi.yaml", self.base_url.trim_end_matches('/'))
        })
    }

    /// Request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Set the RNG seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the per-operation example count
    pub fn with_max_examples(mut self, count: usize) -> Self {
        self.max_examples = count;
        self
    }

    /// Set the schema URL explicitly
    pub fn with_schema_url(mut self, url: impl Into<String>) -> Self {
        self.schema_url = Some(url.into());
        self
    }
}
