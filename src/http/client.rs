//! Case-executing HTTP client

use crate::error::Result;
use crate::generate::Case;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// HTTP client bound to the service under test
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    /// Build a client for the given base URL
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into();
        // Reject a malformed base URL at startup rather than on the
        // first executed case.
        url::Url::parse(&base_url)?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(format!("schemaprobe/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Wrap an existing reqwest client (shared with the auth provider)
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// The underlying reqwest client
    pub fn inner(&self) -> &reqwest::Client {
        &self.client
    }

    /// Absolute URL for a path on the service under test
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Execute one generated case and capture the response
    pub async fn execute(&self, case: &Case) -> Result<HttpResponse> {
        let mut request = self
            .client
            .request(case.method.clone(), self.url(&case.path));

        if !case.query.is_empty() {
            request = request.query(&case.query);
        }
        for (name, value) in &case.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &case.body {
            request = request.json(body);
        }

        debug!(method = %case.method, path = %case.path, mode = %case.mode, "executing case");
        let response = request.send().await?;
        let status = response.status().as_u16();

        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.insert(name.as_str().to_string(), v.to_string());
            }
        }

        let body = response.text().await?;
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// A captured response
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers (lowercase names)
    pub headers: HashMap<String, String>,
    /// Raw response body
    pub body: String,
}

impl HttpResponse {
    /// Response body parsed as JSON, if it is JSON
    pub fn json(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Whether the response declares a JSON content type
    pub fn is_json(&self) -> bool {
        self.header("content-type")
            .is_some_and(|ct| ct.starts_with("application/json"))
    }
}
