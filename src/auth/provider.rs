//! Create-or-login session provider

use crate::config::{RunConfig, TestIdentity};
use crate::error::{Error, Result};
use crate::generate::Case;
use async_trait::async_trait;
use serde_json::json;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Header the credential is attached under
const COOKIE_HEADER: &str = "Cookie";

/// An opaque session credential: the raw value of the `Set-Cookie`
/// header returned by a successful signup or login exchange.
///
/// Held in memory for the lifetime of the run; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a raw header value
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw header value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Supplies a session credential and attaches it to generated cases.
///
/// Two operations only, so a token-based strategy can be substituted
/// without touching executor call sites.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Produce a credential valid for immediate use against the service
    async fn acquire(&self) -> Result<Credential>;

    /// Attach the credential to an outgoing case, overwriting any prior
    /// value. Infallible by design.
    fn apply(&self, case: &mut Case, credential: &Credential);
}

/// Cookie-based provider: create the test account, fall back to login
/// when it already exists, and cache the session cookie for the run.
pub struct CookieAuthProvider {
    signup_url: String,
    login_url: String,
    identity: TestIdentity,
    client: reqwest::Client,
    cached: RwLock<Option<Credential>>,
}

impl CookieAuthProvider {
    /// Build a provider from the run config, sharing the given client
    pub fn new(config: &RunConfig, client: reqwest::Client) -> Self {
        let base = config.base_url.trim_end_matches('/');
        Self {
            signup_url: format!("{base}/user"),
            login_url: format!("{base}/auth/login"),
            identity: config.identity.clone(),
            client,
            cached: RwLock::new(None),
        }
    }

    async fn fetch_credential(&self) -> Result<Credential> {
        let payload = json!({
            "email": self.identity.email,
            "password": self.identity.password,
        });

        let response = self
            .client
            .post(&self.signup_url)
            .json(&payload)
            .send()
            .await?;
        let status = response.status().as_u16();

        match status {
            201 => {
                debug!(email = %self.identity.email, "test account created");
                session_cookie(&response)
                    .ok_or_else(|| Error::auth_setup(status, "signup response missing Set-Cookie"))
            }
            // Account left over from a prior run, or a concurrent caller
            // won the creation race. Logging in is safe to repeat.
            409 => {
                debug!(email = %self.identity.email, "account exists, logging in");
                let response = self
                    .client
                    .post(&self.login_url)
                    .json(&payload)
                    .send()
                    .await?;
                let status = response.status().as_u16();
                match session_cookie(&response) {
                    Some(credential) if response.status().is_success() => Ok(credential),
                    _ => {
                        let body = response.text().await.unwrap_or_default();
                        Err(Error::auth_setup(status, body))
                    }
                }
            }
            _ => {
                let body = response.text().await.unwrap_or_default();
                Err(Error::auth_setup(status, body))
            }
        }
    }
}

#[async_trait]
impl AuthProvider for CookieAuthProvider {
    async fn acquire(&self) -> Result<Credential> {
        {
            let cached = self.cached.read().await;
            if let Some(credential) = cached.as_ref() {
                return Ok(credential.clone());
            }
        }

        let mut cached = self.cached.write().await;
        // Another task may have acquired while we waited for the lock.
        if let Some(credential) = cached.as_ref() {
            return Ok(credential.clone());
        }

        let credential = self.fetch_credential().await?;
        info!("session credential acquired");
        *cached = Some(credential.clone());
        Ok(credential)
    }

    fn apply(&self, case: &mut Case, credential: &Credential) {
        case.headers
            .insert(COOKIE_HEADER.to_string(), credential.as_str().to_string());
    }
}

/// Extract the raw `Set-Cookie` value from a response
fn session_cookie(response: &reqwest::Response) -> Option<Credential> {
    response
        .headers()
        .get(reqwest::header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(Credential::new)
}
