//! HTTP client for the do.de Let's Encrypt endpoint

use crate::domain::normalize_fqdn;
use crate::error::{DodeError, Result};
use dode_secrets::Credential;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Fixed do.de API endpoint.
pub const DEFAULT_API_URL: &str = "https://www.do.de/api/letsencrypt";

/// Upper bound for a single API call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Operation performed against the API, used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Publish a TXT record
    Present,
    /// Delete the TXT records of a domain
    CleanUp,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Present => f.write_str("present"),
            Self::CleanUp => f.write_str("cleanup"),
        }
    }
}

/// Body returned by the API for every call.
///
/// Missing fields take their defaults, so a body without `success` is a failure.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ProviderResponse {
    /// Whether the operation was applied
    #[serde(default)]
    pub success: bool,
    /// Provider diagnostic when `success` is false
    #[serde(default)]
    pub error: String,
}

/// Builder for [`DodeClient`].
#[derive(Debug, Clone)]
pub struct DodeClientBuilder {
    api_url: String,
    timeout: Duration,
}

impl Default for DodeClientBuilder {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl DodeClientBuilder {
    /// Override the API endpoint (tests, staging)
    #[must_use]
    pub fn api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Override the per-call timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`DodeError::ClientBuild`] if the endpoint is not an absolute
    /// http(s) URL or the TLS backend fails to initialize.
    pub fn build(self) -> Result<DodeClient> {
        let api_url = Url::parse(&self.api_url)
            .map_err(|e| DodeError::client_build(format!("invalid API URL {:?}: {e}", self.api_url)))?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(DodeError::client_build(format!(
                "unsupported API URL scheme {:?}",
                api_url.scheme()
            )));
        }

        let http = Client::builder()
            .user_agent(concat!("dode-webhook/", env!("CARGO_PKG_VERSION")))
            .timeout(self.timeout)
            .build()
            .map_err(|e| DodeError::client_build(e.to_string()))?;

        Ok(DodeClient {
            http,
            api_url,
            timeout: self.timeout,
        })
    }
}

/// Client for the do.de TXT record API.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct DodeClient {
    http: Client,
    api_url: Url,
    timeout: Duration,
}

impl DodeClient {
    /// Create a client for the default endpoint and timeout.
    ///
    /// # Errors
    ///
    /// Returns [`DodeError::ClientBuild`] if the TLS backend fails to initialize.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Start building a client with custom settings
    #[must_use]
    pub fn builder() -> DodeClientBuilder {
        DodeClientBuilder::default()
    }

    /// Endpoint this client talks to
    #[must_use]
    pub const fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// Per-call timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Ensure a TXT record with `value` exists for `domain`.
    ///
    /// Safe to call repeatedly with the same arguments.
    ///
    /// # Errors
    ///
    /// Returns [`DodeError::Transport`], [`DodeError::Decode`], or
    /// [`DodeError::Rejected`] as described in the crate docs.
    pub async fn present(&self, domain: &str, value: &str, credential: &Credential) -> Result<()> {
        let domain = normalize_fqdn(domain);
        self.call(
            Action::Present,
            domain,
            &[
                ("token", credential.expose()),
                ("domain", domain),
                ("value", value),
            ],
        )
        .await
    }

    /// Ensure no challenge TXT record exists for `domain`.
    ///
    /// Deletion is scoped to the domain; the API has no way to remove a
    /// single value.
    ///
    /// # Errors
    ///
    /// Same as [`present`](Self::present).
    pub async fn clean_up(&self, domain: &str, credential: &Credential) -> Result<()> {
        let domain = normalize_fqdn(domain);
        self.call(
            Action::CleanUp,
            domain,
            &[
                ("token", credential.expose()),
                ("domain", domain),
                ("action", "delete"),
            ],
        )
        .await
    }

    async fn call(&self, action: Action, domain: &str, query: &[(&str, &str)]) -> Result<()> {
        debug!(%action, domain, "Calling do.de API");

        let transport = |e: reqwest::Error| DodeError::Transport {
            action,
            domain: domain.to_string(),
            // The URL carries the token in its query string.
            source: e.without_url(),
        };

        let response = self
            .http
            .get(self.api_url.clone())
            .query(query)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        let parsed: ProviderResponse =
            serde_json::from_str(&body).map_err(|e| DodeError::Decode {
                action,
                domain: domain.to_string(),
                status: status.as_u16(),
                message: e.to_string(),
            })?;

        if !parsed.success {
            return Err(DodeError::Rejected {
                action,
                domain: domain.to_string(),
                message: parsed.error,
            });
        }

        info!(%action, domain, "do.de API call succeeded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_display() {
        assert_eq!(Action::Present.to_string(), "present");
        assert_eq!(Action::CleanUp.to_string(), "cleanup");
    }

    #[test]
    fn test_provider_response_defaults() {
        let parsed: ProviderResponse = serde_json::from_str("{}").unwrap();
        assert!(!parsed.success);
        assert_eq!(parsed.error, "");
    }

    #[test]
    fn test_provider_response_success_without_error() {
        let parsed: ProviderResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(parsed.success);
    }

    #[test]
    fn test_builder_defaults() {
        let client = DodeClient::new().unwrap();
        assert_eq!(client.api_url().as_str(), DEFAULT_API_URL);
        assert_eq!(client.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_builder_overrides() {
        let client = DodeClient::builder()
            .api_url("http://127.0.0.1:9999/api/letsencrypt")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        assert_eq!(client.api_url().port(), Some(9999));
        assert_eq!(client.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_builder_rejects_relative_url() {
        let err = DodeClient::builder().api_url("api/letsencrypt").build().unwrap_err();
        assert!(matches!(err, DodeError::ClientBuild { .. }));
    }

    #[test]
    fn test_builder_rejects_non_http_scheme() {
        let err = DodeClient::builder()
            .api_url("ftp://www.do.de/api")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("ftp"));
    }
}
