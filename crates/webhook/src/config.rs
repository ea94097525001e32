//! Webhook configuration
//!
//! The configuration is an explicit value handed to [`crate::run`]; nothing
//! in the library reads the process environment.

use dode_client::{DEFAULT_API_URL, DEFAULT_TIMEOUT, DodeClient};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use thiserror::Error;

/// Default listen address of the webhook server
pub const DEFAULT_LISTEN: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8443);

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// No API group name was provided
    #[error("GROUP_NAME must be specified")]
    MissingGroupName,

    /// The provider endpoint is not a usable URL
    #[error("invalid do.de API URL {url:?}: {message}")]
    InvalidApiUrl {
        /// Offending URL
        url: String,
        /// Why it was rejected
        message: String,
    },

    /// The request timeout is zero
    #[error("request timeout must be greater than zero")]
    InvalidTimeout,
}

/// Settings for one webhook deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookConfig {
    group_name: String,
    listen: SocketAddr,
    api_url: String,
    request_timeout: Duration,
}

impl WebhookConfig {
    /// Configuration for `group_name` with default listen address, API URL
    /// and timeout
    #[must_use]
    pub fn new(group_name: impl Into<String>) -> Self {
        Self {
            group_name: group_name.into(),
            listen: DEFAULT_LISTEN,
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the listen address
    #[must_use]
    pub const fn with_listen(mut self, listen: SocketAddr) -> Self {
        self.listen = listen;
        self
    }

    /// Set the do.de API endpoint
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Set the timeout for provider calls
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// API group the solvers are served under
    #[must_use]
    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    /// Listen address
    #[must_use]
    pub const fn listen(&self) -> SocketAddr {
        self.listen
    }

    /// do.de API endpoint
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Timeout for provider calls
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Check the configuration.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.group_name.trim().is_empty() {
            return Err(ConfigError::MissingGroupName);
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout);
        }
        self.dode_client().map(|_| ())
    }

    /// Build the provider client described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiUrl`] if the client cannot be built
    /// for the configured endpoint.
    pub fn dode_client(&self) -> Result<DodeClient, ConfigError> {
        DodeClient::builder()
            .api_url(self.api_url.clone())
            .timeout(self.request_timeout)
            .build()
            .map_err(|e| ConfigError::InvalidApiUrl {
                url: self.api_url.clone(),
                message: e.to_string(),
            })
    }
}
