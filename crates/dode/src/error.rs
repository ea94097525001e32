//! Error types for the do.de client

use crate::client::Action;
use thiserror::Error;

/// Errors that can occur talking to the do.de API
#[derive(Error, Debug)]
pub enum DodeError {
    /// The HTTP client could not be constructed
    #[error("failed to build do.de API client: {message}")]
    ClientBuild {
        /// What went wrong
        message: String,
    },

    /// The request never produced a readable response (connect, TLS, timeout)
    #[error("error querying do.de API for {action} `{domain}`: {source}")]
    Transport {
        /// Operation being performed
        action: Action,
        /// Normalized domain
        domain: String,
        /// Underlying client error, with the request URL stripped
        #[source]
        source: reqwest::Error,
    },

    /// The response body was not the expected JSON document
    #[error("invalid do.de API response for {action} `{domain}` (HTTP {status}): {message}")]
    Decode {
        /// Operation being performed
        action: Action,
        /// Normalized domain
        domain: String,
        /// HTTP status code of the response
        status: u16,
        /// Decoder message
        message: String,
    },

    /// The provider answered with `success: false`
    #[error("do.de API error for {action} `{domain}`: {message}")]
    Rejected {
        /// Operation being performed
        action: Action,
        /// Normalized domain
        domain: String,
        /// Error text reported by the provider
        message: String,
    },
}

impl DodeError {
    /// Create a client build error
    #[must_use]
    pub fn client_build(message: impl Into<String>) -> Self {
        Self::ClientBuild {
            message: message.into(),
        }
    }

    /// Whether the failure happened before the provider could answer.
    ///
    /// Malformed response bodies count as transport failures.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Decode { .. })
    }
}

/// Result type for do.de API operations
pub type Result<T> = std::result::Result<T, DodeError>;
