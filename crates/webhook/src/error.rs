//! Error types for the webhook

use dode_client::DodeError;
use dode_secrets::SecretError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors returned by a solver operation
#[derive(Debug, Error)]
pub enum SolverError {
    /// The issuer's solver config is not the expected JSON shape
    #[error("error decoding solver config: {0}")]
    ConfigDecode(#[source] serde_json::Error),

    /// The provider credential could not be resolved
    #[error(transparent)]
    Secret(#[from] SecretError),

    /// The provider call failed or was rejected
    #[error(transparent)]
    Provider(#[from] DodeError),

    /// `present`/`clean_up` was called before `initialize`
    #[error("solver `{solver}` has not been initialized")]
    NotInitialized {
        /// Solver name
        solver: &'static str,
    },

    /// `initialize` could not set up the solver's clients
    #[error("failed to initialize solver `{solver}`: {message}")]
    Initialization {
        /// Solver name
        solver: &'static str,
        /// What went wrong
        message: String,
    },
}

impl SolverError {
    /// Short CamelCase cause reported back to cert-manager
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::ConfigDecode(_) => "ConfigDecodeError",
            Self::Secret(SecretError::NotFound { .. }) => "SecretNotFound",
            Self::Secret(SecretError::KeyNotFound { .. }) => "SecretKeyNotFound",
            Self::Secret(_) => "SecretError",
            Self::Provider(DodeError::Rejected { .. }) => "ProviderRejected",
            Self::Provider(DodeError::Decode { .. }) => "DecodeError",
            Self::Provider(_) => "TransportError",
            Self::NotInitialized { .. } => "NotInitialized",
            Self::Initialization { .. } => "InitializationFailed",
        }
    }
}

/// Errors raised while bootstrapping or serving the webhook
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Two solvers share a name
    #[error("a solver named `{name}` is already registered")]
    DuplicateSolver {
        /// Conflicting name
        name: &'static str,
    },

    /// A solver failed to initialize
    #[error(transparent)]
    Solver(#[from] SolverError),

    /// Listener or server failure
    #[error("webhook server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for bootstrap operations
pub type Result<T> = std::result::Result<T, WebhookError>;

#[cfg(test)]
mod tests {
    use super::*;
    use dode_client::Action;

    #[test]
    fn test_reason_distinguishes_secret_failures() {
        let not_found = SolverError::from(SecretError::NotFound {
            namespace: "ns".to_string(),
            name: "creds".to_string(),
        });
        let key_missing = SolverError::from(SecretError::KeyNotFound {
            namespace: "ns".to_string(),
            name: "creds".to_string(),
            key: "api-token".to_string(),
        });
        assert_eq!(not_found.reason(), "SecretNotFound");
        assert_eq!(key_missing.reason(), "SecretKeyNotFound");
    }

    #[test]
    fn test_reason_for_provider_rejection() {
        let err = SolverError::from(DodeError::Rejected {
            action: Action::Present,
            domain: "example.com".to_string(),
            message: "rate limited".to_string(),
        });
        assert_eq!(err.reason(), "ProviderRejected");
        assert!(err.to_string().contains("rate limited"));
    }

    #[test]
    fn test_config_decode_message() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = SolverError::ConfigDecode(source);
        assert!(err.to_string().starts_with("error decoding solver config"));
        assert_eq!(err.reason(), "ConfigDecodeError");
    }

    #[test]
    fn test_reason_separates_failed_and_missing_initialization() {
        let missing = SolverError::NotInitialized { solver: "dode" };
        let failed = SolverError::Initialization {
            solver: "dode",
            message: "invalid kubeconfig".to_string(),
        };
        assert_eq!(missing.reason(), "NotInitialized");
        assert_eq!(failed.reason(), "InitializationFailed");
        assert!(failed.to_string().contains("invalid kubeconfig"));
    }

    #[test]
    fn test_duplicate_solver_message() {
        let err = WebhookError::DuplicateSolver { name: "dode" };
        assert!(err.to_string().contains("dode"));
    }
}
