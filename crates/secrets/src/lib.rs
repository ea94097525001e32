//! Credential resolution for the do.de webhook
//!
//! Provides a small interface for looking up provider credentials in a
//! namespaced key-value secret store (Kubernetes `Secret` resources in
//! production) and returning them as redacted [`Credential`] values.
//!
//! # Resolution
//!
//! ```ignore
//! use dode_secrets::{CredentialResolver, SecretKeySelector};
//!
//! let resolver = CredentialResolver::new(store);
//! let selector = SecretKeySelector::new("dode-credentials", "api-token");
//! let credential = resolver.resolve(&selector, "cert-manager").await?;
//! // `credential` is zeroed when it goes out of scope
//! ```

pub mod stores;
mod types;

pub use stores::StaticSecretStore;
#[cfg(feature = "kubernetes")]
pub use stores::KubeSecretStore;
pub use types::{Credential, SecretRecord};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Error types for credential resolution
#[derive(Debug, Error)]
pub enum SecretError {
    /// The secret record itself does not exist
    #[error("unable to get secret `{name}` in namespace `{namespace}`: not found")]
    NotFound {
        /// Namespace that was searched
        namespace: String,
        /// Secret name
        name: String,
    },

    /// The record exists but does not carry the requested key
    #[error("key {key:?} not found in secret \"{namespace}/{name}\"")]
    KeyNotFound {
        /// Namespace of the secret
        namespace: String,
        /// Secret name
        name: String,
        /// Key that was requested
        key: String,
    },

    /// The reference cannot be looked up at all
    #[error("invalid secret reference: {message}")]
    InvalidReference {
        /// What is wrong with the reference
        message: String,
    },

    /// The field content is not valid UTF-8
    #[error("key {key:?} in secret \"{namespace}/{name}\" is not valid UTF-8")]
    InvalidEncoding {
        /// Namespace of the secret
        namespace: String,
        /// Secret name
        name: String,
        /// Key holding the undecodable bytes
        key: String,
    },

    /// The store could not be reached or answered with an error
    #[error("unable to get secret `{name}` in namespace `{namespace}`: {message}")]
    Unavailable {
        /// Namespace of the secret
        namespace: String,
        /// Secret name
        name: String,
        /// Error message from the store client
        message: String,
    },
}

impl SecretError {
    /// Whether a later attempt could succeed without operator intervention.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

/// Reference to a single key inside a named secret.
///
/// Mirrors the `{name, key}` selector used in issuer solver configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecretKeySelector {
    /// Name of the secret resource
    #[serde(default)]
    pub name: String,

    /// Key within the secret's data
    #[serde(default)]
    pub key: String,
}

impl SecretKeySelector {
    /// Create a new selector
    #[must_use]
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
        }
    }
}

/// Read-only access to a namespaced key-value secret store.
///
/// Implementations return `Ok(None)` when the record does not exist and
/// reserve `Err` for failures talking to the store.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Look up the record `name` in `namespace`.
    async fn get(&self, namespace: &str, name: &str) -> Result<Option<SecretRecord>, SecretError>;

    /// Get the store name for diagnostics.
    ///
    /// Examples: `"kubernetes"`, `"static"`
    fn store_name(&self) -> &'static str;
}

/// Resolves [`SecretKeySelector`]s against a shared [`SecretStore`].
///
/// Cheap to clone; the store handle is shared read-only.
#[derive(Clone)]
pub struct CredentialResolver {
    store: Arc<dyn SecretStore>,
}

impl std::fmt::Debug for CredentialResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialResolver")
            .field("store", &self.store.store_name())
            .finish()
    }
}

impl CredentialResolver {
    /// Create a resolver over the given store
    #[must_use]
    pub fn new(store: Arc<dyn SecretStore>) -> Self {
        Self { store }
    }

    /// Resolve the credential referenced by `selector` in `namespace`.
    ///
    /// # Errors
    ///
    /// - [`SecretError::InvalidReference`] if the secret name or namespace is empty
    /// - [`SecretError::NotFound`] if the record does not exist
    /// - [`SecretError::KeyNotFound`] if the record lacks `selector.key`
    /// - [`SecretError::InvalidEncoding`] if the field is not UTF-8
    /// - [`SecretError::Unavailable`] if the store lookup itself failed
    pub async fn resolve(
        &self,
        selector: &SecretKeySelector,
        namespace: &str,
    ) -> Result<Credential, SecretError> {
        if selector.name.is_empty() {
            return Err(SecretError::InvalidReference {
                message: "secret name must not be empty".to_string(),
            });
        }
        if namespace.is_empty() {
            return Err(SecretError::InvalidReference {
                message: format!("namespace for secret `{}` must not be empty", selector.name),
            });
        }

        tracing::debug!(
            store = self.store.store_name(),
            namespace,
            secret = %selector.name,
            key = %selector.key,
            "Loading credential from secret"
        );

        let record = self
            .store
            .get(namespace, &selector.name)
            .await?
            .ok_or_else(|| SecretError::NotFound {
                namespace: namespace.to_string(),
                name: selector.name.clone(),
            })?;

        let bytes = record
            .field(&selector.key)
            .ok_or_else(|| SecretError::KeyNotFound {
                namespace: namespace.to_string(),
                name: selector.name.clone(),
                key: selector.key.clone(),
            })?;

        let value = String::from_utf8(bytes.to_vec()).map_err(|_| SecretError::InvalidEncoding {
            namespace: namespace.to_string(),
            name: selector.name.clone(),
            key: selector.key.clone(),
        })?;

        Ok(Credential::new(value))
    }
}
