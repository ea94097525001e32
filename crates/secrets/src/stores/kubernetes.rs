//! Kubernetes `Secret` store backed by the [`kube`] client

use crate::{SecretError, SecretRecord, SecretStore};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;
use kube::{Api, Client};

/// Reads `Secret` resources from the cluster API server.
///
/// The client is built once from the ambient cluster configuration and
/// shared read-only between concurrent lookups.
#[derive(Clone)]
pub struct KubeSecretStore {
    client: Client,
}

impl std::fmt::Debug for KubeSecretStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeSecretStore")
            .field("default_namespace", &self.client.default_namespace())
            .finish()
    }
}

impl KubeSecretStore {
    /// Wrap an existing client
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from a cluster configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client for the API server cannot be built.
    pub fn try_from_config(config: kube::Config) -> Result<Self, kube::Error> {
        Ok(Self::new(Client::try_from(config)?))
    }
}

/// Flatten a `Secret` into a record. `stringData` is applied first so that
/// `data` wins, matching how the API server merges the two.
fn record_from_secret(secret: Secret) -> SecretRecord {
    let mut record = SecretRecord::new();
    for (key, value) in secret.string_data.unwrap_or_default() {
        record.insert(key, value.into_bytes());
    }
    for (key, value) in secret.data.unwrap_or_default() {
        record.insert(key, value.0);
    }
    record
}

#[async_trait]
impl SecretStore for KubeSecretStore {
    fn store_name(&self) -> &'static str {
        "kubernetes"
    }

    async fn get(&self, namespace: &str, name: &str) -> Result<Option<SecretRecord>, SecretError> {
        let api: Api<Secret> = Api::namespaced(self.client.clone(), namespace);
        let secret = api
            .get_opt(name)
            .await
            .map_err(|e| SecretError::Unavailable {
                namespace: namespace.to_string(),
                name: name.to_string(),
                message: e.to_string(),
            })?;

        Ok(secret.map(record_from_secret))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::ByteString;
    use std::collections::BTreeMap;

    #[test]
    fn test_record_from_secret_data() {
        let secret = Secret {
            data: Some(BTreeMap::from([(
                "api-token".to_string(),
                ByteString(b"abc".to_vec()),
            )])),
            ..Default::default()
        };
        let record = record_from_secret(secret);
        assert_eq!(record.field("api-token"), Some(b"abc".as_slice()));
    }

    #[test]
    fn test_record_from_secret_data_overrides_string_data() {
        let secret = Secret {
            data: Some(BTreeMap::from([(
                "api-token".to_string(),
                ByteString(b"from-data".to_vec()),
            )])),
            string_data: Some(BTreeMap::from([
                ("api-token".to_string(), "from-string-data".to_string()),
                ("extra".to_string(), "x".to_string()),
            ])),
            ..Default::default()
        };
        let record = record_from_secret(secret);
        assert_eq!(record.field("api-token"), Some(b"from-data".as_slice()));
        assert_eq!(record.field("extra"), Some(b"x".as_slice()));
    }

    #[test]
    fn test_record_from_empty_secret() {
        let record = record_from_secret(Secret::default());
        assert!(record.is_empty());
    }
}
