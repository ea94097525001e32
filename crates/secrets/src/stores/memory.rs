//! In-memory secret store

use crate::{SecretError, SecretRecord, SecretStore};
use async_trait::async_trait;
use std::collections::HashMap;

#[derive(Debug, Clone)]
enum Entry {
    Record(SecretRecord),
    Failing(String),
}

/// Serves secret records from a fixed in-memory table.
///
/// Records are keyed by `(namespace, name)`. Entries registered with
/// [`with_failure`](Self::with_failure) answer with
/// [`SecretError::Unavailable`], which lets callers exercise the
/// store-unreachable path without a cluster.
#[derive(Debug, Clone, Default)]
pub struct StaticSecretStore {
    entries: HashMap<(String, String), Entry>,
}

impl StaticSecretStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a secret built from string fields
    #[must_use]
    pub fn with_secret<I, K, V>(self, namespace: &str, name: &str, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.with_record(namespace, name, SecretRecord::from_strings(fields))
    }

    /// Add a prebuilt record
    #[must_use]
    pub fn with_record(mut self, namespace: &str, name: &str, record: SecretRecord) -> Self {
        self.entries.insert(
            (namespace.to_string(), name.to_string()),
            Entry::Record(record),
        );
        self
    }

    /// Make lookups of `namespace/name` fail as if the store were unreachable
    #[must_use]
    pub fn with_failure(mut self, namespace: &str, name: &str, message: &str) -> Self {
        self.entries.insert(
            (namespace.to_string(), name.to_string()),
            Entry::Failing(message.to_string()),
        );
        self
    }
}

#[async_trait]
impl SecretStore for StaticSecretStore {
    fn store_name(&self) -> &'static str {
        "static"
    }

    async fn get(&self, namespace: &str, name: &str) -> Result<Option<SecretRecord>, SecretError> {
        match self.entries.get(&(namespace.to_string(), name.to_string())) {
            Some(Entry::Record(record)) => Ok(Some(record.clone())),
            Some(Entry::Failing(message)) => Err(SecretError::Unavailable {
                namespace: namespace.to_string(),
                name: name.to_string(),
                message: message.clone(),
            }),
            None => Ok(None),
        }
    }
}
