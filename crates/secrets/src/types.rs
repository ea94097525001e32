//! Credential and secret record types
//!
//! - [`Credential`]: a resolved token wrapped in `secrecy::SecretString`, zeroed on drop
//! - [`SecretRecord`]: the key to bytes mapping of one secret resource

use secrecy::{ExposeSecret, SecretString};
use std::collections::BTreeMap;

/// A resolved provider credential with automatic memory zeroing on drop.
///
/// This type wraps `secrecy::SecretString` to ensure:
/// - The token is zeroed from memory when dropped
/// - Debug output shows `[REDACTED]` instead of the actual value
/// - Explicit `.expose()` call required to access the value
#[derive(Clone)]
pub struct Credential {
    inner: SecretString,
}

impl Credential {
    /// Create a new credential from a string.
    #[must_use]
    pub fn new(value: String) -> Self {
        Self {
            inner: SecretString::from(value),
        }
    }

    /// Expose the credential for use.
    ///
    /// The caller must not log or persist the exposed value.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.inner.expose_secret()
    }

    /// Check if the credential is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.expose_secret().is_empty()
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl std::fmt::Display for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Field mapping of a single secret resource.
#[derive(Clone, Default)]
pub struct SecretRecord {
    data: BTreeMap<String, Vec<u8>>,
}

impl SecretRecord {
    /// Create an empty record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from string fields
    #[must_use]
    pub fn from_strings<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            data: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into().into_bytes()))
                .collect(),
        }
    }

    /// Build a record from raw byte fields
    #[must_use]
    pub fn from_bytes<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<u8>)>,
        K: Into<String>,
    {
        Self {
            data: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Set a field, replacing any previous value
    pub fn insert(&mut self, key: impl Into<String>, value: Vec<u8>) {
        self.data.insert(key.into(), value);
    }

    /// Raw content of `key`, if present
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&[u8]> {
        self.data.get(key).map(Vec::as_slice)
    }

    /// Field names, sorted
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    /// Number of fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the record has no fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

// Values are never printed, only the field names.
impl std::fmt::Debug for SecretRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretRecord")
            .field("keys", &self.data.keys().collect::<Vec<_>>())
            .finish()
    }
}
