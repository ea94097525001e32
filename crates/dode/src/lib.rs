//! do.de DNS-01 API client
//!
//! Publishes and retracts ACME challenge TXT records through the do.de
//! Let's Encrypt endpoint. Both operations are a single HTTP `GET` whose
//! query string carries the API token, the domain, and either the TXT value
//! or `action=delete`. The endpoint answers with `{"success": bool, "error": string}`.
//!
//! The client never retries: one call is one attempt, bounded by the
//! configured timeout (30 seconds unless overridden).

mod client;
mod domain;
mod error;

pub use client::{
    Action, DEFAULT_API_URL, DEFAULT_TIMEOUT, DodeClient, DodeClientBuilder, ProviderResponse,
};
pub use domain::normalize_fqdn;
pub use error::{DodeError, Result};
