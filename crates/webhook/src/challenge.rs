//! Challenge documents exchanged with cert-manager
//!
//! These mirror the `acme.cert-manager.io/v1alpha1` `ChallengePayload`
//! resource: cert-manager posts a payload with `request` set and expects the
//! same payload back with `response` filled in.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// API version of the payload documents
pub const API_VERSION: &str = "acme.cert-manager.io/v1alpha1";

/// Kind of the payload documents
pub const KIND: &str = "ChallengePayload";

/// Requested operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChallengeAction {
    /// Publish the TXT record
    Present,
    /// Remove the TXT record
    CleanUp,
}

/// One DNS-01 challenge as handed to a solver.
///
/// `config` is kept as raw JSON and decoded by the solver on every call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeRequest {
    /// Identifier echoed back in the response
    #[serde(default)]
    pub uid: String,

    /// Present or CleanUp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ChallengeAction>,

    /// Challenge type, always `dns-01` for this webhook
    #[serde(rename = "type", default)]
    pub challenge_type: String,

    /// Name being validated, e.g. `example.com`
    #[serde(default)]
    pub dns_name: String,

    /// TXT record value to publish
    #[serde(default)]
    pub key: String,

    /// Namespace used to look up referenced secrets
    #[serde(default)]
    pub resource_namespace: String,

    /// Record name, e.g. `_acme-challenge.example.com.`
    #[serde(rename = "resolvedFQDN", default)]
    pub resolved_fqdn: String,

    /// Zone the record lives in, e.g. `example.com.`
    #[serde(default)]
    pub resolved_zone: String,

    /// Whether ambient credentials may be used
    #[serde(default)]
    pub allow_ambient_credentials: bool,

    /// Solver specific configuration from the issuer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Box<RawValue>>,
}

/// Failure details attached to an unsuccessful response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeStatus {
    /// Human readable failure
    #[serde(default)]
    pub message: String,

    /// Short machine readable cause
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason: String,
}

/// Outcome of a challenge request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeResponse {
    /// Identifier copied from the request
    #[serde(default)]
    pub uid: String,

    /// Whether the operation succeeded
    #[serde(default)]
    pub success: bool,

    /// Set when `success` is false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ChallengeStatus>,
}

impl ChallengeResponse {
    /// Successful response for `uid`
    #[must_use]
    pub fn success(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            success: true,
            status: None,
        }
    }

    /// Failed response for `uid`
    #[must_use]
    pub fn failure(uid: impl Into<String>, reason: &str, message: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            success: false,
            status: Some(ChallengeStatus {
                message: message.into(),
                reason: reason.to_string(),
            }),
        }
    }
}

/// Envelope carrying a request from cert-manager and the solver's response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengePayload {
    /// Always [`API_VERSION`]
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Always [`KIND`]
    #[serde(default = "default_kind")]
    pub kind: String,

    /// Incoming request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<ChallengeRequest>,

    /// Outgoing response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ChallengeResponse>,
}

fn default_api_version() -> String {
    API_VERSION.to_string()
}

fn default_kind() -> String {
    KIND.to_string()
}

impl ChallengePayload {
    /// Wrap a request
    #[must_use]
    pub fn for_request(request: ChallengeRequest) -> Self {
        Self {
            api_version: default_api_version(),
            kind: default_kind(),
            request: Some(request),
            response: None,
        }
    }

    /// Attach a response, keeping the request for the reply
    #[must_use]
    pub fn with_response(mut self, response: ChallengeResponse) -> Self {
        self.response = Some(response);
        self
    }
}
