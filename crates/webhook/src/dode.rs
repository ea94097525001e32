//! Solver for the do.de DNS API

use async_trait::async_trait;
use dode_client::DodeClient;
use dode_secrets::{Credential, CredentialResolver, KubeSecretStore, SecretKeySelector, SecretStore};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use std::sync::Arc;
use tracing::{error, instrument};

use crate::challenge::ChallengeRequest;
use crate::error::SolverError;
use crate::solver::Solver;

/// Per-issuer configuration decoded from the challenge's `config`.
///
/// ```json
/// {"apiTokenSecretRef": {"name": "dode-credentials", "key": "api-token"}}
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    /// Secret holding the do.de API token
    #[serde(default)]
    pub api_token_secret_ref: SecretKeySelector,
}

/// Decode the solver config of a challenge.
///
/// An absent or `null` config yields [`ProviderConfig::default`].
///
/// # Errors
///
/// Returns [`SolverError::ConfigDecode`] if the JSON does not match
/// [`ProviderConfig`].
pub fn load_config(config: Option<&RawValue>) -> Result<ProviderConfig, SolverError> {
    let Some(raw) = config else {
        return Ok(ProviderConfig::default());
    };
    serde_json::from_str::<Option<ProviderConfig>>(raw.get())
        .map(Option::unwrap_or_default)
        .map_err(SolverError::ConfigDecode)
}

/// Publishes challenge records through the do.de API.
///
/// The API token is read from the secret referenced by the issuer config
/// on every call and dropped when the call returns.
#[derive(Debug, Clone)]
pub struct DodeSolver {
    client: DodeClient,
    resolver: Option<CredentialResolver>,
}

impl DodeSolver {
    /// Name used on the issuer's `solverName`
    pub const NAME: &'static str = "dode";

    /// Create a solver that still needs [`Solver::initialize`]
    #[must_use]
    pub const fn new(client: DodeClient) -> Self {
        Self {
            client,
            resolver: None,
        }
    }

    /// Use `store` for credential lookups instead of the cluster
    #[must_use]
    pub fn with_secret_store(mut self, store: Arc<dyn SecretStore>) -> Self {
        self.resolver = Some(CredentialResolver::new(store));
        self
    }

    async fn credential(&self, request: &ChallengeRequest) -> Result<Credential, SolverError> {
        let resolver = self.resolver.as_ref().ok_or(SolverError::NotInitialized {
            solver: Self::NAME,
        })?;

        let config = load_config(request.config.as_deref()).inspect_err(|e| {
            error!(error = %e, "Failed to load solver config");
        })?;

        resolver
            .resolve(&config.api_token_secret_ref, &request.resource_namespace)
            .await
            .map_err(|e| {
                error!(
                    error = %e,
                    secret = %config.api_token_secret_ref.name,
                    key = %config.api_token_secret_ref.key,
                    "Failed to get API token"
                );
                SolverError::from(e)
            })
    }
}

#[async_trait]
impl Solver for DodeSolver {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn initialize(&mut self, kube_config: kube::Config) -> Result<(), SolverError> {
        let store = KubeSecretStore::try_from_config(kube_config).map_err(|e| {
            error!(error = %e, "Failed to create kubernetes client");
            SolverError::Initialization {
                solver: Self::NAME,
                message: e.to_string(),
            }
        })?;
        self.resolver = Some(CredentialResolver::new(Arc::new(store)));
        Ok(())
    }

    #[instrument(
        skip_all,
        fields(
            uid = %request.uid,
            fqdn = %request.resolved_fqdn,
            namespace = %request.resource_namespace
        )
    )]
    async fn present(&self, request: &ChallengeRequest) -> Result<(), SolverError> {
        let credential = self.credential(request).await?;
        self.client
            .present(&request.resolved_fqdn, &request.key, &credential)
            .await
            .inspect_err(|e| error!(error = %e, "Failed to present challenge record"))?;
        Ok(())
    }

    #[instrument(
        skip_all,
        fields(
            uid = %request.uid,
            fqdn = %request.resolved_fqdn,
            namespace = %request.resource_namespace
        )
    )]
    async fn clean_up(&self, request: &ChallengeRequest) -> Result<(), SolverError> {
        let credential = self.credential(request).await?;
        self.client
            .clean_up(&request.resolved_fqdn, &credential)
            .await
            .inspect_err(|e| error!(error = %e, "Failed to clean up challenge record"))?;
        Ok(())
    }
}
