//! cert-manager DNS-01 webhook for the do.de DNS API
//!
//! The webhook exposes one [`Solver`], [`DodeSolver`], under a configurable
//! API group. For each challenge it decodes the issuer's solver config,
//! reads the do.de API token from the referenced Kubernetes secret, and
//! publishes or deletes the `_acme-challenge` TXT record through
//! [`dode_client::DodeClient`].
//!
//! Every operation is a single stateless exchange: no records are tracked
//! locally and failures are returned to cert-manager, which owns retries.

pub mod challenge;
pub mod config;
mod dode;
mod error;
pub mod registry;
pub mod server;
pub mod shutdown;
mod solver;

pub use challenge::{
    ChallengeAction, ChallengePayload, ChallengeRequest, ChallengeResponse, ChallengeStatus,
};
pub use config::{ConfigError, WebhookConfig};
pub use dode::{DodeSolver, ProviderConfig, load_config};
pub use error::{Result, SolverError, WebhookError};
pub use registry::SolverRegistry;
pub use shutdown::ShutdownCoordinator;
pub use solver::Solver;

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Build the registry for `config` with the do.de solver initialized
/// against `kube_config`.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or a solver fails to
/// initialize.
pub async fn bootstrap(config: &WebhookConfig, kube_config: kube::Config) -> Result<SolverRegistry> {
    config.validate()?;

    let mut registry = SolverRegistry::new(config.group_name());
    registry.register(Box::new(DodeSolver::new(config.dode_client()?)))?;
    registry.initialize_all(&kube_config).await?;

    info!(
        group = config.group_name(),
        solvers = ?registry.solver_names().collect::<Vec<_>>(),
        api_url = config.api_url(),
        "Webhook solvers registered"
    );
    Ok(registry)
}

/// Bootstrap the solvers and serve them until `shutdown` fires.
///
/// # Errors
///
/// Returns an error if bootstrap fails or the listener cannot be bound.
pub async fn run(
    config: WebhookConfig,
    kube_config: kube::Config,
    shutdown: ShutdownCoordinator,
) -> Result<()> {
    let registry = bootstrap(&config, kube_config).await?;
    let listener = TcpListener::bind(config.listen()).await?;
    server::serve(listener, Arc::new(registry), shutdown).await
}
