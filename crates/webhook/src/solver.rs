//! Capability interface implemented by DNS-01 solvers

use async_trait::async_trait;

use crate::challenge::ChallengeRequest;
use crate::error::SolverError;

/// A DNS provider solver as seen by the webhook host.
///
/// The host calls [`initialize`](Solver::initialize) once at startup and then
/// [`present`](Solver::present) / [`clean_up`](Solver::clean_up) concurrently
/// for independent challenges. Both operations must tolerate being invoked
/// repeatedly with the same request; cert-manager re-invokes after its own
/// propagation self-check.
#[async_trait]
pub trait Solver: Send + Sync {
    /// Name used on the issuer to select this solver.
    ///
    /// Must be unique within one webhook deployment.
    fn name(&self) -> &'static str;

    /// Set up clients from the ambient cluster configuration.
    async fn initialize(&mut self, kube_config: kube::Config) -> Result<(), SolverError>;

    /// Publish the challenge TXT record.
    async fn present(&self, request: &ChallengeRequest) -> Result<(), SolverError>;

    /// Remove the challenge TXT record.
    async fn clean_up(&self, request: &ChallengeRequest) -> Result<(), SolverError>;
}
