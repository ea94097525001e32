//! Solver registration and challenge dispatch

use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::challenge::{ChallengeAction, ChallengePayload, ChallengeResponse};
use crate::error::{Result, SolverError, WebhookError};
use crate::solver::Solver;

/// Solvers served under one API group, keyed by [`Solver::name`].
pub struct SolverRegistry {
    group_name: String,
    solvers: BTreeMap<&'static str, Box<dyn Solver>>,
}

impl std::fmt::Debug for SolverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolverRegistry")
            .field("group_name", &self.group_name)
            .field("solvers", &self.solvers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl SolverRegistry {
    /// Create an empty registry for `group_name`
    #[must_use]
    pub fn new(group_name: impl Into<String>) -> Self {
        Self {
            group_name: group_name.into(),
            solvers: BTreeMap::new(),
        }
    }

    /// API group the solvers are served under
    #[must_use]
    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    /// Registered solver names, sorted
    pub fn solver_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.solvers.keys().copied()
    }

    /// Add a solver.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::DuplicateSolver`] if the name is taken.
    pub fn register(&mut self, solver: Box<dyn Solver>) -> Result<()> {
        let name = solver.name();
        if self.solvers.contains_key(name) {
            return Err(WebhookError::DuplicateSolver { name });
        }
        self.solvers.insert(name, solver);
        Ok(())
    }

    /// Initialize every registered solver with the cluster configuration.
    ///
    /// # Errors
    ///
    /// Returns the first solver initialization failure.
    pub async fn initialize_all(&mut self, kube_config: &kube::Config) -> Result<()> {
        for (name, solver) in &mut self.solvers {
            solver.initialize(kube_config.clone()).await?;
            info!(solver = *name, "Solver initialized");
        }
        Ok(())
    }

    /// Run the request in `payload` against the solver `solver_name`.
    ///
    /// Always returns the payload with `response` set; failures are
    /// reported in the response rather than as an `Err`.
    pub async fn handle(&self, solver_name: &str, payload: ChallengePayload) -> ChallengePayload {
        let Some(request) = payload.request.as_ref() else {
            warn!(solver = solver_name, "Challenge payload without request");
            return payload.with_response(ChallengeResponse::failure(
                "",
                "BadRequest",
                "challenge payload has no request",
            ));
        };
        let uid = request.uid.clone();
        let action = request.action;

        let Some(solver) = self.solvers.get(solver_name) else {
            warn!(solver = solver_name, uid = %uid, "Unknown solver");
            return payload.with_response(ChallengeResponse::failure(
                uid,
                "NotFound",
                format!("no solver named `{solver_name}` in group `{}`", self.group_name),
            ));
        };

        let outcome: std::result::Result<(), SolverError> = match action {
            Some(ChallengeAction::Present) => solver.present(request).await,
            Some(ChallengeAction::CleanUp) => solver.clean_up(request).await,
            None => {
                return payload.with_response(ChallengeResponse::failure(
                    uid,
                    "BadRequest",
                    "challenge request has no action",
                ));
            }
        };

        let response = match outcome {
            Ok(()) => ChallengeResponse::success(uid),
            Err(e) => ChallengeResponse::failure(uid, e.reason(), e.to_string()),
        };
        payload.with_response(response)
    }
}
