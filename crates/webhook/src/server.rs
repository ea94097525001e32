//! HTTP surface of the webhook
//!
//! cert-manager posts `ChallengePayload` documents to
//! `/apis/{group}/v1alpha1/{solver}`. TLS termination and the aggregated API
//! discovery documents are handled by the deployment in front of this server.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::challenge::ChallengePayload;
use crate::error::Result;
use crate::registry::SolverRegistry;
use crate::shutdown::ShutdownCoordinator;

/// Build the router serving every solver in `registry`
pub fn build_router(registry: Arc<SolverRegistry>) -> Router {
    Router::new()
        .route("/healthz", get(health))
        .route("/apis/{group}/v1alpha1/{solver}", post(solve))
        .with_state(registry)
}

/// Serve until `shutdown` fires.
///
/// # Errors
///
/// Returns an error if the listener fails.
pub async fn serve(
    listener: TcpListener,
    registry: Arc<SolverRegistry>,
    shutdown: ShutdownCoordinator,
) -> Result<()> {
    let address = listener.local_addr()?;
    let router = build_router(registry);
    info!(%address, "dode-webhook listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown.wait_for_shutdown().await })
        .await?;
    info!("dode-webhook stopped");
    Ok(())
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn solve(
    State(registry): State<Arc<SolverRegistry>>,
    Path((group, solver)): Path<(String, String)>,
    Json(payload): Json<ChallengePayload>,
) -> std::result::Result<Json<ChallengePayload>, StatusCode> {
    if group != registry.group_name() {
        warn!(%group, "Request for unknown API group");
        return Err(StatusCode::NOT_FOUND);
    }

    let reply = registry.handle(&solver, payload).await;
    if let Some(response) = &reply.response {
        debug!(%solver, uid = %response.uid, success = response.success, "Challenge handled");
    }
    Ok(Json(reply))
}
