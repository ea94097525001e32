//! HTTP surface tests driven through the axum router

use axum::body::Body;
use axum::http::{Request, StatusCode};
use dode_client::DodeClient;
use dode_secrets::StaticSecretStore;
use dode_webhook::server::build_router;
use dode_webhook::{ChallengePayload, DodeSolver, SolverRegistry};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GROUP: &str = "acme.example.com";

async fn registry_for(server: &MockServer) -> Arc<SolverRegistry> {
    let client = DodeClient::builder()
        .api_url(format!("{}/api/letsencrypt", server.uri()))
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap();
    let store = StaticSecretStore::new().with_secret(
        "cert-manager",
        "dode-credentials",
        [("api-token", "tok-123")],
    );
    let mut registry = SolverRegistry::new(GROUP);
    registry
        .register(Box::new(
            DodeSolver::new(client).with_secret_store(Arc::new(store)),
        ))
        .unwrap();
    Arc::new(registry)
}

fn payload(action: &str) -> Value {
    json!({
        "apiVersion": "acme.cert-manager.io/v1alpha1",
        "kind": "ChallengePayload",
        "request": {
            "uid": "uid-42",
            "action": action,
            "type": "dns-01",
            "dnsName": "example.com",
            "key": "txt-value",
            "resourceNamespace": "cert-manager",
            "resolvedFQDN": "_acme-challenge.example.com.",
            "resolvedZone": "example.com.",
            "config": {"apiTokenSecretRef": {"name": "dode-credentials", "key": "api-token"}}
        }
    })
}

fn post(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> ChallengePayload {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_endpoint() {
    let server = MockServer::start().await;
    let app = build_router(registry_for(&server).await);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn present_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/letsencrypt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"success": true}"#))
        .expect(1)
        .mount(&server)
        .await;
    let app = build_router(registry_for(&server).await);

    let response = app
        .oneshot(post(
            "/apis/acme.example.com/v1alpha1/dode",
            &payload("Present"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let reply = body_json(response).await;
    let result = reply.response.unwrap();
    assert!(result.success);
    assert_eq!(result.uid, "uid-42");
    assert!(reply.request.is_some());
}

#[tokio::test]
async fn provider_failure_returns_unsuccessful_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/letsencrypt"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"success": false, "error": "rate limited"}"#),
        )
        .mount(&server)
        .await;
    let app = build_router(registry_for(&server).await);

    let response = app
        .oneshot(post(
            "/apis/acme.example.com/v1alpha1/dode",
            &payload("CleanUp"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let result = body_json(response).await.response.unwrap();
    assert!(!result.success);
    let status = result.status.unwrap();
    assert_eq!(status.reason, "ProviderRejected");
    assert!(status.message.contains("rate limited"));
}

#[tokio::test]
async fn unknown_group_is_not_found() {
    let server = MockServer::start().await;
    let app = build_router(registry_for(&server).await);

    let response = app
        .oneshot(post(
            "/apis/other.example.com/v1alpha1/dode",
            &payload("Present"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_solver_is_reported_in_payload() {
    let server = MockServer::start().await;
    let app = build_router(registry_for(&server).await);

    let response = app
        .oneshot(post(
            "/apis/acme.example.com/v1alpha1/route53",
            &payload("Present"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let result = body_json(response).await.response.unwrap();
    assert!(!result.success);
    assert_eq!(result.status.unwrap().reason, "NotFound");
}
