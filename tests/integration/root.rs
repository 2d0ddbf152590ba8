//! Root endpoint integration tests
//!
//! Tests for the liveness endpoint:
//! - GET / - Fixed status message

use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{test_config, test_server, ProxyTestHarness};

#[tokio::test]
async fn test_root_returns_status_message() {
    let harness = ProxyTestHarness::new().await;

    let response = harness.server.get("/").await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({"message": "Proxy service is running. Use POST /v1 to send requests to LiteLLM."})
    );
    assert!(harness.upstream.received_requests().await.is_empty());
}

#[tokio::test]
async fn test_root_does_not_need_a_reachable_upstream() {
    let server = test_server(test_config("http://127.0.0.1:1/v1"));

    let response = server.get("/").await;

    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let harness = ProxyTestHarness::new().await;

    let response = harness.server.get("/v2/models").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert!(harness.upstream.received_requests().await.is_empty());
}

#[tokio::test]
async fn test_root_rejects_post() {
    let harness = ProxyTestHarness::new().await;

    let response = harness.server.post("/").await;

    assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
}
