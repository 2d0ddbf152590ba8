//! Mock LiteLLM upstream for testing
//!
//! Provides wiremock-based mocks for the upstream the proxy forwards to. The
//! upstream is mounted under `/v1` so that the proxy's base URL looks like a
//! real LiteLLM deployment.
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::mocks::upstream::MockUpstream;
//!
//! #[tokio::test]
//! async fn test_with_upstream_mock() {
//!     let upstream = MockUpstream::start().await;
//!     upstream.mock_chat_completion_success().await;
//!
//!     // Use upstream.base_url() as LITELLM_BASE_URL
//!     // ...
//! }
//! ```

#![allow(dead_code)]

use std::time::Duration;

use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Mock upstream server wrapper
pub struct MockUpstream {
    server: MockServer,
}

impl MockUpstream {
    /// Start a new mock upstream server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Get the mock server URI
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Base URL to configure the proxy with
    pub fn base_url(&self) -> String {
        format!("{}/v1", self.server.uri())
    }

    /// Access the underlying server for ad-hoc mocks
    pub fn server(&self) -> &MockServer {
        &self.server
    }

    /// All requests the upstream has received so far
    pub async fn received_requests(&self) -> Vec<wiremock::Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// The single request the upstream has received
    pub async fn single_request(&self) -> wiremock::Request {
        let mut requests = self.received_requests().await;
        assert_eq!(requests.len(), 1, "expected exactly one upstream request");
        requests.remove(0)
    }

    /// Verify all mounted expectations
    pub async fn verify(&self) {
        self.server.verify().await;
    }

    // =========================================================================
    // POST /v1/chat/completions
    // =========================================================================

    /// Mock successful chat completion response
    pub async fn mock_chat_completion_success(&self) {
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(UpstreamTestData::chat_completion()))
            .mount(&self.server)
            .await;
    }

    // =========================================================================
    // Generic responses
    // =========================================================================

    /// Respond to `http_method` on `upstream_path` with an empty 200
    pub async fn mock_ok(&self, http_method: &str, upstream_path: &str) {
        Mock::given(method(http_method))
            .and(path(upstream_path))
            .respond_with(ResponseTemplate::new(200))
            .mount(&self.server)
            .await;
    }

    /// Respond with the given status, JSON body and nothing else
    pub async fn mock_json(&self, http_method: &str, upstream_path: &str, status: u16, body: Value) {
        Mock::given(method(http_method))
            .and(path(upstream_path))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Respond only after `delay`, for timeout tests
    pub async fn mock_slow(&self, upstream_path: &str, delay: Duration) {
        Mock::given(path(upstream_path))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(UpstreamTestData::chat_completion())
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }
}

/// Sample upstream payloads
pub struct UpstreamTestData;

impl UpstreamTestData {
    pub fn chat_completion() -> Value {
        json!({
            "id": "chatcmpl-test123",
            "object": "chat.completion",
            "created": 1706745600,
            "model": "gpt-4o",
            "choices": [
                {
                    "index": 0,
                    "message": {
                        "role": "assistant",
                        "content": "Hello! How can I help you today?"
                    },
                    "finish_reason": "stop"
                }
            ],
            "usage": {
                "prompt_tokens": 10,
                "completion_tokens": 8,
                "total_tokens": 18
            }
        })
    }

    pub fn models() -> Value {
        json!({
            "object": "list",
            "data": [
                {"id": "gpt-4o", "object": "model", "created": 1706745600, "owned_by": "openai"},
                {"id": "claude-3-5-sonnet", "object": "model", "created": 1729555200, "owned_by": "anthropic"}
            ]
        })
    }

    pub fn rate_limited() -> Value {
        json!({
            "error": {
                "message": "Rate limit exceeded. Please retry after 60 seconds.",
                "type": "rate_limit_error",
                "code": "rate_limit_exceeded"
            }
        })
    }
}
