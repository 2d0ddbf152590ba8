//! Root endpoint
//!
//! `GET /` doubles as the liveness probe: it answers as long as the process is
//! serving requests.

use axum::Json;
use serde::Serialize;
use tracing::info;

/// Message returned by the root endpoint
pub const ROOT_MESSAGE: &str = "Proxy service is running. Use POST /v1 to send requests to LiteLLM.";

/// Root response body
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
}

/// Root endpoint
pub async fn root() -> Json<RootResponse> {
    info!("Root endpoint / was hit");

    Json(RootResponse {
        message: ROOT_MESSAGE.to_string(),
    })
}
