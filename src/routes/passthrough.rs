//! Pass-through proxy handler
//!
//! Generic handler that forwards every request under `/v1` to the upstream
//! LiteLLM server without parsing the request body.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{OriginalUri, State},
    http::{header::HeaderMap, Method},
    response::Response,
};
use http_body_util::BodyExt;
use tracing::Instrument;

use crate::{
    error::ProxyError,
    proxy::RequestContext,
    AppState,
};

/// Pass-through handler for all `/v1` requests
///
/// This handler:
/// 1. Reads the full inbound body
/// 2. Hands method, path, query, headers and body to the forwarder
/// 3. Returns the upstream reply, or a plain-text 500 on failure
pub async fn passthrough_handler(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    method: Method,
    headers: HeaderMap,
    request: axum::extract::Request,
) -> Result<Response<Body>, ProxyError> {
    let ctx = RequestContext::new(method.as_str(), uri.path());
    let span = ctx.create_span();

    async move {
        ctx.log_request_received(&uri.to_string());

        let body = request
            .into_body()
            .collect()
            .await
            .map_err(|e| {
                let err = ProxyError::Internal(format!("Failed to read request body: {}", e));
                ctx.log_error(&err.to_string());
                err
            })?
            .to_bytes();

        ctx.log_inbound(&headers, uri.query(), &body);

        state
            .forwarder
            .forward(&ctx, method, uri.path(), uri.query(), &headers, body)
            .await
    }
    .instrument(span)
    .await
}
