//! Request logging utilities for upstream proxying
//!
//! Provides structured logging with correlation IDs so every line emitted for a
//! proxied request can be tied back to it.

use std::time::Instant;

use bytes::Bytes;
use reqwest::header::HeaderMap;
use tracing::{debug, error, info, Span};
use uuid::Uuid;

use crate::proxy::headers::redacted;

/// Context for tracking a request through the proxy
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique identifier for this request (for log correlation)
    pub trace_id: String,
    /// When the request started
    pub start_time: Instant,
    /// HTTP method of the inbound request
    pub method: String,
    /// Inbound path including the mount prefix
    pub path: String,
}

impl RequestContext {
    /// Create a new request context
    pub fn new(method: &str, path: &str) -> Self {
        Self {
            trace_id: Uuid::new_v4().to_string()[..8].to_string(), // Short ID for readability
            start_time: Instant::now(),
            method: method.to_string(),
            path: path.to_string(),
        }
    }

    /// Get elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u128 {
        self.start_time.elapsed().as_millis()
    }

    /// Log request receipt
    pub fn log_request_received(&self, uri: &str) {
        info!(
            trace_id = %self.trace_id,
            method = %self.method,
            uri = %uri,
            "Received request"
        );
    }

    /// Log the inbound headers, query and body (debug level)
    pub fn log_inbound(&self, headers: &HeaderMap, query: Option<&str>, body: &Bytes) {
        debug!(
            trace_id = %self.trace_id,
            headers = ?redacted(headers),
            "Incoming headers"
        );
        debug!(
            trace_id = %self.trace_id,
            query = %query.unwrap_or(""),
            "Incoming query params"
        );
        debug!(
            trace_id = %self.trace_id,
            body_len = body.len(),
            body = %String::from_utf8_lossy(body),
            "Incoming body"
        );
    }

    /// Log the computed upstream target
    pub fn log_target(&self, url: &str, params: &[(String, String)]) {
        info!(trace_id = %self.trace_id, url = %url, "Target URL");
        debug!(
            trace_id = %self.trace_id,
            params = ?params,
            "Query params to be sent"
        );
    }

    /// Log headers being sent (debug level)
    pub fn log_headers_prepared(&self, headers: &HeaderMap) {
        debug!(
            trace_id = %self.trace_id,
            header_count = headers.len(),
            headers = ?redacted(headers),
            "Headers to be sent"
        );
    }

    /// Log request being sent to upstream
    pub fn log_upstream_request(&self, url: &str, params: &[(String, String)], body_size: usize) {
        info!(
            trace_id = %self.trace_id,
            method = %self.method,
            url = %url,
            params = ?params,
            body_size = body_size,
            "Forwarding request to upstream"
        );
    }

    /// Log response received from upstream
    pub fn log_upstream_response(&self, url: &str, status: u16, headers: &HeaderMap, body: &Bytes) {
        info!(
            trace_id = %self.trace_id,
            method = %self.method,
            url = %url,
            status = status,
            elapsed_ms = %self.elapsed_ms(),
            "Received response from upstream"
        );
        debug!(
            trace_id = %self.trace_id,
            headers = ?redacted(headers),
            "Response headers from upstream"
        );
        debug!(
            trace_id = %self.trace_id,
            body_len = body.len(),
            body = %String::from_utf8_lossy(body),
            "Response content from upstream"
        );
    }

    /// Log connection error (specific for debugging connectivity issues)
    pub fn log_connection_error(&self, error: &str, url: &str) {
        error!(
            trace_id = %self.trace_id,
            method = %self.method,
            url = %url,
            elapsed_ms = %self.elapsed_ms(),
            error = %error,
            "Request to upstream failed"
        );
    }

    /// Log timeout
    pub fn log_timeout(&self, url: &str, timeout_ms: u128) {
        error!(
            trace_id = %self.trace_id,
            method = %self.method,
            url = %url,
            timeout_ms = %timeout_ms,
            elapsed_ms = %self.elapsed_ms(),
            "Request to upstream timed out"
        );
    }

    /// Log request failure
    pub fn log_error(&self, error: &str) {
        error!(
            trace_id = %self.trace_id,
            method = %self.method,
            path = %self.path,
            elapsed_ms = %self.elapsed_ms(),
            error = %error,
            "An unexpected error occurred"
        );
    }

    /// Create a tracing span for this request
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "proxy_request",
            trace_id = %self.trace_id,
            method = %self.method,
            path = %self.path,
        )
    }
}
