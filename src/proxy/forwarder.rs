//! Upstream request forwarder
//!
//! Turns an inbound request under the mount prefix into a call against the
//! configured upstream, injecting the `app_id` parameter and the credential
//! headers, then relays the upstream reply unchanged.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Response, StatusCode};
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_LENGTH};

use crate::{
    config::Config,
    error::{ProxyError, ProxyResult},
    proxy::headers::{build_forward_headers, filter_response_headers},
    proxy::logging::RequestContext,
};

/// Path prefix under which all proxied routes are mounted
pub const MOUNT_PREFIX: &str = "/v1";

/// Query parameter carrying the application identity
pub const APP_ID_PARAM: &str = "app_id";

/// Forwards requests to the upstream LiteLLM server.
///
/// Holds only immutable state, so a single instance is shared by every
/// in-flight request.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: reqwest::Client,
    base_url: String,
    app_id: String,
    outbound_headers: HeaderMap,
    timeout: Duration,
}

impl Forwarder {
    /// Create a new forwarder from the loaded configuration and the prebuilt
    /// credential headers
    pub fn new(client: reqwest::Client, config: &Config, outbound_headers: HeaderMap) -> Self {
        Self {
            client,
            base_url: config.upstream_base_url.clone(),
            app_id: config.app_id.clone(),
            outbound_headers,
            timeout: config.upstream_timeout,
        }
    }

    /// Credential headers added to every upstream request
    pub fn outbound_headers(&self) -> &HeaderMap {
        &self.outbound_headers
    }

    /// Upstream URL for an inbound path: base URL plus the path after the mount
    /// prefix, concatenated without normalisation
    pub fn target_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path_suffix(path))
    }

    /// Forward one request and relay the upstream reply.
    ///
    /// The upstream body is buffered completely before the response is built, so
    /// any failure yields an error instead of a truncated relay.
    pub async fn forward(
        &self,
        ctx: &RequestContext,
        method: Method,
        path: &str,
        query: Option<&str>,
        incoming_headers: &HeaderMap,
        body: Bytes,
    ) -> ProxyResult<Response<Body>> {
        let target_url = self.target_url(path);
        let params = merge_query_params(query, &self.app_id);
        ctx.log_target(&target_url, &params);

        let mut headers = build_forward_headers(incoming_headers, &self.outbound_headers);
        // An empty payload is still framed for methods that expect one
        if body.is_empty() && carries_payload(&method) {
            headers.insert(CONTENT_LENGTH, HeaderValue::from_static("0"));
        }
        ctx.log_headers_prepared(&headers);

        ctx.log_upstream_request(&target_url, &params, body.len());

        let response = self
            .client
            .request(method, &target_url)
            .query(&params)
            .headers(headers)
            .body(body)
            .send()
            .await
            .map_err(|e| self.upstream_failure(ctx, &target_url, e))?;

        let status = response.status();
        let upstream_headers = response.headers().clone();
        let upstream_body = response
            .bytes()
            .await
            .map_err(|e| self.upstream_failure(ctx, &target_url, e))?;

        ctx.log_upstream_response(
            &target_url,
            status.as_u16(),
            &upstream_headers,
            &upstream_body,
        );

        relay_response(status, &upstream_headers, upstream_body).map_err(|e| {
            ctx.log_error(&e.to_string());
            e
        })
    }

    /// Classify and log a failed upstream call
    fn upstream_failure(&self, ctx: &RequestContext, url: &str, err: reqwest::Error) -> ProxyError {
        let err = ProxyError::from_reqwest(url, err);

        match &err {
            ProxyError::Transport { .. } => {
                if err.is_timeout() {
                    ctx.log_timeout(url, self.timeout.as_millis());
                }
                ctx.log_connection_error(&err.to_string(), url);
            }
            ProxyError::Internal(detail) => ctx.log_error(detail),
        }

        err
    }
}

/// Portion of `path` after the mount prefix; empty for the proxy root
pub fn path_suffix(path: &str) -> &str {
    path.strip_prefix(MOUNT_PREFIX).unwrap_or(path)
}

/// Whether `method` defines a request payload, so an empty body is sent as
/// `Content-Length: 0` rather than omitted
pub fn carries_payload(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}

/// Decode the inbound query and force `app_id` to the configured identity.
///
/// A repeated key keeps its first position and its last value. `app_id` is
/// overwritten in place when the client sent one, appended otherwise.
pub fn merge_query_params(raw_query: Option<&str>, app_id: &str) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = Vec::new();

    let decoded = url::form_urlencoded::parse(raw_query.unwrap_or("").as_bytes())
        .map(|(key, value)| (key.into_owned(), value.into_owned()));

    for (key, value) in decoded.chain(std::iter::once((
        APP_ID_PARAM.to_string(),
        app_id.to_string(),
    ))) {
        match params.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => params.push((key, value)),
        }
    }

    params
}

/// Build the client response from the buffered upstream reply
fn relay_response(
    status: StatusCode,
    upstream_headers: &HeaderMap,
    body: Bytes,
) -> ProxyResult<Response<Body>> {
    let mut builder = Response::builder().status(status);

    if let Some(headers) = builder.headers_mut() {
        headers.extend(filter_response_headers(upstream_headers));
    }

    builder
        .body(Body::from(body))
        .map_err(|e| ProxyError::Internal(format!("Failed to build response: {}", e)))
}
