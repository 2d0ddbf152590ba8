//! Header utilities for upstream proxying
//!
//! Builds the fixed credential headers injected into every upstream request and
//! filters client headers so that hop-by-hop headers and client-supplied
//! credentials never reach the upstream.

use anyhow::{Context, Result};
use axum::http::header::HeaderName;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

use crate::config::Config;

/// Header carrying the LiteLLM API key
pub const X_LITELLM_KEY: HeaderName = HeaderName::from_static("x-litellm-key");

/// Client headers that are never forwarded upstream (lower-cased)
pub const EXCLUDED_HEADERS: &[&str] = &[
    "host",
    "content-length",
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailers",
    "transfer-encoding",
    "upgrade",
    "authorization",
    "x-litellm-key",
];

/// Hop-by-hop headers that must not be copied from an upstream reply
const HOP_BY_HOP_HEADERS: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Headers whose values are masked when headers are dumped to the log
const SENSITIVE_HEADERS: &[&str] = &[
    "authorization",
    "proxy-authorization",
    "cookie",
    "x-litellm-key",
];

/// Build the credential headers added to every upstream request.
///
/// `Authorization` carries `ds_key` verbatim and `X-LiteLLM-Key` carries the
/// LiteLLM key with a `Bearer ` prefix; each is present only when its input is
/// non-empty. Fails if a credential contains bytes not allowed in a header.
pub fn build_outbound_headers(config: &Config) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    if !config.litellm_api_key.is_empty() {
        let value = bearer_value(&config.litellm_api_key);
        headers.insert(
            X_LITELLM_KEY,
            HeaderValue::from_str(&value).context("LITELLM_API_KEY is not a valid header value")?,
        );
    }

    if !config.ds_key.is_empty() {
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&config.ds_key).context("DS_KEY is not a valid header value")?,
        );
    }

    Ok(headers)
}

/// Prefix a key with `Bearer ` unless it already starts with it (any case)
pub fn bearer_value(key: &str) -> String {
    let has_prefix = key
        .get(..7)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("bearer "));

    if has_prefix {
        key.to_string()
    } else {
        format!("Bearer {}", key)
    }
}

/// Check if a client header must be dropped before forwarding
pub fn is_excluded_header(name: &str) -> bool {
    EXCLUDED_HEADERS
        .iter()
        .any(|excluded| excluded.eq_ignore_ascii_case(name))
}

/// Check if a header is a hop-by-hop header that should not be relayed
pub fn is_hop_by_hop_header(name: &HeaderName) -> bool {
    HOP_BY_HOP_HEADERS
        .iter()
        .any(|hop| hop.eq_ignore_ascii_case(name.as_str()))
}

/// Compute the headers sent upstream.
///
/// Client headers minus the excluded set, then overlaid with the fixed
/// credential headers. The overlay wins on collision.
pub fn build_forward_headers(incoming: &HeaderMap, outbound: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(incoming.len() + outbound.len());

    for (name, value) in incoming {
        if !is_excluded_header(name.as_str()) {
            headers.append(name.clone(), value.clone());
        }
    }

    for (name, value) in outbound {
        headers.insert(name.clone(), value.clone());
    }

    headers
}

/// Filter hop-by-hop headers from an upstream response
///
/// Used when converting upstream responses back to client responses.
pub fn filter_response_headers(response_headers: &HeaderMap) -> HeaderMap {
    let mut filtered = HeaderMap::with_capacity(response_headers.len());

    for (name, value) in response_headers {
        if !is_hop_by_hop_header(name) {
            filtered.append(name.clone(), value.clone());
        }
    }

    filtered
}

/// Render headers for debug logging with credential values masked
pub fn redacted(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let shown = if SENSITIVE_HEADERS
                .iter()
                .any(|h| h.eq_ignore_ascii_case(name.as_str()))
            {
                "[redacted]".to_string()
            } else {
                String::from_utf8_lossy(value.as_bytes()).into_owned()
            };
            (name.as_str().to_string(), shown)
        })
        .collect()
}
