//! Error types for the proxy
//!
//! Every request-time failure is one of two kinds and both are surfaced to the
//! client as `500 Internal Server Error` with a plain-text description.

use std::error::Error as StdError;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Request-time errors
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The upstream call failed: connect, DNS, TLS, timeout or a malformed reply
    #[error("Error proxying request: {}", error_chain(.source))]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Anything else that went wrong while handling the request
    #[error("An unexpected error occurred: {0}")]
    Internal(String),
}

impl ProxyError {
    /// Classify a client error raised for `url`.
    ///
    /// Builder errors mean the outbound request could not be constructed at all
    /// and are internal; everything else happened on the wire.
    pub fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_builder() {
            ProxyError::Internal(error_chain(&err))
        } else {
            ProxyError::Transport {
                url: url.to_string(),
                source: err,
            }
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ProxyError::Transport { source, .. } if source.is_timeout())
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

/// Render an error with all of its sources, e.g.
/// `error sending request for url (...): operation timed out`.
pub fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}

/// Result type alias for convenience
pub type ProxyResult<T> = Result<T, ProxyError>;
