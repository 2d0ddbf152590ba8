//! LiteLLM proxy - credential-injecting reverse proxy
//!
//! This library provides the core functionality for the proxy server. Every
//! request under `/v1` is forwarded to the configured LiteLLM upstream with the
//! `app_id` query parameter and the proxy's own credential headers injected.
//! Upstream replies are relayed unchanged.

pub mod config;
pub mod error;
pub mod proxy;
pub mod routes;
pub mod telemetry;

use anyhow::{Context, Result};
use tracing::info;

pub use crate::config::Config;
pub use crate::error::ProxyError;
pub use crate::proxy::Forwarder;

/// Application state shared across all request handlers
///
/// Built once at startup and never mutated afterwards.
pub struct AppState {
    pub config: Config,
    pub forwarder: Forwarder,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config) -> Result<Self> {
        let outbound_headers = proxy::headers::build_outbound_headers(&config)?;

        // One pooled client for every request; the timeout bounds the whole
        // round trip and upstream redirects are relayed, not followed
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(100)
            .timeout(config.upstream_timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .context("Failed to build HTTP client")?;

        let forwarder = Forwarder::new(http_client, &config, outbound_headers);

        Ok(Self { config, forwarder })
    }

    /// Report which credentials are configured, never their values
    pub fn log_credentials(&self) {
        let headers = self.forwarder.outbound_headers();
        let litellm_key = headers.contains_key(proxy::headers::X_LITELLM_KEY);
        let ds_key = headers.contains_key(reqwest::header::AUTHORIZATION);

        info!(
            upstream = %self.config.upstream_base_url,
            app_id_set = !self.config.app_id.is_empty(),
            litellm_api_key_set = litellm_key,
            ds_key_set = ds_key,
            "Upstream credentials loaded"
        );

        if !litellm_key && !ds_key {
            info!("No upstream credentials configured, requests will be forwarded unauthenticated");
        }
    }
}
