//! HTTP routes for the proxy
//!
//! This module defines all HTTP endpoints exposed by the proxy.

pub mod passthrough;
pub mod root;

use std::sync::Arc;

use axum::{
    routing::{get, MethodRouter},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::{proxy::MOUNT_PREFIX, AppState};

/// Create the main application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let proxied = proxy_methods();

    Router::new()
        .route("/", get(root::root))
        // `/v1` itself maps to the upstream base URL
        .route(MOUNT_PREFIX, proxied.clone())
        // `/*path` never matches an empty tail
        .route(&format!("{}/", MOUNT_PREFIX), proxied.clone())
        .route(&format!("{}/*path", MOUNT_PREFIX), proxied)
        // Global middleware (applied to all routes)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// The methods accepted under the mount prefix
fn proxy_methods() -> MethodRouter<Arc<AppState>> {
    let handler = passthrough::passthrough_handler;

    get(handler)
        .post(handler)
        .put(handler)
        .delete(handler)
        .patch(handler)
        .options(handler)
        .head(handler)
}
