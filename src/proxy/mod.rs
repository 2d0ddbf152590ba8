//! Proxy module
//!
//! Handles header rewriting and request forwarding to the upstream LiteLLM server.

pub mod forwarder;
pub mod headers;
pub mod logging;

pub use forwarder::{Forwarder, MOUNT_PREFIX};
pub use logging::RequestContext;
