//! Integration tests for the LiteLLM proxy
//!
//! These tests drive the real router through `axum-test` against a wiremock
//! upstream and inspect what the upstream actually received.

mod root;
