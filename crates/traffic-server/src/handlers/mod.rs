//! HTTP route handlers for the traffic server.

pub mod predict;
pub mod traffic;

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}
