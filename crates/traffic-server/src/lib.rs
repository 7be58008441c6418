//! HTTP server exposing traffic volume predictions.
//!
//! Routes:
//!
//! - `GET /api/traffic` — paginated traffic listing
//! - `POST /api/predict` — predict traffic volume for an hour, month and location
//! - `GET /health` — liveness probe

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod state;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::{info, Level};
use traffic_core::PredictionService;

pub use config::{ConfigError, ServerConfig};
pub use state::AppState;

/// Builds the application router over an already-loaded model.
///
/// Only the `/api` routes are traced; health probes stay out of the logs.
pub fn router(state: Arc<AppState>) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        );

    Router::new()
        .route("/api/traffic", get(handlers::traffic::list))
        .route("/api/predict", post(handlers::predict::predict))
        .layer(trace_layer)
        .route("/health", get(handlers::health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Loads the model, then binds and serves until the process exits.
///
/// A model that fails to load aborts before any socket is bound.
pub async fn serve(config: ServerConfig) -> Result<()> {
    let model = traffic_model::load_model(&config.model_path)
        .with_context(|| format!("failed to load model from {}", config.model_path.display()))?;

    let state = Arc::new(AppState::new(PredictionService::new(model)));
    let app = router(state);

    let addr = config.bind_address();
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
