//! Prediction HTTP handler.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tracing::{error, info, warn};
use traffic_core::{Prediction, PredictionError, RawPredictionRequest};

use crate::error::AppError;
use crate::state::AppState;

/// POST /api/predict - Predict traffic volume for one hour/month/location.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RawPredictionRequest>, JsonRejection>,
) -> Result<Json<Prediction>, AppError> {
    let Json(raw) = body.map_err(|rejection| {
        warn!("Rejected prediction body: {}", rejection.body_text());
        PredictionError::InvalidInput(rejection.body_text())
    })?;

    let prediction = state.predictions.predict(&raw).map_err(|e| {
        match &e {
            PredictionError::InvalidInput(_) => warn!("Prediction rejected: {}", e),
            PredictionError::InferenceFailure(_) => error!("Prediction failed: {}", e),
        }
        e
    })?;

    info!("Prediction: {}", prediction.value);
    Ok(Json(prediction))
}
