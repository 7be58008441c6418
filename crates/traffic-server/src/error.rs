//! Application error types and Axum response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use traffic_core::PredictionError;

use crate::dto::ErrorResponse;

/// Application-level errors with HTTP status code mapping.
#[derive(Debug)]
pub enum AppError {
    /// A prediction could not be produced.
    Prediction(PredictionError),
    /// Malformed query parameters.
    BadRequest(String),
}

impl From<PredictionError> for AppError {
    fn from(e: PredictionError) -> Self {
        AppError::Prediction(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::Prediction(e @ PredictionError::InvalidInput(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, format!("Prediction failed: {}", e))
            }
            AppError::Prediction(e @ PredictionError::InferenceFailure(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Prediction failed: {}", e))
            }
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
        };
        (status, Json(ErrorResponse { detail })).into_response()
    }
}
