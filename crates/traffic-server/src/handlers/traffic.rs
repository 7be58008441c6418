//! Traffic listing handler.

use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::Json;

use crate::dto::{TrafficQuery, TrafficRecord, TrafficResponse};
use crate::error::AppError;

/// Fixed sample data; pagination parameters are echoed but do not filter.
fn sample_records() -> Vec<TrafficRecord> {
    vec![TrafficRecord::new("NYC", 350), TrafficRecord::new("LA", 220)]
}

/// GET /api/traffic - List traffic volumes.
pub async fn list(
    query: Result<Query<TrafficQuery>, QueryRejection>,
) -> Result<Json<TrafficResponse>, AppError> {
    let Query(params) = query.map_err(|rejection| {
        tracing::warn!("Rejected traffic query: {}", rejection.body_text());
        AppError::BadRequest(rejection.body_text())
    })?;

    Ok(Json(TrafficResponse {
        page: params.page,
        limit: params.limit,
        data: sample_records(),
    }))
}
