//! Core domain types and the prediction handler for traffic inference.
//!
//! This crate holds everything that does not depend on a transport or a
//! model format:
//!
//! - [`PredictionRequest`] and [`RawPredictionRequest`] — validated and wire-level inputs
//! - [`FeatureVector`] and [`FeatureSchema`] — the ordered model input and its named contract
//! - [`Predictor`] — the capability a loaded model exposes
//! - [`PredictionService`] — coercion, feature assembly, inference and error classification
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use traffic_core::{FeatureVector, ModelError, PredictionService, Predictor, RawPredictionRequest};
//!
//! struct Constant(f64);
//!
//! impl Predictor for Constant {
//!     fn kind(&self) -> &'static str {
//!         "constant"
//!     }
//!
//!     fn predict(&self, rows: &[FeatureVector]) -> Result<Vec<f64>, ModelError> {
//!         Ok(rows.iter().map(|_| self.0).collect())
//!     }
//! }
//!
//! let service = PredictionService::new(Arc::new(Constant(42.0)));
//! let raw: RawPredictionRequest =
//!     serde_json::from_str(r#"{"hour": 8, "month": 6, "x": -73.99, "y": 40.73}"#).unwrap();
//! assert_eq!(service.predict(&raw).unwrap().value, 42.0);
//! ```

mod features;
mod predictor;
mod request;
mod service;

pub use features::{FeatureSchema, FeatureVector, FEATURE_COUNT, TRAFFIC_FEATURES};
pub use predictor::Predictor;
pub use request::{PredictionRequest, RawPredictionRequest};
pub use service::{Prediction, PredictionService};

use thiserror::Error;

/// Errors surfaced by the prediction handler.
///
/// The two variants are the only classifications a caller ever sees.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    /// A request field could not be coerced to its numeric type.
    #[error("Invalid input values: {0}")]
    InvalidInput(String),

    /// The model failed or produced an unusable result.
    #[error("Error making prediction: {0}")]
    InferenceFailure(String),
}

impl PredictionError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, PredictionError::InvalidInput(_))
    }
}

impl From<ModelError> for PredictionError {
    fn from(e: ModelError) -> Self {
        PredictionError::InferenceFailure(e.to_string())
    }
}

/// Errors raised by a [`Predictor`] implementation during inference.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A row had a different width than the model was fitted on.
    #[error("X has {actual} features, but the model expects {expected}")]
    FeatureCount { expected: usize, actual: usize },

    /// Any other failure inside the model.
    #[error("{0}")]
    Failed(String),
}
