use crate::{FeatureVector, ModelError};

/// Inference capability of a loaded model.
///
/// Implementations are read-only after construction and shared across all
/// concurrent requests, so every method takes `&self`.
pub trait Predictor: Send + Sync {
    /// Short model family name, used in logs.
    fn kind(&self) -> &'static str;

    /// Predicts one scalar per input row, in row order.
    fn predict(&self, rows: &[FeatureVector]) -> Result<Vec<f64>, ModelError>;
}
