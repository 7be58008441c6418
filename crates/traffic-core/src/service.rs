//! Prediction handler: coercion, feature assembly, inference, error classification.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::{PredictionError, PredictionRequest, Predictor, RawPredictionRequest};

/// A single model output for one request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    #[serde(rename = "prediction")]
    pub value: f64,
}

/// Immutable service wrapping the process-wide model.
///
/// Constructed once at startup and cloned cheaply into request handlers.
#[derive(Clone)]
pub struct PredictionService {
    model: Arc<dyn Predictor>,
}

impl PredictionService {
    pub fn new(model: Arc<dyn Predictor>) -> Self {
        Self { model }
    }

    pub fn model_kind(&self) -> &'static str {
        self.model.kind()
    }

    /// Coerces a raw request and predicts for it.
    ///
    /// The model is never invoked when coercion fails.
    pub fn predict(&self, raw: &RawPredictionRequest) -> Result<Prediction, PredictionError> {
        let request = PredictionRequest::try_from(raw)?;
        self.predict_request(&request)
    }

    /// Runs exactly one single-row inference for an already validated request.
    pub fn predict_request(&self, request: &PredictionRequest) -> Result<Prediction, PredictionError> {
        if !request.in_expected_domain() {
            warn!(
                hour = request.hour,
                month = request.month,
                "Request outside expected hour/month domain"
            );
        }

        let features = request.features();
        let outputs = self.model.predict(std::slice::from_ref(&features))?;

        let value = outputs
            .first()
            .copied()
            .ok_or_else(|| PredictionError::InferenceFailure("model returned no predictions".into()))?;

        if !value.is_finite() {
            return Err(PredictionError::InferenceFailure(format!(
                "model returned a non-finite value ({})",
                value
            )));
        }

        debug!(features = ?features.as_slice(), prediction = value, "Prediction computed");
        Ok(Prediction { value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FeatureVector, ModelError, FEATURE_COUNT};
    use serde_json::json;
    use std::sync::Mutex;

    /// Records every batch it sees and returns the sum of each row.
    #[derive(Default)]
    struct RecordingPredictor {
        batches: Mutex<Vec<Vec<FeatureVector>>>,
    }

    impl Predictor for RecordingPredictor {
        fn kind(&self) -> &'static str {
            "recording"
        }

        fn predict(&self, rows: &[FeatureVector]) -> Result<Vec<f64>, ModelError> {
            self.batches.lock().unwrap().push(rows.to_vec());
            Ok(rows.iter().map(|r| r.as_slice().iter().sum()).collect())
        }
    }

    struct FixedOutput(Result<Vec<f64>, ModelError>);

    impl Predictor for FixedOutput {
        fn kind(&self) -> &'static str {
            "fixed"
        }

        fn predict(&self, _rows: &[FeatureVector]) -> Result<Vec<f64>, ModelError> {
            self.0.clone()
        }
    }

    fn raw(value: serde_json::Value) -> RawPredictionRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_predict_valid_request() {
        let model = Arc::new(RecordingPredictor::default());
        let service = PredictionService::new(model.clone());

        let prediction = service
            .predict(&raw(json!({"hour": 8, "month": 6, "x": -73.99, "y": 40.73})))
            .unwrap();

        assert!(prediction.value.is_finite());
        assert!((prediction.value - (8.0 + 6.0 - 73.99 + 40.73)).abs() < 1e-9);
        assert_eq!(model.batches.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_feature_order_ignores_body_field_order() {
        let model = Arc::new(RecordingPredictor::default());
        let service = PredictionService::new(model.clone());

        let body: RawPredictionRequest =
            serde_json::from_str(r#"{"y": 40.73, "x": -73.99, "month": 6, "hour": 8}"#).unwrap();
        service.predict(&body).unwrap();

        let batches = model.batches.lock().unwrap();
        assert_eq!(batches[0].len(), 1);
        let row = batches[0][0];
        assert_eq!(row.len(), FEATURE_COUNT);
        assert_eq!(row.as_slice(), &[8.0, 6.0, -73.99, 40.73]);
    }

    #[test]
    fn test_invalid_input_never_reaches_model() {
        let model = Arc::new(RecordingPredictor::default());
        let service = PredictionService::new(model.clone());

        let err = service
            .predict(&raw(json!({"hour": "bad", "month": 6, "x": 1.0, "y": 1.0})))
            .unwrap_err();

        assert!(err.is_invalid_input());
        assert!(model.batches.lock().unwrap().is_empty());
    }

    #[test]
    fn test_out_of_domain_values_are_served() {
        let service = PredictionService::new(Arc::new(RecordingPredictor::default()));
        let prediction = service
            .predict(&raw(json!({"hour": 30, "month": 13, "x": 0.0, "y": 0.0})))
            .unwrap();
        assert_eq!(prediction.value, 43.0);
    }

    #[test]
    fn test_model_error_is_inference_failure() {
        let service = PredictionService::new(Arc::new(FixedOutput(Err(ModelError::FeatureCount {
            expected: 5,
            actual: 4,
        }))));

        let err = service
            .predict(&raw(json!({"hour": 1, "month": 1, "x": 1.0, "y": 1.0})))
            .unwrap_err();
        assert_eq!(
            err,
            PredictionError::InferenceFailure("X has 4 features, but the model expects 5".into())
        );
        assert_eq!(
            err.to_string(),
            "Error making prediction: X has 4 features, but the model expects 5"
        );
    }

    #[test]
    fn test_empty_output_is_inference_failure() {
        let service = PredictionService::new(Arc::new(FixedOutput(Ok(vec![]))));
        let err = service
            .predict_request(&PredictionRequest { hour: 1, month: 1, x: 0.0, y: 0.0 })
            .unwrap_err();
        assert_eq!(err, PredictionError::InferenceFailure("model returned no predictions".into()));
    }

    #[test]
    fn test_non_finite_output_is_inference_failure() {
        let service = PredictionService::new(Arc::new(FixedOutput(Ok(vec![f64::NAN]))));
        let err = service
            .predict_request(&PredictionRequest { hour: 1, month: 1, x: 0.0, y: 0.0 })
            .unwrap_err();
        assert!(!err.is_invalid_input());
        assert!(err.to_string().contains("non-finite"));
    }

    #[test]
    fn test_prediction_serializes_as_prediction_field() {
        let json = serde_json::to_value(Prediction { value: 12.5 }).unwrap();
        assert_eq!(json, json!({"prediction": 12.5}));
    }
}
