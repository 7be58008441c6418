use traffic_core::{FeatureVector, ModelError, Predictor};

use crate::ModelLoadError;

/// Ordinary linear regression: `intercept + coefficients · features`.
#[derive(Debug, Clone)]
pub struct LinearModel {
    intercept: f64,
    coefficients: Vec<f64>,
}

impl LinearModel {
    pub fn new(intercept: f64, coefficients: Vec<f64>, n_features: usize) -> Result<Self, ModelLoadError> {
        if coefficients.len() != n_features {
            return Err(ModelLoadError::Invalid(format!(
                "linear model has {} coefficients for {} features",
                coefficients.len(),
                n_features
            )));
        }
        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelLoadError::Invalid("linear model has non-finite parameters".into()));
        }

        Ok(Self { intercept, coefficients })
    }

    fn predict_row(&self, row: &FeatureVector) -> Result<f64, ModelError> {
        if row.len() != self.coefficients.len() {
            return Err(ModelError::FeatureCount {
                expected: self.coefficients.len(),
                actual: row.len(),
            });
        }

        let dot: f64 = self
            .coefficients
            .iter()
            .zip(row.as_slice())
            .map(|(c, x)| c * x)
            .sum();
        Ok(self.intercept + dot)
    }
}

impl Predictor for LinearModel {
    fn kind(&self) -> &'static str {
        "linear"
    }

    fn predict(&self, rows: &[FeatureVector]) -> Result<Vec<f64>, ModelError> {
        rows.iter().map(|row| self.predict_row(row)).collect()
    }
}
