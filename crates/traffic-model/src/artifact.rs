//! On-disk model artifact schema.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use traffic_core::{FeatureSchema, Predictor};

use crate::ensemble::{Aggregation, Tree, TreeEnsemble};
use crate::linear::LinearModel;
use crate::ModelLoadError;

/// Artifact format version this crate reads.
pub const FORMAT_VERSION: u32 = 1;

/// A serialized model together with the feature names it was fitted on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub features: Vec<String>,
    pub model: ModelSpec,
}

/// Model parameters, tagged by model family.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelSpec {
    Linear {
        intercept: f64,
        coefficients: Vec<f64>,
    },
    TreeEnsemble {
        #[serde(default)]
        aggregation: Aggregation,
        #[serde(default)]
        base_score: f64,
        trees: Vec<Tree>,
    },
}

impl ModelArtifact {
    pub fn from_json(content: &str) -> Result<Self, ModelLoadError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Validates the artifact against the serving schema and builds its predictor.
    pub fn into_predictor(self) -> Result<Arc<dyn Predictor>, ModelLoadError> {
        if self.format_version != FORMAT_VERSION {
            return Err(ModelLoadError::UnsupportedVersion {
                found: self.format_version,
                supported: FORMAT_VERSION,
            });
        }

        FeatureSchema::traffic()
            .check(&self.features)
            .map_err(ModelLoadError::SchemaMismatch)?;

        let n_features = self.features.len();
        let predictor: Arc<dyn Predictor> = match self.model {
            ModelSpec::Linear { intercept, coefficients } => {
                Arc::new(LinearModel::new(intercept, coefficients, n_features)?)
            }
            ModelSpec::TreeEnsemble { aggregation, base_score, trees } => {
                Arc::new(TreeEnsemble::new(trees, aggregation, base_score, n_features)?)
            }
        };

        Ok(predictor)
    }
}
