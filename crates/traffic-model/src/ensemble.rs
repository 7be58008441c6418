//! Regression tree ensembles (random forests and boosted trees).

use serde::{Deserialize, Serialize};
use traffic_core::{FeatureVector, ModelError, Predictor};

use crate::ModelLoadError;

/// How per-tree outputs combine into one prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Average of tree outputs (random forest).
    #[default]
    Mean,
    /// Sum of tree outputs (gradient boosting).
    Sum,
}

/// A node in a flat tree array. Node 0 is the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Rows with `features[feature] <= threshold` go to `left`, others to `right`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf { leaf: f64 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

impl Tree {
    /// Child indices must point strictly forward, which rules out cycles.
    fn validate(&self, n_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".into());
        }

        for (index, node) in self.nodes.iter().enumerate() {
            match *node {
                TreeNode::Leaf { leaf } if !leaf.is_finite() => {
                    return Err(format!("node {} has a non-finite leaf value", index));
                }
                TreeNode::Leaf { .. } => {}
                TreeNode::Split { feature, threshold, left, right } => {
                    if feature >= n_features {
                        return Err(format!(
                            "node {} splits on feature {} but the model has {} features",
                            index, feature, n_features
                        ));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {} has a non-finite threshold", index));
                    }
                    for child in [left, right] {
                        if child <= index || child >= self.nodes.len() {
                            return Err(format!("node {} has invalid child index {}", index, child));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn evaluate(&self, row: &FeatureVector) -> Result<f64, ModelError> {
        let mut index = 0;
        loop {
            match self.nodes.get(index) {
                Some(TreeNode::Leaf { leaf }) => return Ok(*leaf),
                Some(TreeNode::Split { feature, threshold, left, right }) => {
                    let value = row.get(*feature).ok_or(ModelError::FeatureCount {
                        expected: feature + 1,
                        actual: row.len(),
                    })?;
                    index = if value <= *threshold { *left } else { *right };
                }
                None => return Err(ModelError::Failed(format!("tree node {} does not exist", index))),
            }
        }
    }
}

/// An ensemble of regression trees over a fixed feature width.
#[derive(Debug, Clone)]
pub struct TreeEnsemble {
    trees: Vec<Tree>,
    aggregation: Aggregation,
    base_score: f64,
    n_features: usize,
}

impl TreeEnsemble {
    pub fn new(
        trees: Vec<Tree>,
        aggregation: Aggregation,
        base_score: f64,
        n_features: usize,
    ) -> Result<Self, ModelLoadError> {
        if trees.is_empty() {
            return Err(ModelLoadError::Invalid("tree ensemble has no trees".into()));
        }
        if !base_score.is_finite() {
            return Err(ModelLoadError::Invalid("tree ensemble has a non-finite base score".into()));
        }
        for (i, tree) in trees.iter().enumerate() {
            tree.validate(n_features)
                .map_err(|e| ModelLoadError::Invalid(format!("tree {}: {}", i, e)))?;
        }

        Ok(Self { trees, aggregation, base_score, n_features })
    }

    fn predict_row(&self, row: &FeatureVector) -> Result<f64, ModelError> {
        if row.len() != self.n_features {
            return Err(ModelError::FeatureCount {
                expected: self.n_features,
                actual: row.len(),
            });
        }

        let mut total = 0.0;
        for tree in &self.trees {
            total += tree.evaluate(row)?;
        }

        let combined = match self.aggregation {
            Aggregation::Mean => total / self.trees.len() as f64,
            Aggregation::Sum => total,
        };
        Ok(self.base_score + combined)
    }
}

impl Predictor for TreeEnsemble {
    fn kind(&self) -> &'static str {
        "tree_ensemble"
    }

    fn predict(&self, rows: &[FeatureVector]) -> Result<Vec<f64>, ModelError> {
        rows.iter().map(|row| self.predict_row(row)).collect()
    }
}
