//! Feature ordering contract between requests and the model.

/// Number of features every traffic model consumes.
pub const FEATURE_COUNT: usize = 4;

/// Serving feature names, in the positional order the model expects.
pub const TRAFFIC_FEATURES: [&str; FEATURE_COUNT] = ["hour", "month", "x", "y"];

/// An ordered, fixed-width model input row: `[hour, month, x, y]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Value at a positional index, if in range.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    pub fn len(&self) -> usize {
        FEATURE_COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Named feature schema that a model artifact declares it was fitted against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    names: Vec<String>,
}

impl FeatureSchema {
    /// The schema this service builds feature vectors for.
    pub fn traffic() -> Self {
        Self {
            names: TRAFFIC_FEATURES.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Checks declared model features against this schema, position by position.
    ///
    /// Names compare case-insensitively so that `X`/`Y` column headers match.
    pub fn check(&self, declared: &[String]) -> Result<(), String> {
        if declared.len() != self.names.len() {
            return Err(format!(
                "model declares {} features {:?}, expected {} {:?}",
                declared.len(),
                declared,
                self.names.len(),
                self.names
            ));
        }

        let mismatch = self
            .names
            .iter()
            .zip(declared)
            .enumerate()
            .find(|(_, (expected, actual))| !expected.eq_ignore_ascii_case(actual.trim()));

        match mismatch {
            Some((index, (expected, actual))) => Err(format!(
                "feature {} is '{}', expected '{}'",
                index, actual, expected
            )),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_schema_accepts_training_column_case() {
        let schema = FeatureSchema::traffic();
        assert!(schema.check(&names(&["hour", "month", "X", "Y"])).is_ok());
    }

    #[test]
    fn test_schema_rejects_reordered_features() {
        let schema = FeatureSchema::traffic();
        let err = schema.check(&names(&["month", "hour", "x", "y"])).unwrap_err();
        assert!(err.contains("feature 0 is 'month'"));
    }

    #[test]
    fn test_schema_rejects_wrong_width() {
        let schema = FeatureSchema::traffic();
        let err = schema.check(&names(&["hour", "month", "x"])).unwrap_err();
        assert!(err.contains("declares 3 features"));
    }
}
