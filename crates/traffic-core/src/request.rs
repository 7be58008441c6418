//! Prediction inputs: the untyped wire shape and the coerced domain type.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::{FeatureVector, PredictionError};

/// Prediction input exactly as it arrived, before any numeric coercion.
///
/// Fields are kept as raw JSON so that a bad value is classified as
/// invalid input by the handler rather than rejected by the decoder.
/// Only a JSON object decodes; fields are matched by name, never by position.
#[derive(Debug, Clone, Default)]
pub struct RawPredictionRequest {
    pub hour: Option<Value>,
    pub month: Option<Value>,
    pub x: Option<Value>,
    pub y: Option<Value>,
}

impl<'de> Deserialize<'de> for RawPredictionRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = Map::<String, Value>::deserialize(deserializer)?;
        let mut take = |name: &str| fields.remove(name).filter(|v| !v.is_null());

        Ok(Self {
            hour: take("hour"),
            month: take("month"),
            x: take("x"),
            y: take("y"),
        })
    }
}

/// A validated prediction input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// Hour of the day, expected 0-23.
    pub hour: i64,
    /// Month, expected 1-12.
    pub month: i64,
    /// Longitude.
    pub x: f64,
    /// Latitude.
    pub y: f64,
}

impl PredictionRequest {
    /// Whether `hour` and `month` fall in their calendar domains.
    ///
    /// Out-of-domain values are still served.
    pub fn in_expected_domain(&self) -> bool {
        (0..=23).contains(&self.hour) && (1..=12).contains(&self.month)
    }

    pub fn features(&self) -> FeatureVector {
        FeatureVector::new([self.hour as f64, self.month as f64, self.x, self.y])
    }
}

impl TryFrom<&RawPredictionRequest> for PredictionRequest {
    type Error = PredictionError;

    fn try_from(raw: &RawPredictionRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            hour: coerce_integer("hour", raw.hour.as_ref())?,
            month: coerce_integer("month", raw.month.as_ref())?,
            x: coerce_float("x", raw.x.as_ref())?,
            y: coerce_float("y", raw.y.as_ref())?,
        })
    }
}

fn invalid(field: &str, message: impl std::fmt::Display) -> PredictionError {
    PredictionError::InvalidInput(format!("{}: {}", field, message))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn coerce_float(field: &str, value: Option<&Value>) -> Result<f64, PredictionError> {
    let value = value.ok_or_else(|| invalid(field, "field required"))?;

    let number = match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| invalid(field, format!("number {} is not representable as a float", n)))?,
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid(field, format!("could not convert string to float: '{}'", s)))?,
        other => {
            return Err(invalid(field, format!("expected a number, got {}", json_kind(other))));
        }
    };

    if !number.is_finite() {
        return Err(invalid(field, "value must be finite"));
    }
    Ok(number)
}

fn coerce_integer(field: &str, value: Option<&Value>) -> Result<i64, PredictionError> {
    if let Some(Value::Number(n)) = value {
        if let Some(i) = n.as_i64() {
            return Ok(i);
        }
    }
    if let Some(Value::String(s)) = value {
        if let Ok(i) = s.trim().parse::<i64>() {
            return Ok(i);
        }
    }

    let number = coerce_float(field, value)?;
    if number.fract() != 0.0 {
        return Err(invalid(field, format!("expected an integer, got {}", number)));
    }
    if number < i64::MIN as f64 || number >= i64::MAX as f64 {
        return Err(invalid(field, format!("integer {} is out of range", number)));
    }
    Ok(number as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawPredictionRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_positional_array_body_does_not_decode() {
        let err = serde_json::from_value::<RawPredictionRequest>(json!([8, 6, -73.99, 40.73]));
        assert!(err.is_err());
        assert!(serde_json::from_value::<RawPredictionRequest>(json!("8,6,1,1")).is_err());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let body = raw(json!({"hour": 8, "month": 6, "x": 1.0, "y": 2.0, "speed": 40}));
        assert!(PredictionRequest::try_from(&body).is_ok());
    }

    #[test]
    fn test_numeric_request() {
        let req = PredictionRequest::try_from(&raw(json!({
            "hour": 8, "month": 6, "x": -73.99, "y": 40.73
        })))
        .unwrap();

        assert_eq!(req.hour, 8);
        assert_eq!(req.month, 6);
        assert_eq!(req.x, -73.99);
        assert_eq!(req.y, 40.73);
        assert!(req.in_expected_domain());
    }

    #[test]
    fn test_numeric_strings_are_coerced() {
        let req = PredictionRequest::try_from(&raw(json!({
            "hour": "17", "month": " 3 ", "x": "-118.24", "y": 34
        })))
        .unwrap();

        assert_eq!(req.hour, 17);
        assert_eq!(req.month, 3);
        assert_eq!(req.x, -118.24);
        assert_eq!(req.y, 34.0);
    }

    #[test]
    fn test_integral_float_hour_is_accepted() {
        let req = PredictionRequest::try_from(&raw(json!({
            "hour": 8.0, "month": "6.0", "x": 1, "y": 1
        })))
        .unwrap();
        assert_eq!(req.hour, 8);
        assert_eq!(req.month, 6);
    }

    #[test]
    fn test_non_numeric_string_is_invalid() {
        let err = PredictionRequest::try_from(&raw(json!({
            "hour": "bad", "month": 6, "x": 1.0, "y": 1.0
        })))
        .unwrap_err();

        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("hour"));
        assert!(err.to_string().contains("'bad'"));
    }

    #[test]
    fn test_fractional_month_is_invalid() {
        let err = PredictionRequest::try_from(&raw(json!({
            "hour": 8, "month": 6.5, "x": 1.0, "y": 1.0
        })))
        .unwrap_err();
        assert_eq!(
            err,
            PredictionError::InvalidInput("month: expected an integer, got 6.5".into())
        );
    }

    #[test]
    fn test_missing_and_null_fields_are_invalid() {
        let err = PredictionRequest::try_from(&raw(json!({
            "hour": 8, "month": 6, "x": 1.0
        })))
        .unwrap_err();
        assert_eq!(err, PredictionError::InvalidInput("y: field required".into()));

        let err = PredictionRequest::try_from(&raw(json!({
            "hour": 8, "month": 6, "x": null, "y": 1.0
        })))
        .unwrap_err();
        assert_eq!(err, PredictionError::InvalidInput("x: field required".into()));
    }

    #[test]
    fn test_wrong_json_types_are_invalid() {
        for bad in [json!(true), json!([1]), json!({"v": 1})] {
            let err = PredictionRequest::try_from(&raw(json!({
                "hour": 8, "month": 6, "x": bad, "y": 1.0
            })))
            .unwrap_err();
            assert!(err.is_invalid_input(), "accepted {:?}", err);
        }
    }

    #[test]
    fn test_non_finite_strings_are_invalid() {
        let err = PredictionRequest::try_from(&raw(json!({
            "hour": 8, "month": 6, "x": "inf", "y": "NaN"
        })))
        .unwrap_err();
        assert_eq!(err, PredictionError::InvalidInput("x: value must be finite".into()));
    }

    #[test]
    fn test_out_of_domain_values_still_parse() {
        let req = PredictionRequest::try_from(&raw(json!({
            "hour": 25, "month": 0, "x": 0.0, "y": 0.0
        })))
        .unwrap();
        assert!(!req.in_expected_domain());
    }

    #[test]
    fn test_features_follow_schema_order() {
        let req = PredictionRequest { hour: 8, month: 6, x: -73.99, y: 40.73 };
        assert_eq!(req.features().as_slice(), &[8.0, 6.0, -73.99, 40.73]);
    }
}
