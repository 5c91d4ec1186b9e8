use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

/// A form field that may arrive as a JSON number, a string, or null
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Null,
}

impl FieldValue {
    /// Interpret the field as a non-negative integer answer
    pub fn as_answer(&self) -> Option<u8> {
        match self {
            FieldValue::Number(n) if n.fract() == 0.0 && *n >= 0.0 && *n <= u8::MAX as f64 => {
                Some(*n as u8)
            }
            FieldValue::Text(s) => s.trim().parse::<u8>().ok(),
            _ => None,
        }
    }

    /// Interpret the field as a decimal number
    pub fn as_decimal(&self) -> Option<f64> {
        let value = match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => s.trim().parse::<f64>().ok(),
            FieldValue::Null => None,
        };
        value.filter(|v| !v.is_nan())
    }
}

/// Request to score a questionnaire and match it against the dataset
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AssessmentRequest {
    /// Answers keyed `q1`..`qN`
    #[serde(default)]
    pub answers: HashMap<String, FieldValue>,
    #[validate(length(max = 32))]
    #[serde(default)]
    pub gender: Option<String>,
    #[validate(length(max = 32))]
    #[serde(default)]
    pub age: Option<String>,
}

/// Request for tourism recommendations
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[validate(length(max = 100))]
    #[serde(default)]
    pub category: String,
    #[validate(length(max = 100))]
    #[serde(default)]
    pub city: String,
    #[serde(default, alias = "max_price", rename = "maxPrice")]
    pub max_price: Option<FieldValue>,
}

impl RecommendRequest {
    /// Price ceiling, with anything missing or unparseable meaning unbounded
    pub fn price_ceiling(&self) -> Option<f64> {
        self.max_price.as_ref().and_then(FieldValue::as_decimal)
    }
}
