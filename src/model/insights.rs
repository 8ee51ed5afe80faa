//! Insights field decoding
//!
//! The backend stores insights as text and may return them either as a JSON
//! array of strings or as a single string holding that array serialized. The
//! ambiguity is resolved here, once, so that the view model only ever carries
//! a plain sequence.

use crate::model::anomaly::FieldAnomaly;
use serde_json::Value;

/// Field name used when reporting anomalies
const FIELD: &str = "insights";

/// Shape of the raw `insights` value as received
#[derive(Debug, Clone, PartialEq)]
pub enum InsightsField {
    /// Absent or `null`
    Missing,
    /// Already a sequence of strings
    Sequence(Vec<String>),
    /// A string expected to hold a serialized sequence
    Encoded(String),
    /// Any other JSON value
    Unrecognized(Value),
}

impl InsightsField {
    /// Classifies a raw JSON value
    pub fn classify(value: Option<Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Missing,
            Some(Value::String(s)) => Self::Encoded(s),
            Some(Value::Array(items)) => match strings_only(&items) {
                Some(sequence) => Self::Sequence(sequence),
                None => Self::Unrecognized(Value::Array(items)),
            },
            Some(other) => Self::Unrecognized(other),
        }
    }

    /// Resolves the field into its canonical sequence form
    ///
    /// A blank or `null` encoded string is treated as an empty sequence. Any value that
    /// cannot be read as a sequence of strings yields an anomaly; callers fall
    /// back to an empty sequence and keep the rest of the record.
    pub fn resolve(self) -> Result<Vec<String>, FieldAnomaly> {
        match self {
            Self::Missing => Ok(Vec::new()),
            Self::Sequence(sequence) => Ok(sequence),
            Self::Encoded(text) if text.trim().is_empty() => Ok(Vec::new()),
            Self::Encoded(text) => serde_json::from_str::<Option<Vec<String>>>(&text)
                .map(Option::unwrap_or_default)
                .map_err(|e| FieldAnomaly::new(FIELD, format!("not a serialized list: {}", e))),
            Self::Unrecognized(value) => Err(FieldAnomaly::new(
                FIELD,
                format!("unexpected {} value", json_kind(&value)),
            )),
        }
    }
}

/// Decodes a raw `insights` value, reporting (but tolerating) malformed input
pub fn normalize_insights(value: Option<Value>) -> (Vec<String>, Option<FieldAnomaly>) {
    match InsightsField::classify(value).resolve() {
        Ok(insights) => (insights, None),
        Err(anomaly) => (Vec::new(), Some(anomaly)),
    }
}

fn strings_only(items: &[Value]) -> Option<Vec<String>> {
    items
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}

/// Short name of a JSON value's type, for messages
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
