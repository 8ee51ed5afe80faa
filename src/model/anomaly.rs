use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

/// A field that could not be decoded but did not fail the record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAnomaly {
    /// Name of the payload field
    pub field: &'static str,
    /// What was wrong with it
    pub reason: String,
}

impl FieldAnomaly {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FieldAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Decodes an optional structured field that may arrive serialized as a string
///
/// `null`, absent and blank-string values decode to `None`. A string is parsed
/// as JSON before decoding; any other value is decoded directly.
pub(crate) fn decode_embedded<T: DeserializeOwned>(
    field: &'static str,
    value: Option<Value>,
) -> Result<Option<T>, FieldAnomaly> {
    let value = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(text)) if text.trim().is_empty() => return Ok(None),
        Some(Value::String(text)) => serde_json::from_str::<Value>(&text)
            .map_err(|e| FieldAnomaly::new(field, format!("not serialized JSON: {}", e)))?,
        Some(value) => value,
    };

    if value.is_null() {
        return Ok(None);
    }

    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| FieldAnomaly::new(field, e.to_string()))
}

/// Decodes `null` the same way as an absent key
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
