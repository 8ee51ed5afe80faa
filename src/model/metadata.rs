use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Placeholder shown for empty metadata values
pub const EMPTY_VALUE: &str = "-";

/// Page metadata as reported by the crawler
///
/// Keys are unique and kept in the order the backend sent them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(Map<String, Value>);

impl Metadata {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Iterates over `(key, display value)` pairs in payload order
    pub fn entries(&self) -> impl Iterator<Item = (&str, String)> + '_ {
        self.0
            .iter()
            .map(|(key, value)| (key.as_str(), display_value(value)))
    }
}

impl From<Map<String, Value>> for Metadata {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Renders a metadata value as display text
///
/// Strings are shown as-is, other primitives in their JSON form, and nested
/// values as compact JSON. Null and empty strings render as [`EMPTY_VALUE`].
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => EMPTY_VALUE.to_string(),
        Value::String(s) if s.is_empty() => EMPTY_VALUE.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
