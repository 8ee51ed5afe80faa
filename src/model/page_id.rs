use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Opaque identifier of a crawled page
///
/// The backend assigns integer keys today, but the client never does
/// arithmetic on them: identifiers are kept as text and only checked for
/// presence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    /// Creates an identifier from user or route input
    ///
    /// Returns `None` for empty or whitespace-only input.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PageId {
    /// Accepts a JSON integer or string; blank strings are rejected like in
    /// [`PageId::new`]
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = match Value::deserialize(deserializer)? {
            Value::Number(n) => n.to_string(),
            Value::String(s) => s,
            other => {
                return Err(D::Error::custom(format!(
                    "expected a page id, got {}",
                    other
                )))
            }
        };

        PageId::new(&raw).ok_or_else(|| D::Error::custom("page id is blank"))
    }
}
