use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;
use std::fmt;

/// Text shown for a crawl time that could not be read
pub const INVALID_DATE: &str = "Invalid Date";

/// Formats accepted for timestamps without an offset (read as UTC)
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// When a page was crawled
///
/// Malformed or missing timestamps are kept rather than failing the record;
/// they display as [`INVALID_DATE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlTimestamp {
    Valid(DateTime<Utc>),
    Invalid(String),
}

impl CrawlTimestamp {
    /// Parses a raw `crawled_at` value
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::String(text)) => Self::parse(text),
            Some(Value::Null) | None => Self::Invalid(String::new()),
            Some(other) => Self::Invalid(other.to_string()),
        }
    }

    /// Parses an RFC 3339 timestamp, or an ISO 8601 one without offset
    pub fn parse(text: &str) -> Self {
        let text = text.trim();

        if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
            return Self::Valid(parsed.with_timezone(&Utc));
        }

        NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
            .map(|naive| Self::Valid(naive.and_utc()))
            .unwrap_or_else(|| Self::Invalid(text.to_string()))
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    pub fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::Valid(at) => Some(at),
            Self::Invalid(_) => None,
        }
    }
}

impl fmt::Display for CrawlTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid(at) => write!(f, "{}", at.format("%Y-%m-%d %H:%M:%S UTC")),
            Self::Invalid(_) => f.write_str(INVALID_DATE),
        }
    }
}
