//! Request and response bodies of the backend API

use crate::model::{PageView, RawPageRecord};
use serde::{Deserialize, Serialize};

/// Kind of crawl requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryType {
    /// Crawl scoped to the domain of the query URL
    Domain,
}

/// Body of `POST /api/crawl`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlRequest {
    pub query: String,
    pub query_type: QueryType,
}

impl CrawlRequest {
    /// Builds a domain-scoped crawl request for an already normalized URL
    pub fn domain(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            query_type: QueryType::Domain,
        }
    }
}

/// Successful response of `POST /api/crawl`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CrawlReceipt {
    /// Number of pages stored by the crawl
    pub page_count: u64,
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of `GET /api/pages`
#[derive(Debug, Clone, Deserialize)]
pub struct RawPageBatch {
    #[serde(default)]
    pub pages: Vec<RawPageRecord>,
    #[serde(default)]
    pub total: u64,
}

/// One window of full page records
#[derive(Debug, Clone, PartialEq)]
pub struct PageBatch {
    pub pages: Vec<PageView>,
    /// Backend's count estimate (offset + returned pages)
    pub total: u64,
}

impl From<RawPageBatch> for PageBatch {
    fn from(raw: RawPageBatch) -> Self {
        Self {
            pages: raw.pages.into_iter().map(PageView::from_raw).collect(),
            total: raw.total,
        }
    }
}

/// Response of `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

/// Error body of a non-success response
///
/// The backend sets `message` on crawl failures; framework-generated errors
/// carry `detail` instead, which may be a string or a list of validation
/// problems.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Extracts the most specific human-readable message, if any
    pub fn into_message(self) -> Option<String> {
        let detail = match self.detail {
            Some(serde_json::Value::String(detail)) => Some(detail),
            _ => None,
        };

        let non_blank = |message: &String| !message.trim().is_empty();
        self.message.filter(non_blank).or(detail.filter(non_blank))
    }

    /// Parses an error body, tolerating any shape
    pub fn message_from(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(ErrorBody::into_message)
    }
}
