use crate::model::anomaly::{decode_embedded, null_as_default, FieldAnomaly};
use crate::model::insights::normalize_insights;
use crate::model::links::Links;
use crate::model::metadata::Metadata;
use crate::model::page_id::PageId;
use crate::model::timestamp::CrawlTimestamp;
use crate::ClientError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Entry of the navigation list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSummary {
    pub id: PageId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
}

/// A page record exactly as the backend sends it
///
/// Only `id` is required. Fields whose shape varies between backend versions
/// are kept as raw JSON until [`PageView::from_raw`] resolves them.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPageRecord {
    pub id: PageId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub crawled_at: Option<Value>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sentiment: Option<String>,
    #[serde(default)]
    pub insights: Option<Value>,
    #[serde(default)]
    pub links: Option<Value>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

/// Display-ready view of one crawled page
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub id: PageId,
    pub url: String,
    pub title: String,
    pub crawled_at: CrawlTimestamp,
    /// Markdown body, passed through unrendered
    pub content: String,
    pub summary: String,
    pub category: Option<String>,
    pub sentiment: Option<String>,
    /// Always a decoded sequence, possibly empty
    pub insights: Vec<String>,
    /// `None` when the backend sent no links at all
    pub links: Option<Links>,
    /// `None` when the backend sent no metadata at all
    pub metadata: Option<Metadata>,
    /// Fields that were malformed and replaced by their empty form
    pub anomalies: Vec<FieldAnomaly>,
}

impl PageView {
    /// Normalizes a raw record
    ///
    /// Never fails: malformed `insights`, `links` or `metadata` are recorded in
    /// [`PageView::anomalies`] and replaced by their empty form.
    pub fn from_raw(raw: RawPageRecord) -> Self {
        let mut anomalies = Vec::new();

        let (insights, insights_anomaly) = normalize_insights(raw.insights);
        anomalies.extend(insights_anomaly);

        let links = decode_embedded::<Links>("links", raw.links).unwrap_or_else(|anomaly| {
            anomalies.push(anomaly);
            None
        });

        let metadata =
            decode_embedded::<Metadata>("metadata", raw.metadata).unwrap_or_else(|anomaly| {
                anomalies.push(anomaly);
                None
            });

        Self {
            id: raw.id,
            url: raw.url,
            title: raw.title,
            crawled_at: CrawlTimestamp::from_value(raw.crawled_at.as_ref()),
            content: raw.content.unwrap_or_default(),
            summary: raw.summary.unwrap_or_default(),
            category: non_blank(raw.category),
            sentiment: non_blank(raw.sentiment),
            insights,
            links,
            metadata,
            anomalies,
        }
    }

    /// Projects the view onto its navigation-list entry
    pub fn summary_entry(&self) -> PageSummary {
        PageSummary {
            id: self.id.clone(),
            title: self.title.clone(),
        }
    }

    pub fn has_anomalies(&self) -> bool {
        !self.anomalies.is_empty()
    }
}

/// Decodes and normalizes a `GET /api/page/{id}` response body
///
/// Fails only when the body is not a JSON object carrying an `id`; field-level
/// problems are reported on the returned view instead.
pub fn decode_page(body: &str) -> Result<PageView, ClientError> {
    let raw: RawPageRecord =
        serde_json::from_str(body).map_err(|e| ClientError::Decode(e.to_string()))?;
    Ok(PageView::from_raw(raw))
}

/// Decodes a `GET /api/pages/list` response body, preserving order
pub fn decode_summaries(body: &str) -> Result<Vec<PageSummary>, ClientError> {
    serde_json::from_str(body).map_err(|e| ClientError::Decode(e.to_string()))
}

fn non_blank(label: Option<String>) -> Option<String> {
    label.filter(|text| !text.trim().is_empty())
}
