//! View model for crawled pages
//!
//! Raw backend payloads are decoded here and normalized into [`PageView`], the
//! only shape presentation code ever sees.
//!
//! # Components
//!
//! - `PageId`: opaque record identifier (integer or string on the wire)
//! - `PageView` / `PageSummary`: the record and its navigation-list projection
//! - `InsightsField`: resolves insights sent either as a list or as serialized text
//! - `Links`, `Metadata`, `CrawlTimestamp`: tolerant decoders for optional fields

mod anomaly;
mod insights;
mod links;
mod metadata;
mod page;
mod page_id;
mod timestamp;

pub use anomaly::FieldAnomaly;
pub use insights::{normalize_insights, InsightsField};
pub use links::{Link, Links};
pub use metadata::{display_value, Metadata, EMPTY_VALUE};
pub use page::{decode_page, decode_summaries, PageSummary, PageView, RawPageRecord};
pub use page_id::PageId;
pub use timestamp::{CrawlTimestamp, INVALID_DATE};
