//! Backend API access
//!
//! This module contains the HTTP client and the request/response bodies of
//! the crawl/analysis backend:
//! - `GET /api/page/{id}` - one full page record
//! - `GET /api/pages/list` - navigation list
//! - `GET /api/pages` - paginated full records
//! - `POST /api/crawl` - crawl submission
//! - `GET /health` - liveness

mod client;
mod wire;

pub use client::{build_http_client, ApiClient};
pub use wire::{CrawlReceipt, CrawlRequest, HealthStatus, PageBatch, QueryType, RawPageBatch};
