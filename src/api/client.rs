//! HTTP client for the crawl/analysis backend
//!
//! This module handles all HTTP requests made by the client, including:
//! - Building the HTTP client with a proper user agent string
//! - Reading single records and record lists
//! - Submitting crawl requests
//! - Error classification (transport, HTTP status, decode)
//!
//! No request is retried and no timeout is applied: an unresponsive backend
//! leaves the caller waiting.

use crate::api::wire::{
    CrawlReceipt, CrawlRequest, ErrorBody, HealthStatus, PageBatch, RawPageBatch,
};
use crate::config::{ClientConfig, Config, MAX_PAGE_SIZE};
use crate::model::{decode_page, decode_summaries, PageId, PageSummary, PageView};
use crate::url::{endpoint, parse_base_url};
use crate::{ClientError, LensError};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use url::Url;

/// Client for the backend API
///
/// Cloning is cheap; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    /// Creates a client from the loaded configuration
    pub fn new(config: &Config) -> Result<Self, LensError> {
        let base_url = parse_base_url(&config.backend.base_url)?;
        let http = build_http_client(&config.client)?;
        Ok(Self { http, base_url })
    }

    /// Creates a client for an explicit base URL with default identification
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sumi_lens::ApiClient;
    ///
    /// let client = ApiClient::with_base_url("http://127.0.0.1:8000").unwrap();
    /// ```
    pub fn with_base_url(base_url: &str) -> Result<Self, LensError> {
        let base_url = parse_base_url(base_url)?;
        let http = build_http_client(&ClientConfig::default())?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches and normalizes one page record (`GET /api/page/{id}`)
    pub async fn fetch_page(&self, id: &PageId) -> Result<PageView, ClientError> {
        let url = self.endpoint(&["api", "page", id.as_str()])?;
        let body = send(self.http.get(url)).await?;
        decode_page(&body)
    }

    /// Fetches the navigation list (`GET /api/pages/list`)
    pub async fn list_pages(&self) -> Result<Vec<PageSummary>, ClientError> {
        let url = self.endpoint(&["api", "pages", "list"])?;
        let body = send(self.http.get(url)).await?;
        decode_summaries(&body)
    }

    /// Fetches a window of full records (`GET /api/pages?limit&offset`)
    ///
    /// `limit` must be within 1-100; anything else is rejected locally.
    pub async fn list_pages_window(&self, limit: u32, offset: u32) -> Result<PageBatch, ClientError> {
        if limit < 1 || limit > MAX_PAGE_SIZE {
            return Err(ClientError::Validation(format!(
                "limit must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, limit
            )));
        }

        let url = self.endpoint(&["api", "pages"])?;
        let request = self
            .http
            .get(url)
            .query(&[("limit", limit), ("offset", offset)]);
        let raw: RawPageBatch = send_json(request).await?;
        Ok(raw.into())
    }

    /// Submits a crawl request (`POST /api/crawl`)
    pub async fn submit_crawl(&self, request: &CrawlRequest) -> Result<CrawlReceipt, ClientError> {
        let url = self.endpoint(&["api", "crawl"])?;
        send_json(self.http.post(url).json(request)).await
    }

    /// Checks backend liveness (`GET /health`)
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let url = self.endpoint(&["health"])?;
        send_json(self.http.get(url)).await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        endpoint(&self.base_url, segments).map_err(|e| ClientError::Validation(e.to_string()))
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use sumi_lens::api::build_http_client;
/// use sumi_lens::config::ClientConfig;
///
/// let client = build_http_client(&ClientConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &ClientConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Sends a request and returns the body of a successful response
///
/// # Error Mapping
///
/// | Condition | Result |
/// |-----------|--------|
/// | Connection refused, DNS, TLS | `Transport` |
/// | Non-2xx status | `Http` with status and optional body message |
/// | Body could not be read | `Transport` |
async fn send(request: RequestBuilder) -> Result<String, ClientError> {
    let response = request.send().await.map_err(classify_transport)?;
    let status = response.status();
    let url = response.url().clone();
    let body = response.text().await.map_err(classify_transport)?;

    if !status.is_success() {
        let message = ErrorBody::message_from(&body);
        tracing::debug!(%url, status = status.as_u16(), ?message, "Backend returned error status");
        return Err(ClientError::Http {
            status: status.as_u16(),
            message,
        });
    }

    tracing::trace!(%url, bytes = body.len(), "Received response");
    Ok(body)
}

/// Sends a request and decodes a successful JSON response
async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
    let body = send(request).await?;
    serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Maps a transport-level failure to a client error
fn classify_transport(error: reqwest::Error) -> ClientError {
    if error.is_connect() {
        ClientError::Transport(format!("Connection refused: {}", error))
    } else if error.is_timeout() {
        ClientError::Transport("Request timeout".to_string())
    } else {
        ClientError::Transport(error.to_string())
    }
}
