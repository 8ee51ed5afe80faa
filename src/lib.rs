//! Sumi-Lens: a reader for crawl and analysis results
//!
//! This crate implements the client side of a crawl/analysis service: it lists
//! previously crawled pages, fetches and normalizes individual page records, and
//! submits new crawl requests. Each of those runs as an independent request
//! lifecycle owned by a single component.

pub mod api;
pub mod components;
pub mod config;
pub mod model;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Sumi-Lens operations
#[derive(Debug, Error)]
pub enum LensError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors produced by a single request lifecycle
///
/// Values of this type are stored inside [`state::FetchState`], so every variant
/// carries owned text rather than the underlying transport error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Rejected locally before any network call
    #[error("{0}")]
    Validation(String),

    /// The backend could not be reached
    #[error("Network error: {0}")]
    Transport(String),

    /// The backend answered with a non-success status
    #[error("Error: {status}")]
    Http { status: u16, message: Option<String> },

    /// The response body was not the expected JSON
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Returns the message the backend attached to an HTTP error, if any
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Http {
                message: Some(message),
                ..
            } => Some(message.as_str()),
            _ => None,
        }
    }
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,

    #[error("URL cannot carry a path: {0}")]
    CannotBeABase(String),
}

// Re-export commonly used types
pub use api::ApiClient;
pub use components::{ListFeed, PageShell, RecordFetcher, SubmissionController};
pub use config::Config;
pub use model::{PageId, PageSummary, PageView};
pub use state::{FetchState, SubmissionState};
pub use url::normalize_crawl_target;
