//! URL handling module for Sumi-Lens
//!
//! This module turns user input into crawl targets and builds the backend
//! endpoint URLs the API client talks to.

mod endpoint;
mod normalize;

// Re-export main functions
pub use endpoint::{endpoint, parse_base_url};
pub use normalize::{
    has_known_scheme, normalize_crawl_target, DEFAULT_SCHEME_PREFIX, EMPTY_TARGET_MESSAGE,
};
