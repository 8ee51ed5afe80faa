//! Configuration module for Sumi-Lens
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! A configuration file is optional: every section has defaults that point at a
//! backend on the local machine.
//!
//! # Example
//!
//! ```no_run
//! use sumi_lens::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("lens.toml")).unwrap();
//! println!("Reading results from: {}", config.backend.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    BackendConfig, ClientConfig, Config, PagesConfig, DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE,
};
pub use validation::{validate, MAX_PAGE_SIZE};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
