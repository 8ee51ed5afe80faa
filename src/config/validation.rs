use crate::config::types::{BackendConfig, ClientConfig, Config, PagesConfig};
use crate::url::parse_base_url;
use crate::ConfigError;

/// Largest `limit` the backend accepts on `/api/pages`
pub const MAX_PAGE_SIZE: u32 = 100;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_backend_config(&config.backend)?;
    validate_client_config(&config.client)?;
    validate_pages_config(&config.pages)?;
    Ok(())
}

/// Validates the backend location
fn validate_backend_config(config: &BackendConfig) -> Result<(), ConfigError> {
    parse_base_url(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;
    Ok(())
}

/// Validates client identification
fn validate_client_config(config: &ClientConfig) -> Result<(), ConfigError> {
    // Name: non-empty, alphanumeric + hyphens only
    if config.name.is_empty() {
        return Err(ConfigError::Validation(
            "client name cannot be empty".to_string(),
        ));
    }

    if !config.name.chars().all(|c| c.is_alphanumeric() || c == '-') {
        return Err(ConfigError::Validation(format!(
            "client name must contain only alphanumeric characters and hyphens, got '{}'",
            config.name
        )));
    }

    if config.version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "client version cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates pagination settings
fn validate_pages_config(config: &PagesConfig) -> Result<(), ConfigError> {
    if config.page_size < 1 || config.page_size > MAX_PAGE_SIZE {
        return Err(ConfigError::Validation(format!(
            "page-size must be between 1 and {}, got {}",
            MAX_PAGE_SIZE, config.page_size
        )));
    }

    Ok(())
}
