use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Reads, parses and validates a TOML configuration file
///
/// Missing sections and keys fall back to their defaults, so an empty file
/// yields [`Config::default`].
///
/// ```no_run
/// use std::path::Path;
/// use sumi_lens::config::load_config;
///
/// let config = load_config(Path::new("lens.toml")).unwrap();
/// println!("Backend: {}", config.backend.base_url);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    load_config_with_hash(path).map(|(config, _)| config)
}

/// Parses and validates configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Hex-encoded SHA-256 digest of a configuration file
///
/// Logged at startup so runs against different backends can be told apart.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read(path)?;
    Ok(digest(&content))
}

/// Loads a configuration along with the digest of the exact bytes parsed
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    Ok((config, digest(content.as_bytes())))
}

fn digest(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content))
}
