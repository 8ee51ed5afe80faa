use serde::Deserialize;

/// Default backend address used when no configuration file is given
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Default number of records requested per page of `/api/pages`
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Main configuration structure for Sumi-Lens
///
/// Every section is optional; missing sections fall back to their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub pages: PagesConfig,
}

/// Location of the crawl/analysis backend
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Root URL of the backend; API paths are appended to it
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,
}

/// Client identification sent with every request
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Name used in the User-Agent header
    #[serde(default = "default_client_name")]
    pub name: String,

    /// Version used in the User-Agent header
    #[serde(default = "default_client_version")]
    pub version: String,
}

/// Paginated listing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PagesConfig {
    /// Default `limit` for paginated page listings (1-100)
    #[serde(rename = "page-size", default = "default_page_size")]
    pub page_size: u32,
}

impl ClientConfig {
    /// Formats the User-Agent header value
    pub fn user_agent(&self) -> String {
        format!("{}/{}", self.name, self.version)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            name: default_client_name(),
            version: default_client_version(),
        }
    }
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_client_name() -> String {
    env!("CARGO_PKG_NAME").to_string()
}

fn default_client_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}
