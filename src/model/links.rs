use crate::model::anomaly::null_as_default;
use serde::{Deserialize, Serialize};

/// A link extracted from a crawled page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Target URL
    #[serde(default, deserialize_with = "null_as_default")]
    pub href: String,

    /// Anchor text, when the crawler captured any
    #[serde(default)]
    pub text: Option<String>,

    /// Domain the link was found on
    #[serde(default)]
    pub base_domain: Option<String>,
}

impl Link {
    /// Text to show for the link: the anchor text, or the target when blank
    pub fn display_text(&self) -> &str {
        match self.text.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => text,
            _ => &self.href,
        }
    }

    /// Origin-domain label, if present and non-blank
    pub fn origin(&self) -> Option<&str> {
        self.base_domain
            .as_deref()
            .map(str::trim)
            .filter(|domain| !domain.is_empty())
    }
}

/// Links of a page, split by whether they stay on the crawled site
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    #[serde(default, deserialize_with = "null_as_default")]
    pub internal: Vec<Link>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub external: Vec<Link>,
}

impl Links {
    pub fn is_empty(&self) -> bool {
        self.internal.is_empty() && self.external.is_empty()
    }

    pub fn len(&self) -> usize {
        self.internal.len() + self.external.len()
    }
}
