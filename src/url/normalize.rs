use crate::ClientError;

/// Scheme prefixed to crawl targets that do not carry one
pub const DEFAULT_SCHEME_PREFIX: &str = "https://";

/// Schemes accepted as already present on a crawl target
const KNOWN_SCHEME_PREFIXES: &[&str] = &["http://", "https://"];

/// Message shown when a crawl is submitted with nothing to crawl
pub const EMPTY_TARGET_MESSAGE: &str = "Please enter a domain to crawl";

/// Normalizes user input into the URL sent with a crawl request
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace
/// 2. Reject empty input
/// 3. Keep an existing `http://` or `https://` prefix (case-insensitive)
/// 4. Otherwise prefix `https://`
///
/// This is a pure string transform; the result is not parsed or resolved.
///
/// # Examples
///
/// ```
/// use sumi_lens::url::normalize_crawl_target;
///
/// assert_eq!(normalize_crawl_target("example.com").unwrap(), "https://example.com");
/// assert_eq!(normalize_crawl_target("http://example.com").unwrap(), "http://example.com");
/// assert!(normalize_crawl_target("   ").is_err());
/// ```
pub fn normalize_crawl_target(input: &str) -> Result<String, ClientError> {
    let target = input.trim();

    if target.is_empty() {
        return Err(ClientError::Validation(EMPTY_TARGET_MESSAGE.to_string()));
    }

    if has_known_scheme(target) {
        Ok(target.to_string())
    } else {
        Ok(format!("{}{}", DEFAULT_SCHEME_PREFIX, target))
    }
}

/// Returns true if the input already starts with an HTTP(S) scheme
pub fn has_known_scheme(input: &str) -> bool {
    KNOWN_SCHEME_PREFIXES.iter().any(|prefix| {
        input
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}
