use crate::UrlError;
use url::Url;

/// Parses and checks the backend base URL
///
/// The base must be an absolute HTTP(S) URL with a host. It may carry a path
/// prefix (for a backend mounted below the root); API segments are appended
/// to that prefix.
pub fn parse_base_url(base: &str) -> Result<Url, UrlError> {
    let url = Url::parse(base).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingDomain);
    }

    Ok(url)
}

/// Builds an endpoint URL by appending path segments to the base
///
/// Segments are percent-encoded individually, so an opaque identifier such as
/// `a/b` stays a single segment.
///
/// # Examples
///
/// ```
/// use sumi_lens::url::{endpoint, parse_base_url};
///
/// let base = parse_base_url("http://127.0.0.1:8000").unwrap();
/// let url = endpoint(&base, &["api", "page", "42"]).unwrap();
/// assert_eq!(url.as_str(), "http://127.0.0.1:8000/api/page/42");
/// ```
pub fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, UrlError> {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);

    url.path_segments_mut()
        .map_err(|_| UrlError::CannotBeABase(base.to_string()))?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}
