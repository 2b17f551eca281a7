//! URL parsing helpers for the vacancy guard and fetch logging.

/// Error type for URL parsing failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Parse an absolute http(s) URL.
///
/// Surrounding whitespace is ignored. Unlike a browser address bar, a
/// missing scheme is an error: vacancy links are always absolute.
pub fn parse_http_url(input: &str) -> Result<url::Url, UrlError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let parsed = url::Url::parse(trimmed).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }
}

/// Lowercased host of `input`, if it parses as an http(s) URL.
pub fn host_of(input: &str) -> Option<String> {
    parse_http_url(input)
        .ok()
        .and_then(|url| url.host_str().map(str::to_lowercase))
}
