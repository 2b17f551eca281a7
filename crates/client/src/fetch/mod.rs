//! HTTP fetch pipeline for vacancy pages.
//!
//! ### Browser Identity
//! - Every request carries a desktop browser User-Agent plus `Accept` and
//!   `Accept-Language` headers; the job boards serve captcha pages otherwise.
//!
//! ### Failure Policy
//! - One attempt per call, bounded by a fixed timeout. No retries.
//! - Non-2xx statuses, network errors, timeouts and oversized bodies all
//!   collapse into [`Error::FetchFailed`] carrying the cause.
//!
//! ### Limits
//! - Max body bytes: 5MB (configurable), checked against `Content-Length`
//!   and again after download.

pub mod url;

use async_trait::async_trait;
use jobparse_core::{AppConfig, Error};
use reqwest::{Client, header};
use std::time::{Duration, Instant};

pub use url::{UrlError, host_of, parse_http_url};

const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "ru-RU,ru;q=0.9,en;q=0.8";

/// Source of raw vacancy pages.
///
/// Site parsers only see this trait, so tests swap in an in-memory fetcher.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, Error>;
}

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: desktop Chrome)
    pub user_agent: String,

    /// Maximum response body size in bytes (default: 5MB)
    pub max_bytes: usize,

    /// Request timeout (default: 20s)
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self { user_agent: config.user_agent.clone(), max_bytes: config.max_bytes, timeout: config.timeout() }
    }
}

/// A downloaded page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// The final URL after redirects
    pub final_url: String,
    /// HTTP status code
    pub status: u16,
    /// Response body decoded as UTF-8 (lossy)
    pub body: String,
    /// Time taken to fetch in milliseconds
    pub fetch_ms: u64,
}

/// reqwest-backed [`PageFetcher`].
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static(ACCEPT));
        headers.insert(header::ACCEPT_LANGUAGE, header::HeaderValue::from_static(ACCEPT_LANGUAGE));

        let http = Client::builder()
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .timeout(config.timeout)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::FetchFailed { site: "-".into(), reason: format!("failed to build HTTP client: {e}") })?;

        Ok(Self { http, config })
    }

}

#[async_trait]
impl PageFetcher for FetchClient {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, Error> {
        let start = Instant::now();
        let site = host_of(url).unwrap_or_else(|| url.to_string());
        let failed = |reason: String| Error::FetchFailed { site: site.clone(), reason };

        let response = self.http.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                failed(format!("timed out after {}ms", self.config.timeout.as_millis()))
            } else {
                failed(format!("network error: {e}"))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(failed(format!("status {}", status.as_u16())));
        }

        if let Some(len) = response.content_length()
            && len as usize > self.config.max_bytes
        {
            return Err(failed(format!("{len} bytes exceeds {}", self.config.max_bytes)));
        }

        let final_url = response.url().to_string();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| failed(format!("failed to read response: {e}")))?;

        if bytes.len() > self.config.max_bytes {
            return Err(failed(format!("{} bytes exceeds {}", bytes.len(), self.config.max_bytes)));
        }

        let fetch_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(url, final_url = %final_url, fetch_ms, bytes = bytes.len(), "fetched page");

        Ok(FetchedPage {
            final_url,
            status: status.as_u16(),
            body: String::from_utf8_lossy(&bytes).into_owned(),
            fetch_ms,
        })
    }
}

/// In-memory fetcher that counts calls, for network-free tests.
#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub struct StaticFetcher {
        body: Result<String, String>,
        calls: AtomicUsize,
    }

    impl StaticFetcher {
        pub fn page(html: &str) -> Self {
            Self { body: Ok(html.to_string()), calls: AtomicUsize::new(0) }
        }

        pub fn failing(reason: &str) -> Self {
            Self { body: Err(reason.to_string()), calls: AtomicUsize::new(0) }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PageFetcher for StaticFetcher {
        async fn fetch(&self, url: &str) -> Result<FetchedPage, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.body {
                Ok(body) => Ok(FetchedPage {
                    final_url: url.to_string(),
                    status: 200,
                    body: body.clone(),
                    fetch_ms: 0,
                }),
                Err(reason) => Err(Error::FetchFailed {
                    site: host_of(url).unwrap_or_default(),
                    reason: reason.clone(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use testing::StaticFetcher;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
        assert_eq!(config.max_bytes, 5 * 1024 * 1024);
        assert_eq!(config.timeout, Duration::from_millis(20000));
    }

    #[test]
    fn test_fetch_config_from_app_config() {
        let app = AppConfig { user_agent: "test-agent".into(), timeout_ms: 1500, max_bytes: 1024, ..AppConfig::default() };
        let config = FetchConfig::from(&app);
        assert_eq!(config.user_agent, "test-agent");
        assert_eq!(config.timeout, Duration::from_millis(1500));
        assert_eq!(config.max_bytes, 1024);
    }

    #[tokio::test]
    async fn test_fetch_client_new() {
        assert!(FetchClient::new(FetchConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_static_fetcher_counts_calls() {
        let fetcher = StaticFetcher::page("<html></html>");
        let page = fetcher.fetch("https://hh.ru/vacancy/1").await.unwrap();
        assert_eq!(page.status, 200);
        assert_eq!(page.body, "<html></html>");
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn test_static_fetcher_failure_is_fetch_failed() {
        let fetcher = StaticFetcher::failing("status 503");
        let err = fetcher.fetch("https://career.habr.com/vacancies/1").await.unwrap_err();
        assert!(matches!(err, Error::FetchFailed { ref site, .. } if site == "career.habr.com"));
        assert_eq!(err.http_status(), 400);
    }
}
