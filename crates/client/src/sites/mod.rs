//! Per-site vacancy parsers.
//!
//! ### Pipeline
//! 1. Domain guard: the URL must belong to the parser's site, checked before
//!    any network call.
//! 2. One fetch through a [`PageFetcher`].
//! 3. Synchronous extraction over a parsed [`Html`] tree. Each field runs its
//!    own fallback chain; a missing field never blocks another.
//!
//! A panic inside extraction is caught and reported as
//! [`Error::ParseFailed`] instead of unwinding into the caller.

pub mod getmatch;
pub mod habr;
pub mod hh;

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::str::FromStr;

use jobparse_core::{Error, VacancyRecord};
use scraper::Html;

use crate::fetch::{PageFetcher, host_of};

pub use getmatch::{GetmatchHints, GetmatchParser};
pub use habr::HabrParser;
pub use hh::HhParser;

/// Supported job boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Site {
    Hh,
    Habr,
    Getmatch,
}

impl Site {
    pub const ALL: [Site; 3] = [Site::Hh, Site::Habr, Site::Getmatch];

    /// Canonical domain the site's vacancy URLs live on.
    pub fn domain(self) -> &'static str {
        match self {
            Site::Hh => "hh.ru",
            Site::Habr => "career.habr.com",
            Site::Getmatch => "getmatch.ru",
        }
    }

    /// Path segment preceding the numeric vacancy id.
    fn id_marker(self) -> &'static str {
        match self {
            Site::Hh => "/vacancy/",
            Site::Habr | Site::Getmatch => "/vacancies/",
        }
    }

    /// Whether `url` points at this site.
    ///
    /// hh.ru is checked against the host only (regional subdomains such as
    /// `spb.hh.ru` pass); the others accept the domain anywhere in the URL.
    pub fn matches(self, url: &str) -> bool {
        match self {
            Site::Hh => host_of(url).is_some_and(|host| host.contains(self.domain())),
            Site::Habr | Site::Getmatch => url.contains(self.domain()),
        }
    }

    /// Site-native vacancy id: the digits right after the id marker.
    pub fn original_id(self, url: &str) -> Option<String> {
        let marker = self.id_marker();
        let start = url.find(marker)? + marker.len();
        let digits: String = url[start..].chars().take_while(char::is_ascii_digit).collect();
        (!digits.is_empty()).then_some(digits)
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.domain())
    }
}

impl FromStr for Site {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hh" | "hh.ru" => Ok(Site::Hh),
            "habr" | "career.habr.com" => Ok(Site::Habr),
            "getmatch" | "getmatch.ru" => Ok(Site::Getmatch),
            other => Err(Error::UnsupportedSite(other.to_string())),
        }
    }
}

/// One site's HTML to [`VacancyRecord`] translator.
///
/// Implementations hold only immutable, pre-compiled state and are shared
/// behind `Arc` across concurrent requests.
pub trait SiteParser: Send + Sync {
    fn site(&self) -> Site;

    /// Build a record from an already parsed page. Never fails: missing
    /// fields fall back to sentinels or stay empty.
    fn extract(&self, document: &Html, url: &str) -> VacancyRecord;
}

/// Pre-flight URL validation, before any network call.
pub fn check_url(site: Site, url: &str) -> Result<(), Error> {
    if url.trim().is_empty() {
        return Err(Error::InvalidInput("url must not be empty".into()));
    }
    if !site.matches(url) {
        return Err(Error::DomainMismatch { expected: site.domain(), url: url.to_string() });
    }
    Ok(())
}

/// Parse `html` and run the parser's extraction, converting panics into
/// [`Error::ParseFailed`].
pub fn extract_html(parser: &dyn SiteParser, html: &str, url: &str) -> Result<VacancyRecord, Error> {
    catch_unwind(AssertUnwindSafe(|| {
        let document = Html::parse_document(html);
        parser.extract(&document, url)
    }))
    .map_err(|payload| {
        let reason = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "extraction panicked".into());
        tracing::error!(site = %parser.site(), url, reason = %reason, "vacancy extraction panicked");
        Error::ParseFailed(reason)
    })
}

/// Guard, fetch and extract one vacancy.
pub async fn parse_vacancy(parser: &dyn SiteParser, fetcher: &dyn PageFetcher, url: &str) -> Result<VacancyRecord, Error> {
    let site = parser.site();
    check_url(site, url)?;

    tracing::info!(site = %site, url, "parsing vacancy");
    let page = fetcher.fetch(url).await?;

    let record = extract_html(parser, &page.body, url)?;
    tracing::info!(
        site = %site,
        url,
        final_url = %page.final_url,
        status = page.status,
        original_id = record.original_id.as_deref().unwrap_or("-"),
        skills = record.skills.len(),
        fetch_ms = page.fetch_ms,
        "vacancy parsed"
    );
    Ok(record)
}
