//! Routes vacancy URLs to the matching site parser.

use std::sync::Arc;

use jobparse_core::{AppConfig, Error, VacancyRecord};

use crate::extract::SkillDictionary;
use crate::fetch::{FetchClient, FetchConfig, PageFetcher};
use crate::sites::{self, GetmatchHints, GetmatchParser, HabrParser, HhParser, Site, SiteParser};

/// Shared fetcher plus one parser per supported site.
///
/// Cheap to share behind `Arc`; every call is independent.
pub struct Dispatcher {
    fetcher: Arc<dyn PageFetcher>,
    parsers: Vec<Arc<dyn SiteParser>>,
}

impl Dispatcher {
    pub fn new(fetcher: Arc<dyn PageFetcher>, parsers: Vec<Arc<dyn SiteParser>>) -> Self {
        Self { fetcher, parsers }
    }

    /// All three site parsers over a reqwest fetcher built from `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        let fetcher = FetchClient::new(FetchConfig::from(config))?;
        Self::with_fetcher(config, Arc::new(fetcher))
    }

    /// All three site parsers over the given fetcher.
    pub fn with_fetcher(config: &AppConfig, fetcher: Arc<dyn PageFetcher>) -> Result<Self, Error> {
        let dictionary = SkillDictionary::with_extras(&config.extra_known_skills, &config.extra_stop_words)?;
        let parsers: Vec<Arc<dyn SiteParser>> = vec![
            Arc::new(HhParser::new(dictionary)?),
            Arc::new(HabrParser::new()?),
            Arc::new(GetmatchParser::new(GetmatchHints::from(config))?),
        ];

        let dispatcher = Self::new(fetcher, parsers);
        tracing::debug!(sites = ?dispatcher.sites(), "dispatcher ready");
        Ok(dispatcher)
    }

    /// Sites with a registered parser, in routing order.
    pub fn sites(&self) -> Vec<Site> {
        self.parsers.iter().map(|p| p.site()).collect()
    }

    /// The first site whose domain matches `url`.
    pub fn route(&self, url: &str) -> Option<Site> {
        self.parsers.iter().map(|p| p.site()).find(|site| site.matches(url))
    }

    fn parser(&self, site: Site) -> Result<&dyn SiteParser, Error> {
        self.parsers
            .iter()
            .find(|p| p.site() == site)
            .map(|p| p.as_ref())
            .ok_or_else(|| Error::UnsupportedSite(site.domain().to_string()))
    }

    fn route_or_reject(&self, url: &str) -> Result<Site, Error> {
        if url.trim().is_empty() {
            return Err(Error::InvalidInput("url must not be empty".into()));
        }
        self.route(url).ok_or_else(|| Error::UnsupportedSite(url.to_string()))
    }

    /// Fetch and parse a vacancy from any supported site.
    pub async fn parse(&self, url: &str) -> Result<VacancyRecord, Error> {
        let site = self.route_or_reject(url)?;
        self.parse_site(site, url).await
    }

    /// Fetch and parse a vacancy with one specific site's parser.
    pub async fn parse_site(&self, site: Site, url: &str) -> Result<VacancyRecord, Error> {
        let parser = self.parser(site)?;
        sites::parse_vacancy(parser, self.fetcher.as_ref(), url).await
    }

    /// Parse already downloaded HTML without network I/O.
    ///
    /// Without an explicit site the URL picks the parser; with one, the URL
    /// only feeds `original_id` and `url` of the record.
    pub fn extract(&self, site: Option<Site>, html: &str, url: &str) -> Result<VacancyRecord, Error> {
        if html.trim().is_empty() {
            return Err(Error::InvalidInput("html must not be empty".into()));
        }

        let site = match site {
            Some(site) => site,
            None => self.route_or_reject(url)?,
        };

        sites::extract_html(self.parser(site)?, html, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::StaticFetcher;

    const HABR_PAGE: &str = r#"
        <html><body>
            <h1>Rust Engineer</h1>
            <div class="company_name">Acme</div>
        </body></html>
    "#;

    fn dispatcher(fetcher: Arc<StaticFetcher>) -> Dispatcher {
        Dispatcher::with_fetcher(&AppConfig::default(), fetcher).unwrap()
    }

    #[test]
    fn test_route_by_domain() {
        let d = dispatcher(Arc::new(StaticFetcher::page("")));
        assert_eq!(d.route("https://hh.ru/vacancy/1"), Some(Site::Hh));
        assert_eq!(d.route("https://career.habr.com/vacancies/1"), Some(Site::Habr));
        assert_eq!(d.route("https://getmatch.ru/vacancies/1"), Some(Site::Getmatch));
        assert_eq!(d.route("https://linkedin.com/jobs/1"), None);
        assert_eq!(d.sites(), Site::ALL.to_vec());
    }

    #[tokio::test]
    async fn test_parse_routes_to_matching_parser() {
        let fetcher = Arc::new(StaticFetcher::page(HABR_PAGE));
        let d = dispatcher(fetcher.clone());
        let record = d.parse("https://career.habr.com/vacancies/555").await.unwrap();
        assert_eq!(record.title, "Rust Engineer");
        assert_eq!(record.company, "Acme");
        assert_eq!(record.original_id.as_deref(), Some("555"));
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn test_unsupported_site_never_fetches() {
        let fetcher = Arc::new(StaticFetcher::page(HABR_PAGE));
        let d = dispatcher(fetcher.clone());

        let err = d.parse("https://linkedin.com/jobs/1").await.unwrap_err();
        assert!(matches!(err, Error::UnsupportedSite(_)));
        assert_eq!(err.http_status(), 400);

        let err = d.parse("").await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_parse_site_enforces_domain() {
        let fetcher = Arc::new(StaticFetcher::page(HABR_PAGE));
        let d = dispatcher(fetcher.clone());
        let err = d.parse_site(Site::Hh, "https://career.habr.com/vacancies/555").await.unwrap_err();
        assert!(matches!(err, Error::DomainMismatch { expected: "hh.ru", .. }));
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_fetch_failure_surfaces() {
        let d = dispatcher(Arc::new(StaticFetcher::failing("status 502")));
        let err = d.parse("https://getmatch.ru/vacancies/9").await.unwrap_err();
        assert!(matches!(err, Error::FetchFailed { .. }));
    }

    #[test]
    fn test_extract_offline() {
        let fetcher = Arc::new(StaticFetcher::page(""));
        let d = dispatcher(fetcher.clone());

        let record = d.extract(None, HABR_PAGE, "https://career.habr.com/vacancies/7").unwrap();
        assert_eq!(record.title, "Rust Engineer");

        let record = d.extract(Some(Site::Habr), HABR_PAGE, "saved-page.html").unwrap();
        assert_eq!(record.company, "Acme");
        assert_eq!(record.original_id, None);

        assert_eq!(fetcher.calls(), 0);
    }

    #[test]
    fn test_extract_rejects_empty_html_and_unknown_url() {
        let d = dispatcher(Arc::new(StaticFetcher::page("")));
        assert!(matches!(d.extract(None, "  ", "https://hh.ru/vacancy/1"), Err(Error::InvalidInput(_))));
        assert!(matches!(d.extract(None, HABR_PAGE, "https://example.com"), Err(Error::UnsupportedSite(_))));
    }
}
