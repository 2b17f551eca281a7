//! hh.ru vacancy pages.
//!
//! hh.ru marks most fields with `data-qa` attributes, so selectors are tried
//! first and keyword heuristics only cover older layouts. Skills always pass
//! through the [`SkillDictionary`] normalizer.

use jobparse_core::{Currency, Error, UNKNOWN_COMPANY, UNKNOWN_TITLE, VacancyRecord, WorkFormat};
use regex::Regex;
use scraper::{Html, Selector};
use uuid::Uuid;

use super::{Site, SiteParser};
use crate::extract::dom::{block_text, css, first_text, inline_text};
use crate::extract::work_format::{classify, from_location, has_keyword};
use crate::extract::{FallbackChain, Salary, SalaryParser, SingleFigure, SkillDictionary, YearsPattern};

/// Parser for `hh.ru` (including regional subdomains).
#[derive(Debug, Clone)]
pub struct HhParser {
    title_header: Selector,
    title_qa: Selector,
    h1: Selector,
    company_name: Selector,
    company_block: Selector,
    description: Selector,
    work_formats: Selector,
    employment_mode: Selector,
    paragraph: Selector,
    salary_inner: Selector,
    salary_block: Selector,
    experience: Selector,
    skill_tags: Selector,
    skill_elements: Selector,
    tax_phrase: Regex,
    salary: SalaryParser,
    years: YearsPattern,
    dictionary: SkillDictionary,
}

impl HhParser {
    pub fn new(dictionary: SkillDictionary) -> Result<Self, Error> {
        Ok(Self {
            title_header: css("h1.bloko-header-section-1")?,
            title_qa: css(r#"[data-qa="vacancy-title"]"#)?,
            h1: css("h1")?,
            company_name: css(r#"[data-qa="vacancy-company-name"] span, [data-qa="vacancy-company-name"] a"#)?,
            company_block: css(r#"[data-qa="vacancy-company-name"]"#)?,
            description: css(r#"[data-qa="vacancy-description"]"#)?,
            work_formats: css(r#"[data-qa="work-formats-text"]"#)?,
            employment_mode: css(r#"[data-qa="vacancy-view-employment-mode"]"#)?,
            paragraph: css("p")?,
            salary_inner: css(r#"[data-qa="vacancy-salary"] span"#)?,
            salary_block: css(r#"[data-qa="vacancy-salary"]"#)?,
            experience: css(r#"[data-qa="vacancy-experience"]"#)?,
            skill_tags: css(r#"[data-qa="bloko-tag__text"]"#)?,
            skill_elements: css(r#"[data-qa="skills-element"]"#)?,
            tax_phrase: Regex::new(r"\s+(?:до вычета налогов|на руки|за месяц).*$")
                .map_err(|e| Error::ParseFailed(format!("invalid tax phrase pattern: {e}")))?,
            salary: SalaryParser::new(SingleFigure::Fixed)?,
            years: YearsPattern::new()?,
            dictionary,
        })
    }

    fn title(&self, document: &Html) -> String {
        FallbackChain::<Html, String>::new("title")
            .then("header-section", |d| first_text(d, &self.title_header))
            .then("data-qa", |d| first_text(d, &self.title_qa))
            .then("h1", |d| first_text(d, &self.h1))
            .resolve(document)
            .unwrap_or_else(|| UNKNOWN_TITLE.into())
    }

    fn company(&self, document: &Html) -> String {
        FallbackChain::<Html, String>::new("company")
            .then("company-name-inner", |d| first_text(d, &self.company_name))
            .then("company-name", |d| first_text(d, &self.company_block))
            .resolve(document)
            .unwrap_or_else(|| UNKNOWN_COMPANY.into())
    }

    fn description(&self, document: &Html) -> String {
        document
            .select(&self.description)
            .next()
            .map(block_text)
            .unwrap_or_default()
    }

    fn work_format(&self, document: &Html, description: &str) -> Option<WorkFormat> {
        FallbackChain::<Html, WorkFormat>::new("work_format")
            .then("work-formats-text", |d| first_text(d, &self.work_formats).and_then(|t| from_location(&t)))
            .then("employment-mode", |d| first_text(d, &self.employment_mode).and_then(|t| from_location(&t)))
            .then("keyword-paragraph", |d| {
                d.select(&self.paragraph)
                    .map(inline_text)
                    .find(|t| has_keyword(t))
                    .and_then(|t| classify(&t))
            })
            .then("description", |_| classify(description))
            .resolve(document)
    }

    fn salary(&self, document: &Html) -> Salary {
        FallbackChain::<Html, Salary>::new("salary")
            .then("salary-inner", |d| self.parse_salary(&first_text(d, &self.salary_inner)?))
            .then("salary-block", |d| self.parse_salary(&first_text(d, &self.salary_block)?))
            .resolve(document)
            .unwrap_or_default()
    }

    fn parse_salary(&self, text: &str) -> Option<Salary> {
        if text.contains("не указана") {
            return None;
        }

        let cleaned = self.tax_phrase.replace(text, "");
        let mut salary = self.salary.parse(&cleaned);
        if salary.currency.is_none() && (salary.from.is_some() || salary.to.is_some()) {
            salary.currency = trailing_marker(&cleaned);
        }
        Some(salary)
    }

    fn experience(&self, document: &Html, description: &str) -> Option<String> {
        FallbackChain::<Html, String>::new("experience")
            .then("data-qa", |d| first_text(d, &self.experience))
            .then("description-years", |_| self.years.find(description))
            .resolve(document)
    }

    fn skills(&self, document: &Html, description: &str) -> Vec<String> {
        let raw = FallbackChain::<Html, Vec<String>>::new("skills")
            .then("bloko-tag", |d| Some(d.select(&self.skill_tags).map(inline_text).collect()))
            .then("skills-element", |d| Some(d.select(&self.skill_elements).map(inline_text).collect()))
            .then("description-scan", |_| Some(self.dictionary.scan(description)))
            .resolve(document)
            .unwrap_or_default();

        self.dictionary.normalize(raw)
    }
}

/// Last whitespace-separated token without digits, read as a raw currency.
fn trailing_marker(text: &str) -> Option<Currency> {
    text.split_whitespace()
        .last()
        .map(|token| token.trim_matches(|c: char| c == '.' || c == ','))
        .filter(|token| !token.is_empty() && !token.chars().any(|c| c.is_ascii_digit()))
        .map(|token| Currency::Other(token.to_string()))
}

impl SiteParser for HhParser {
    fn site(&self) -> Site {
        Site::Hh
    }

    fn extract(&self, document: &Html, url: &str) -> VacancyRecord {
        let description = self.description(document);
        let salary = self.salary(document);

        VacancyRecord {
            id: Uuid::new_v4(),
            original_id: Site::Hh.original_id(url),
            title: self.title(document),
            company: self.company(document),
            salary_from: salary.from,
            salary_to: salary.to,
            currency: salary.currency,
            experience: self.experience(document, &description),
            skills: self.skills(document, &description),
            work_format: self.work_format(document, &description),
            description,
            url: url.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::StaticFetcher;
    use crate::sites::{extract_html, parse_vacancy};

    const URL: &str = "https://hh.ru/vacancy/93354241?from=search";

    const FULL: &str = r#"
        <html>
        <head><script>window.salary = "999 999 ₽";</script></head>
        <body>
            <div class="vacancy-title">
                <h1 class="bloko-header-section-1" data-qa="vacancy-title">Senior Rust Developer</h1>
                <div data-qa="vacancy-salary"><span>от 350 000 до 430 000 ₽ до вычета налогов</span></div>
            </div>
            <a data-qa="vacancy-company-name" href="/employer/1"><span>ООО Ромашка</span></a>
            <p data-qa="vacancy-experience">3–6 лет</p>
            <p data-qa="work-formats-text">Формат работы: удалённо</p>
            <div data-qa="vacancy-description">
                <p>Мы ищем разработчика.</p>
                <ul><li>Опыт с Tokio</li></ul>
            </div>
            <div class="bloko-tag-list">
                <span data-qa="bloko-tag__text">rust</span>
                <span data-qa="bloko-tag__text">PostgreSQL</span>
                <span data-qa="bloko-tag__text">Опыт</span>
                <span data-qa="bloko-tag__text">RUST</span>
                <span data-qa="bloko-tag__text">gRPC</span>
            </div>
        </body>
        </html>
    "#;

    fn parser() -> HhParser {
        HhParser::new(SkillDictionary::with_extras(&[], &[]).unwrap()).unwrap()
    }

    fn extract(html: &str) -> VacancyRecord {
        extract_html(&parser(), html, URL).unwrap()
    }

    fn salary_page(text: &str) -> String {
        format!(r#"<html><body><div data-qa="vacancy-salary">{text}</div></body></html>"#)
    }

    #[test]
    fn test_full_page() {
        let record = extract(FULL);
        assert_eq!(record.original_id.as_deref(), Some("93354241"));
        assert_eq!(record.title, "Senior Rust Developer");
        assert_eq!(record.company, "ООО Ромашка");
        assert_eq!(record.description, "Мы ищем разработчика.\nОпыт с Tokio");
        assert_eq!(record.salary_from, Some(350_000));
        assert_eq!(record.salary_to, Some(430_000));
        assert_eq!(record.currency, Some(Currency::Rub));
        assert_eq!(record.experience.as_deref(), Some("3–6 лет"));
        assert_eq!(record.skills, vec!["Rust", "PostgreSQL", "gRPC"]);
        assert_eq!(record.work_format, Some(WorkFormat::Remote));
        assert_eq!(record.url, URL);
    }

    #[test]
    fn test_minimal_page_uses_sentinels() {
        let record = extract("<html><body><div>Просто страница</div></body></html>");
        assert_eq!(record.title, UNKNOWN_TITLE);
        assert_eq!(record.company, UNKNOWN_COMPANY);
        assert_eq!(record.description, "");
        assert_eq!(record.salary_from, None);
        assert_eq!(record.salary_to, None);
        assert_eq!(record.currency, None);
        assert_eq!(record.experience, None);
        assert!(record.skills.is_empty());
        assert_eq!(record.work_format, None);
    }

    #[test]
    fn test_fresh_id_per_extraction() {
        assert_ne!(extract(FULL).id, extract(FULL).id);
    }

    #[test]
    fn test_title_fallbacks() {
        let record = extract(r#"<html><body><h2 data-qa="vacancy-title">Go Developer</h2></body></html>"#);
        assert_eq!(record.title, "Go Developer");

        let record = extract("<html><body><h1>  Data Engineer </h1></body></html>");
        assert_eq!(record.title, "Data Engineer");
    }

    #[test]
    fn test_single_figure_is_fixed_salary() {
        let record = extract(&salary_page("120 000 ₽ на руки"));
        assert_eq!((record.salary_from, record.salary_to), (Some(120_000), Some(120_000)));
        assert_eq!(record.currency, Some(Currency::Rub));
    }

    #[test]
    fn test_from_only_salary() {
        let record = extract(&salary_page("от 100 000 ₽ до вычета налогов"));
        assert_eq!((record.salary_from, record.salary_to), (Some(100_000), None));
    }

    #[test]
    fn test_dash_range_salary() {
        let record = extract(&salary_page("3 000 – 4 500 $ за месяц"));
        assert_eq!((record.salary_from, record.salary_to), (Some(3000), Some(4500)));
        assert_eq!(record.currency, Some(Currency::Usd));
    }

    #[test]
    fn test_unknown_currency_keeps_trailing_marker() {
        let record = extract(&salary_page("150 000 ₸ на руки"));
        assert_eq!(record.currency, Some(Currency::Other("₸".into())));
    }

    #[test]
    fn test_salary_not_specified() {
        let record = extract(&salary_page("з/п не указана"));
        assert_eq!((record.salary_from, record.salary_to, record.currency), (None, None, None));
    }

    #[test]
    fn test_heuristic_fallbacks_from_description() {
        let html = r#"
            <html><body>
                <p>Гибридный формат, офис в Москве</p>
                <div data-qa="vacancy-description">Нужен опыт с Docker и Kubernetes, знание Python. Опыт от 3 лет.</div>
            </body></html>
        "#;
        let record = extract(html);
        assert_eq!(record.work_format, Some(WorkFormat::Hybrid));
        assert_eq!(record.experience.as_deref(), Some("3 лет"));
        assert_eq!(record.skills, vec!["Python", "Docker", "Kubernetes"]);
    }

    #[test]
    fn test_work_format_from_description_only() {
        let html = r#"<html><body><div data-qa="vacancy-description">Работа полностью remote</div></body></html>"#;
        assert_eq!(extract(html).work_format, Some(WorkFormat::Remote));
    }

    #[test]
    fn test_unclassified_location_text_kept_raw() {
        let html = r#"<html><body><p data-qa="vacancy-view-employment-mode">Полная занятость, полный день</p></body></html>"#;
        assert_eq!(extract(html).work_format, Some(WorkFormat::Other("Полная занятость, полный день".into())));
    }

    #[tokio::test]
    async fn test_foreign_domain_never_fetches() {
        let fetcher = StaticFetcher::page(FULL);
        for url in ["https://career.habr.com/vacancies/1", "https://example.com/?next=hh.ru/vacancy/1"] {
            let err = parse_vacancy(&parser(), &fetcher, url).await.unwrap_err();
            assert!(matches!(err, Error::DomainMismatch { expected: "hh.ru", .. }));
        }
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_parse_vacancy_end_to_end() {
        let fetcher = StaticFetcher::page(FULL);
        let record = parse_vacancy(&parser(), &fetcher, URL).await.unwrap();
        assert_eq!(fetcher.calls(), 1);
        assert_eq!(record.title, "Senior Rust Developer");
    }
}
