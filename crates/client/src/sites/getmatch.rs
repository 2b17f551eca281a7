//! getmatch.ru vacancy pages.
//!
//! getmatch markup carries few stable classes, so most fields fall back to
//! scanning text nodes. The last tier of the company and skills chains uses
//! [`GetmatchHints`]: literal substrings that happened to identify those
//! blocks on real pages.

use jobparse_core::{AppConfig, Error, UNKNOWN_COMPANY, UNKNOWN_TITLE, VacancyRecord, WorkFormat};
use scraper::{ElementRef, Html, Selector};
use uuid::Uuid;

use super::{Site, SiteParser};
use crate::extract::dom::{
    block_text, css, first_text, inline_text, innermost_containing, next_element_sibling, own_text, text_nodes,
};
use crate::extract::work_format::{classify, has_keyword};
use crate::extract::{FallbackChain, Salary, SalaryParser, SingleFigure, YearsPattern, dedup_case_insensitive};

const DESCRIPTION_MARKERS: [&str; 2] = ["В команде", "О компании"];

/// Last-resort literals for the company and skills chains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetmatchHints {
    /// Company names looked up verbatim in headings and blocks.
    pub company_hints: Vec<String>,
    /// Word marking a block as a skill listing.
    pub skill_anchor: String,
}

impl Default for GetmatchHints {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for GetmatchHints {
    fn from(config: &AppConfig) -> Self {
        Self {
            company_hints: config.getmatch_company_hints.clone(),
            skill_anchor: config.getmatch_skill_anchor.clone(),
        }
    }
}

/// Parser for `getmatch.ru`.
#[derive(Debug, Clone)]
pub struct GetmatchParser {
    heading: Selector,
    company_link: Selector,
    div: Selector,
    hint_block: Selector,
    description_section: Selector,
    description_part: Selector,
    text_block: Selector,
    main: Selector,
    h3: Selector,
    row: Selector,
    term: Selector,
    value: Selector,
    tech_heading: Selector,
    tech_item: Selector,
    anchor_block: Selector,
    salary: SalaryParser,
    years: YearsPattern,
    hints: GetmatchHints,
}

impl GetmatchParser {
    pub fn new(hints: GetmatchHints) -> Result<Self, Error> {
        Ok(Self {
            heading: css("h1, h2")?,
            company_link: css(r#"a[href^="/companies/"]"#)?,
            div: css("div")?,
            hint_block: css("h2, h3, div")?,
            description_section: css("section.b-vacancy-description")?,
            description_part: css("h2, p, li")?,
            text_block: css("div, section")?,
            main: css("main")?,
            h3: css("h3")?,
            row: css("div.row")?,
            term: css("div.b-term")?,
            value: css("div.b-value")?,
            tech_heading: css("h2, h3")?,
            tech_item: css("span, a")?,
            anchor_block: css("div, section, span")?,
            salary: SalaryParser::new(SingleFigure::Fixed)?,
            years: YearsPattern::new()?,
            hints,
        })
    }

    fn title(&self, document: &Html) -> String {
        FallbackChain::<Html, String>::new("title")
            .then("first-heading", |d| first_text(d, &self.heading))
            .resolve(document)
            .unwrap_or_else(|| UNKNOWN_TITLE.into())
    }

    fn company(&self, document: &Html) -> String {
        let mut chain = FallbackChain::<Html, String>::new("company")
            .then("companies-link", |d| first_text(d, &self.company_link))
            .then("preposition-div", |d| self.preposition_company(d));

        for hint in &self.hints.company_hints {
            chain = chain.then("company-hint", move |d| {
                innermost_containing(d, &self.hint_block, hint)
                    .into_iter()
                    .map(inline_text)
                    .find(|text| !text.is_empty())
            });
        }

        chain.resolve(document).unwrap_or_else(|| UNKNOWN_COMPANY.into())
    }

    /// A `div` whose own text reads "в <company>".
    fn preposition_company(&self, document: &Html) -> Option<String> {
        document.select(&self.div).find_map(|div| {
            let text = own_text(div);
            let name = text.strip_prefix("в ").or_else(|| text.strip_prefix("В "))?.trim();
            (!name.is_empty()).then(|| name.to_string())
        })
    }

    fn description(&self, document: &Html) -> String {
        FallbackChain::<Html, String>::new("description")
            .then("description-section", |d| d.select(&self.description_section).next().map(|s| self.structured(s)))
            .then("team-and-company-blocks", |d| Some(self.marker_blocks(d)))
            .then("main", |d| d.select(&self.main).next().map(block_text))
            .resolve(document)
            .unwrap_or_default()
    }

    /// Headings set off by blank lines, list items as bullets, paragraphs as is.
    fn structured(&self, section: ElementRef<'_>) -> String {
        section
            .select(&self.description_part)
            .filter_map(|part| {
                let text = inline_text(part);
                if text.is_empty() {
                    return None;
                }
                Some(match part.value().name() {
                    "h2" => format!("\n{text}\n"),
                    "li" => format!("- {text}"),
                    _ => text,
                })
            })
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }

    fn marker_blocks(&self, document: &Html) -> String {
        let mut seen = Vec::new();
        let mut blocks = Vec::new();

        for marker in DESCRIPTION_MARKERS {
            for block in innermost_containing(document, &self.text_block, marker) {
                if seen.contains(&block.id()) {
                    continue;
                }
                seen.push(block.id());
                blocks.push(block_text(block));
            }
        }

        blocks.join("\n\n")
    }

    fn work_format(&self, document: &Html, description: &str) -> Option<WorkFormat> {
        FallbackChain::<Html, WorkFormat>::new("work_format")
            .then("keyword-text-node", |d| text_nodes(d).find(|t| has_keyword(t)).and_then(classify))
            .then("description", |_| classify(description))
            .resolve(document)
    }

    fn salary(&self, document: &Html) -> Salary {
        FallbackChain::<Html, Salary>::new("salary")
            .then("currency-h3", |d| {
                d.select(&self.h3)
                    .map(inline_text)
                    .find(|t| self.salary.has_currency_marker(t))
                    .map(|t| self.salary.parse(&t))
            })
            .then("currency-text-node", |d| {
                text_nodes(d).find(|t| self.salary.has_currency_marker(t)).map(|t| self.salary.parse(t))
            })
            .resolve(document)
            .unwrap_or_default()
    }

    fn experience(&self, document: &Html) -> Option<String> {
        FallbackChain::<Html, String>::new("experience")
            .then("required-experience-row", |d| {
                d.select(&self.row)
                    .find(|row| {
                        row.select(&self.term)
                            .next()
                            .is_some_and(|term| inline_text(term).to_lowercase().contains("требуемый опыт"))
                    })
                    .and_then(|row| row.select(&self.value).next())
                    .map(inline_text)
            })
            .then("experience-text-node", |d| {
                text_nodes(d)
                    .filter(|t| t.to_lowercase().contains("опыт"))
                    .find_map(|t| self.years.find(t))
            })
            .resolve(document)
    }

    fn skills(&self, document: &Html) -> Vec<String> {
        let raw = FallbackChain::<Html, Vec<String>>::new("skills")
            .then("technologies-block", |d| Some(self.technology_skills(d)))
            .then("anchor-block", |d| Some(self.anchor_skills(d)))
            .resolve(document)
            .unwrap_or_default();

        dedup_case_insensitive(raw)
    }

    /// `span`/`a` items of the element after the "Технологии" heading.
    fn technology_skills(&self, document: &Html) -> Vec<String> {
        let block = document
            .select(&self.tech_heading)
            .filter(|heading| inline_text(*heading).contains("Технологии"))
            .find_map(|heading| {
                std::iter::successors(next_element_sibling(heading), |el| next_element_sibling(*el))
                    .find(|el| !matches!(el.value().name(), "br" | "hr"))
            });

        block
            .map(|block| block.select(&self.tech_item).map(inline_text).collect())
            .unwrap_or_default()
    }

    /// The innermost block mentioning the anchor skill, split into items.
    fn anchor_skills(&self, document: &Html) -> Vec<String> {
        let anchor = self.hints.skill_anchor.trim();
        if anchor.is_empty() {
            return Vec::new();
        }

        innermost_containing(document, &self.anchor_block, anchor)
            .first()
            .map(|block| {
                block
                    .text()
                    .collect::<String>()
                    .split(['•', ',', '\n'])
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl SiteParser for GetmatchParser {
    fn site(&self) -> Site {
        Site::Getmatch
    }

    fn extract(&self, document: &Html, url: &str) -> VacancyRecord {
        let description = self.description(document);
        let salary = self.salary(document);

        VacancyRecord {
            id: Uuid::new_v4(),
            original_id: Site::Getmatch.original_id(url),
            title: self.title(document),
            company: self.company(document),
            salary_from: salary.from,
            salary_to: salary.to,
            currency: salary.currency,
            experience: self.experience(document),
            skills: self.skills(document),
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
    use jobparse_core::Currency;

    const URL: &str = "https://getmatch.ru/vacancies/18327-senior-python-developer";

    const FULL: &str = r##"
        <html><body><main>
            <h1>Senior Python Developer</h1>
            <a href="/companies/ivi">Иви</a>
            <h3>350 000 — 450 000 ₽/мес на руки</h3>
            <div class="b-vacancy-locations">Москва, офис или гибрид</div>
            <div class="row">
                <div class="b-term">Требуемый опыт</div>
                <div class="b-value">3+ года</div>
            </div>
            <section class="b-vacancy-description">
                <h2>О компании</h2>
                <p>Онлайн-кинотеатр.</p>
                <h2>Задачи</h2>
                <ul><li>Развивать API</li><li>Писать тесты</li></ul>
            </section>
            <h3>Технологии</h3>
            <br>
            <div class="b-vacancy-stack"><span>Python</span><span>Django</span><a href="#">python</a></div>
        </main></body></html>
    "##;

    fn parser() -> GetmatchParser {
        GetmatchParser::new(GetmatchHints::default()).unwrap()
    }

    fn extract(html: &str) -> VacancyRecord {
        extract_html(&parser(), html, URL).unwrap()
    }

    #[test]
    fn test_full_page() {
        let record = extract(FULL);
        assert_eq!(record.original_id.as_deref(), Some("18327"));
        assert_eq!(record.title, "Senior Python Developer");
        assert_eq!(record.company, "Иви");
        assert_eq!(
            record.description,
            "О компании\n\nОнлайн-кинотеатр.\n\nЗадачи\n\n- Развивать API\n- Писать тесты"
        );
        assert_eq!(record.salary_from, Some(350_000));
        assert_eq!(record.salary_to, Some(450_000));
        assert_eq!(record.currency, Some(Currency::Rub));
        assert_eq!(record.experience.as_deref(), Some("3+ года"));
        assert_eq!(record.skills, vec!["Python", "Django"]);
        assert_eq!(record.work_format, Some(WorkFormat::Hybrid));
    }

    #[test]
    fn test_minimal_page_uses_sentinels() {
        let record = extract("<html><body></body></html>");
        assert_eq!(record.title, UNKNOWN_TITLE);
        assert_eq!(record.company, UNKNOWN_COMPANY);
        assert_eq!(record.description, "");
        assert_eq!((record.salary_from, record.salary_to, record.currency), (None, None, None));
        assert_eq!(record.experience, None);
        assert!(record.skills.is_empty());
        assert_eq!(record.work_format, None);
    }

    #[test]
    fn test_single_figure_is_fixed_salary() {
        let record = extract("<html><body><h3>250 000 ₽</h3></body></html>");
        assert_eq!((record.salary_from, record.salary_to), (Some(250_000), Some(250_000)));
    }

    #[test]
    fn test_from_only_salary_in_text_node() {
        let record = extract("<html><body><p>Зарплата: от 300 000 ₽</p></body></html>");
        assert_eq!((record.salary_from, record.salary_to), (Some(300_000), None));
        assert_eq!(record.currency, Some(Currency::Rub));
    }

    #[test]
    fn test_ruby_heading_is_not_a_salary() {
        let record = extract("<html><body><h3>Ruby on Rails</h3><h3>4 000 – 5 000 $</h3></body></html>");
        assert_eq!((record.salary_from, record.salary_to), (Some(4000), Some(5000)));
        assert_eq!(record.currency, Some(Currency::Usd));
    }

    #[test]
    fn test_ruby_title_has_no_currency() {
        let record = extract("<html><body><h1>Senior Ruby Developer</h1><p>Neural networks team</p></body></html>");
        assert_eq!(record.title, "Senior Ruby Developer");
        assert_eq!((record.salary_from, record.salary_to, record.currency), (None, None, None));
    }

    #[test]
    fn test_company_from_preposition_div() {
        let record = extract("<html><body><div>в Яндекс</div></body></html>");
        assert_eq!(record.company, "Яндекс");
    }

    #[test]
    fn test_company_from_hint() {
        let record = extract(r#"<html><body><div class="card"><h3>Команда Иви</h3></div></body></html>"#);
        assert_eq!(record.company, "Команда Иви");
    }

    #[test]
    fn test_company_hints_are_configurable() {
        let hints = GetmatchHints { company_hints: vec!["Кинопоиск".into()], skill_anchor: "Python".into() };
        let parser = GetmatchParser::new(hints).unwrap();
        let html = "<html><body><h2>Иви</h2><h3>Кинопоиск</h3></body></html>";
        let record = extract_html(&parser, html, URL).unwrap();
        // the first heading is the title; the company comes from the hint only
        assert_eq!(record.title, "Иви");
        assert_eq!(record.company, "Кинопоиск");
    }

    #[test]
    fn test_description_from_marker_blocks() {
        let html = r#"
            <html><body><div>
                <div>В команде 12 инженеров.</div>
                <div>О компании: стриминг.</div>
            </div></body></html>
        "#;
        assert_eq!(extract(html).description, "В команде 12 инженеров.\n\nО компании: стриминг.");
    }

    #[test]
    fn test_description_from_main() {
        let html = "<html><body><main><p>Ищем инженера.</p><p>Можно удалённо.</p></main></body></html>";
        let record = extract(html);
        assert_eq!(record.description, "Ищем инженера.\nМожно удалённо.");
        assert_eq!(record.work_format, Some(WorkFormat::Remote));
    }

    #[test]
    fn test_experience_from_text_node() {
        let record = extract("<html><body><p>Опыт работы от 4 лет</p></body></html>");
        assert_eq!(record.experience.as_deref(), Some("4 лет"));
    }

    #[test]
    fn test_skills_from_anchor_block() {
        let html = "<html><body><div><span>Python • FastAPI, PostgreSQL</span></div></body></html>";
        assert_eq!(extract(html).skills, vec!["Python", "FastAPI", "PostgreSQL"]);
    }

    #[tokio::test]
    async fn test_foreign_domain_never_fetches() {
        let fetcher = StaticFetcher::page(FULL);
        let err = parse_vacancy(&parser(), &fetcher, "https://career.habr.com/vacancies/18327")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::DomainMismatch { expected: "getmatch.ru", .. }));
        assert_eq!(fetcher.calls(), 0);
    }
}
