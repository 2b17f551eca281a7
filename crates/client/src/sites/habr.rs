//! career.habr.com vacancy pages.
//!
//! Skills come from the "Требования" section: the modern layout lists them as
//! links, older pages as a list after a heading, and plain-text descriptions
//! as a paragraph. Skills are only trimmed and deduplicated here, not mapped
//! through the dictionary.

use jobparse_core::{Error, UNKNOWN_COMPANY, UNKNOWN_TITLE, VacancyRecord, WorkFormat};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use uuid::Uuid;

use super::{Site, SiteParser};
use crate::extract::dom::{block_text, css, first_text, has_class, inline_text, next_element_sibling};
use crate::extract::work_format::{classify, from_location};
use crate::extract::{FallbackChain, Salary, SalaryParser, SingleFigure, YearsPattern, dedup_case_insensitive};

const REQUIREMENTS: &str = "требования";

/// Parser for `career.habr.com`.
#[derive(Debug, Clone)]
pub struct HabrParser {
    h1: Selector,
    company_name: Selector,
    company_header: Selector,
    description_text: Selector,
    description_block: Selector,
    location: Selector,
    salary_block: Selector,
    skills_block: Selector,
    section_title: Selector,
    inline_list: Selector,
    skill_link: Selector,
    requirement_heading: Selector,
    list_item: Selector,
    block_item: Selector,
    requirements_paragraph: Regex,
    salary: SalaryParser,
    years: YearsPattern,
}

impl HabrParser {
    pub fn new() -> Result<Self, Error> {
        Ok(Self {
            h1: css("h1")?,
            company_name: css("div.company_name")?,
            company_header: css("div.company-header__name")?,
            description_text: css("div.vacancy-description__text")?,
            description_block: css("div.vacancy-description")?,
            location: css("div.vacancy-header__location")?,
            salary_block: css("div.basic-salary")?,
            skills_block: css("div.vacancy-description__skills")?,
            section_title: css("h2.content-section__title")?,
            inline_list: css("span.inline-list")?,
            skill_link: css("a.link-comp")?,
            requirement_heading: css("h2, h3, strong")?,
            list_item: css("li")?,
            block_item: css("p, li")?,
            requirements_paragraph: Regex::new(
                r"(?is)требования[\s:]*(.+?)(?:\n\s*\n|\n\s*(?:обязанности|ожидания|условия|мы предлагаем)|$)",
            )
            .map_err(|e| Error::ParseFailed(format!("invalid requirements pattern: {e}")))?,
            salary: SalaryParser::new(SingleFigure::LowerBound)?,
            years: YearsPattern::new()?,
        })
    }

    fn title(&self, document: &Html) -> String {
        FallbackChain::<Html, String>::new("title")
            .then("h1", |d| first_text(d, &self.h1))
            .resolve(document)
            .unwrap_or_else(|| UNKNOWN_TITLE.into())
    }

    fn company(&self, document: &Html) -> String {
        FallbackChain::<Html, String>::new("company")
            .then("company-name", |d| first_text(d, &self.company_name))
            .then("company-header", |d| first_text(d, &self.company_header))
            .resolve(document)
            .unwrap_or_else(|| UNKNOWN_COMPANY.into())
    }

    fn description(&self, document: &Html) -> String {
        FallbackChain::<Html, String>::new("description")
            .then("description-text", |d| d.select(&self.description_text).next().map(block_text))
            .then("description-block", |d| d.select(&self.description_block).next().map(block_text))
            .resolve(document)
            .unwrap_or_default()
    }

    fn work_format(&self, document: &Html, description: &str) -> Option<WorkFormat> {
        FallbackChain::<Html, WorkFormat>::new("work_format")
            .then("header-location", |d| first_text(d, &self.location).and_then(|t| from_location(&t)))
            .then("description", |_| classify(description))
            .resolve(document)
    }

    fn salary(&self, document: &Html) -> Salary {
        FallbackChain::<Html, Salary>::new("salary")
            .then("basic-salary", |d| first_text(d, &self.salary_block).map(|t| self.salary.parse(&t)))
            .resolve(document)
            .unwrap_or_default()
    }

    fn experience(&self, document: &Html, description: &str) -> Option<String> {
        FallbackChain::<Html, String>::new("experience")
            .then("description-skills", |d| first_text(d, &self.skills_block).and_then(|t| self.years.find(&t)))
            .then("description-years", |_| self.years.find(description))
            .resolve(document)
    }

    fn skills(&self, document: &Html, description: &str) -> Vec<String> {
        let raw = FallbackChain::<Html, Vec<String>>::new("skills")
            .then("requirements-section", |d| Some(self.section_skills(d)))
            .then("requirements-heading", |d| Some(self.heading_skills(d)))
            .then("requirements-paragraph", |_| Some(self.paragraph_skills(description)))
            .resolve(document)
            .unwrap_or_default();

        dedup_case_insensitive(raw)
    }

    /// `h2.content-section__title` "Требования" inside a `div.content-section`
    /// whose inline list holds the skill links.
    fn section_skills(&self, document: &Html) -> Vec<String> {
        let Some(section) = document
            .select(&self.section_title)
            .filter(|title| inline_text(*title).to_lowercase().contains(REQUIREMENTS))
            .find_map(|title| {
                title
                    .ancestors()
                    .filter_map(ElementRef::wrap)
                    .find(|el| el.value().name() == "div" && has_class(*el, "content-section"))
            })
        else {
            return Vec::new();
        };

        section
            .select(&self.inline_list)
            .next()
            .map(|list| list.select(&self.skill_link).map(inline_text).collect())
            .unwrap_or_default()
    }

    /// A heading starting with "Требования" followed by a list or a block.
    fn heading_skills(&self, document: &Html) -> Vec<String> {
        let block = document
            .select(&self.requirement_heading)
            .filter(|heading| inline_text(*heading).to_lowercase().starts_with(REQUIREMENTS))
            .find_map(|heading| {
                next_element_sibling(heading).filter(|sibling| matches!(sibling.value().name(), "ul" | "ol" | "div"))
            });

        let Some(block) = block else {
            return Vec::new();
        };

        let items = if block.value().name() == "div" { &self.block_item } else { &self.list_item };
        block.select(items).map(inline_text).collect()
    }

    /// The "Требования" paragraph of the description, one entry per line.
    fn paragraph_skills(&self, description: &str) -> Vec<String> {
        let Some(caps) = self.requirements_paragraph.captures(description) else {
            return Vec::new();
        };

        caps[1]
            .lines()
            .map(|line| line.trim_matches(|c: char| matches!(c, '•' | '*' | '-' | '—') || c.is_whitespace()))
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl SiteParser for HabrParser {
    fn site(&self) -> Site {
        Site::Habr
    }

    fn extract(&self, document: &Html, url: &str) -> VacancyRecord {
        let description = self.description(document);
        let salary = self.salary(document);

        VacancyRecord {
            id: Uuid::new_v4(),
            original_id: Site::Habr.original_id(url),
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
