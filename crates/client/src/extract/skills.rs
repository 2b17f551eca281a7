//! Skill dictionary and normalizer.
//!
//! The dictionary carries two lists: canonical skill names (used both to
//! canonicalize casing and to scan free text) and non-skill stop words that
//! must never be reported as skills.

use std::collections::{HashMap, HashSet};

use jobparse_core::Error;
use regex::Regex;

/// Canonical technology and process names recognized in vacancy text.
pub const KNOWN_SKILLS: &[&str] = &[
    "Java", "Python", "JavaScript", "TypeScript", "C++", "C#", "Go", "Ruby", "PHP", "Swift",
    "Kotlin", "Scala", "Rust", "SQL", "NoSQL", "MongoDB", "PostgreSQL", "MySQL", "Oracle",
    "Redis", "Cassandra", "Docker", "Kubernetes", "Git", "CI/CD", "Jenkins", "AWS", "Azure",
    "GCP", "Spring", "Spring Boot", "Django", "Flask", "React", "Angular", "Vue.js", "Node.js",
    "Express", "TensorFlow", "PyTorch", "Pandas", "NumPy", "Scikit-learn", "REST API", "GraphQL",
    "Kafka", "RabbitMQ", "Elasticsearch", "Agile", "Scrum", "Kanban", "Linux", "Unix", "WebFlux",
    "Microservices", "SOA", "DevOps", "SRE", "Nginx", "Apache", "JUnit", "TestNG", "Selenium",
    "Cypress", "Jest", "Mocha", "TeamCity", "GitLab CI", "GitHub Actions", "Maven",
    "Gradle", "npm", "Webpack", "Babel", "ESLint", "Prettier", "Docker Compose", "Helm",
    "Terraform", "Ansible", "Puppet", "Chef", "Prometheus", "Grafana", "ELK Stack", "Splunk",
    "Datadog", "New Relic", "JIRA", "Confluence", "Bitbucket", "Trello", "Asana",
];

/// Conversational and requirement-framing words that are not skills.
pub const STOP_WORDS: &[&str] = &[
    "Сможешь", "Уже", "Умеешь", "Знаешь", "Любишь", "Читаешь", "Имеешь", "Слышал",
    "Понимаешь", "Разбираешься", "Владеешь", "Знание", "Опыт", "Навык", "Требуется",
    "Требования", "Необходимо", "Желательно", "Приветствуется", "Будет", "Плюсом",
    "Хорошо", "Отлично", "Быстро", "Качественно", "Своевременно", "Эффективно",
    "Команда", "Работа", "Проект", "Задача", "Решение", "Мы", "Вы", "Ты", "Я",
    "Компания", "Офис", "Сотрудник", "Коллега", "Руководитель", "Менеджер",
];

/// Known skills plus stop words, with pre-compiled text scanners.
#[derive(Debug, Clone)]
pub struct SkillDictionary {
    /// Lowercased name -> canonical name.
    canonical: HashMap<String, String>,
    /// Lowercased stop words.
    stop_words: HashSet<String>,
    /// One word-boundary, case-insensitive pattern per known skill.
    scanners: Vec<(String, Regex)>,
}

impl SkillDictionary {
    /// Build a dictionary from explicit lists.
    pub fn new<K, S>(known: K, stop_words: S) -> Result<Self, Error>
    where
        K: IntoIterator,
        K::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        let mut dictionary = Self {
            canonical: HashMap::new(),
            stop_words: HashSet::new(),
            scanners: Vec::new(),
        };
        dictionary.add_known(known)?;
        dictionary.add_stop_words(stop_words);
        Ok(dictionary)
    }

    /// The built-in dictionary extended with extra entries.
    pub fn with_extras(extra_known: &[String], extra_stop_words: &[String]) -> Result<Self, Error> {
        let mut dictionary = Self::new(KNOWN_SKILLS.iter().copied(), STOP_WORDS.iter().copied())?;
        dictionary.add_known(extra_known.iter().cloned())?;
        dictionary.add_stop_words(extra_stop_words.iter().cloned());
        Ok(dictionary)
    }

    fn add_known<K>(&mut self, known: K) -> Result<(), Error>
    where
        K: IntoIterator,
        K::Item: Into<String>,
    {
        for skill in known {
            let skill: String = skill.into();
            let skill = skill.trim().to_string();
            let key = skill.to_lowercase();
            if skill.is_empty() || self.canonical.contains_key(&key) {
                continue;
            }

            // `\b` does not fire next to symbols like `+` or `#`, so the
            // boundary is spelled out as "not a word character".
            let pattern = format!(r"(?i)(?:^|[^\w]){}(?:$|[^\w])", regex::escape(&skill));
            let scanner = Regex::new(&pattern)
                .map_err(|e| Error::ParseFailed(format!("invalid skill pattern for {skill}: {e}")))?;

            self.canonical.insert(key, skill.clone());
            self.scanners.push((skill, scanner));
        }
        Ok(())
    }

    fn add_stop_words<S>(&mut self, stop_words: S)
    where
        S: IntoIterator,
        S::Item: Into<String>,
    {
        for word in stop_words {
            let word: String = word.into();
            self.stop_words.insert(word.trim().to_lowercase());
        }
    }

    /// Canonical casing of `skill` if it is a known skill.
    pub fn canonical(&self, skill: &str) -> Option<&str> {
        self.canonical.get(&skill.to_lowercase()).map(String::as_str)
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(&word.to_lowercase())
    }

    /// Known skills mentioned in free text, in dictionary order.
    pub fn scan(&self, text: &str) -> Vec<String> {
        self.scanners
            .iter()
            .filter(|(_, scanner)| scanner.is_match(text))
            .map(|(skill, _)| skill.clone())
            .collect()
    }

    /// Clean up raw skill strings.
    ///
    /// Stop words are dropped, known skills take their canonical casing,
    /// unknown entries survive only when longer than two characters, and the
    /// result is deduplicated case-insensitively in first-seen order.
    pub fn normalize<I>(&self, raw: I) -> Vec<String>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut skills = Vec::new();

        for entry in raw {
            let entry = entry.as_ref().trim();
            if entry.is_empty() || self.is_stop_word(entry) {
                continue;
            }

            let skill = match self.canonical(entry) {
                Some(canonical) => canonical.to_string(),
                None if entry.chars().count() > 2 => entry.to_string(),
                None => continue,
            };

            if seen.insert(skill.to_lowercase()) {
                skills.push(skill);
            }
        }

        skills
    }
}

/// Trim entries and drop blanks and case-insensitive duplicates, keeping
/// first-seen order.
pub fn dedup_case_insensitive<I>(raw: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut seen = HashSet::new();
    raw.into_iter()
        .map(|entry| entry.as_ref().trim().to_string())
        .filter(|entry| !entry.is_empty() && seen.insert(entry.to_lowercase()))
        .collect()
}
