//! Normalized vacancy record shared by every site parser.

use std::borrow::Cow;
use std::fmt;

use chrono::Utc;
use schemars::{JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title used when no heading matches.
pub const UNKNOWN_TITLE: &str = "Неизвестная вакансия";

/// Company used when no company element matches.
pub const UNKNOWN_COMPANY: &str = "Неизвестная компания";

/// Salary currency, normalized where the marker is recognized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Currency {
    Rub,
    Usd,
    Eur,
    /// Marker that did not map to a known currency, kept verbatim.
    Other(String),
}

impl Currency {
    pub fn as_str(&self) -> &str {
        match self {
            Currency::Rub => "RUB",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Other(raw) => raw,
        }
    }
}

impl From<String> for Currency {
    fn from(value: String) -> Self {
        match value.as_str() {
            "RUB" => Currency::Rub,
            "USD" => Currency::Usd,
            "EUR" => Currency::Eur,
            _ => Currency::Other(value),
        }
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        match value {
            Currency::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl JsonSchema for Currency {
    fn schema_name() -> Cow<'static, str> {
        "Currency".into()
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        String::json_schema(generator)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the work happens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WorkFormat {
    Remote,
    Office,
    Hybrid,
    /// Location text that matched none of the keywords.
    Other(String),
}

impl WorkFormat {
    pub fn as_str(&self) -> &str {
        match self {
            WorkFormat::Remote => "Remote",
            WorkFormat::Office => "Office",
            WorkFormat::Hybrid => "Hybrid",
            WorkFormat::Other(raw) => raw,
        }
    }
}

impl From<String> for WorkFormat {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Remote" => WorkFormat::Remote,
            "Office" => WorkFormat::Office,
            "Hybrid" => WorkFormat::Hybrid,
            _ => WorkFormat::Other(value),
        }
    }
}

impl From<WorkFormat> for String {
    fn from(value: WorkFormat) -> Self {
        match value {
            WorkFormat::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl JsonSchema for WorkFormat {
    fn schema_name() -> Cow<'static, str> {
        "WorkFormat".into()
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        String::json_schema(generator)
    }
}

impl fmt::Display for WorkFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A job posting normalized into the same shape regardless of source site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VacancyRecord {
    /// Freshly generated identifier, unrelated to the site's own id.
    pub id: Uuid,
    /// Site-native listing id taken from the URL path.
    pub original_id: Option<String>,
    pub title: String,
    pub company: String,
    pub description: String,
    pub salary_from: Option<u64>,
    pub salary_to: Option<u64>,
    pub currency: Option<Currency>,
    pub experience: Option<String>,
    pub skills: Vec<String>,
    pub work_format: Option<WorkFormat>,
    /// The input URL, unmodified.
    pub url: String,
}

/// Response envelope returned by the transport layer.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VacancyResponse {
    pub vacancy_id: Uuid,
    pub vacancy: VacancyRecord,
    pub status: String,
    pub message: String,
    /// RFC 3339 timestamp of when the page was parsed.
    pub parsed_at: String,
}

impl VacancyResponse {
    pub fn success(vacancy: VacancyRecord) -> Self {
        Self {
            vacancy_id: vacancy.id,
            vacancy,
            status: "success".into(),
            message: "Вакансия успешно загружена".into(),
            parsed_at: Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        }
    }
}
