//! Application configuration with layered loading.
//!
//! Uses figment to merge, in order of increasing precedence:
//!
//! 1. Built-in defaults
//! 2. TOML config file (if JOBPARSE_CONFIG_FILE set)
//! 3. Environment variables (JOBPARSE_*)

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Desktop browser identity sent with every page request; the job boards
/// answer default client identifiers with captchas or 403s.
pub const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/96.0.4664.110 Safari/537.36";

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// User-Agent string for page requests.
    ///
    /// Set via JOBPARSE_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via JOBPARSE_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum page size to download.
    ///
    /// Set via JOBPARSE_MAX_BYTES environment variable.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// Skill names added to the built-in known-skill dictionary.
    #[serde(default)]
    pub extra_known_skills: Vec<String>,

    /// Phrases added to the built-in non-skill stop list.
    #[serde(default)]
    pub extra_stop_words: Vec<String>,

    /// Last-resort company name substrings for getmatch pages.
    #[serde(default = "default_getmatch_company_hints")]
    pub getmatch_company_hints: Vec<String>,

    /// Word that marks a getmatch block as a skill listing when the
    /// "Технологии" section is missing.
    #[serde(default = "default_getmatch_skill_anchor")]
    pub getmatch_skill_anchor: String,
}

fn default_user_agent() -> String {
    DESKTOP_USER_AGENT.into()
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_max_bytes() -> usize {
    5_242_880
}

fn default_getmatch_company_hints() -> Vec<String> {
    vec!["Иви".into()]
}

fn default_getmatch_skill_anchor() -> String {
    "Python".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            max_bytes: default_max_bytes(),
            extra_known_skills: Vec::new(),
            extra_stop_words: Vec::new(),
            getmatch_company_hints: default_getmatch_company_hints(),
            getmatch_skill_anchor: default_getmatch_skill_anchor(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file or environment cannot be
    /// parsed, or if validation fails after loading.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("JOBPARSE_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("JOBPARSE_")
                .ignore(&["config_file"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
