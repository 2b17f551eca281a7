//! "N+ years" experience pattern.

use jobparse_core::Error;
use regex::Regex;

/// Finds an "N+ лет / года / years" requirement in free text.
#[derive(Debug, Clone)]
pub struct YearsPattern {
    re: Regex,
}

impl YearsPattern {
    pub fn new() -> Result<Self, Error> {
        let re = Regex::new(r"(?i)(\d+\+?)\s*(?:лет|год|years?\b)")
            .map_err(|e| Error::ParseFailed(format!("invalid experience pattern: {e}")))?;
        Ok(Self { re })
    }

    /// Normalized requirement (`"3+ лет"`) for the first match in `text`.
    pub fn find(&self, text: &str) -> Option<String> {
        self.re.captures(text).map(|caps| format!("{} лет", &caps[1]))
    }
}
