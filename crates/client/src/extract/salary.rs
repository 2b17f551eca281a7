//! Salary range and currency parsing.
//!
//! ### Bounds
//! Tried in order:
//! 1. A numeric range with a dash-family separator (`350 000 – 430 000`).
//! 2. `от X` / `до Y` markers, each independently.
//! 3. A single bare figure, interpreted by the site's [`SingleFigure`] policy.
//!
//! Amounts are de-formatted by dropping every non-digit, so thin, regular and
//! non-breaking space separators all parse the same.
//!
//! ### Currency
//! Resolved from symbols and words anywhere in the same text, independent of
//! the numeric parse. Latin codes (`RUB`, `USD`, `EUR`) only count when no
//! letter touches them, so `Ruby` or `Neural` never read as a currency.

use jobparse_core::{Currency, Error};
use regex::Regex;

/// A number with optional space-separated digit groups.
const AMOUNT: &str = r"\d(?:[\d\s]*\d)?";

/// How a lone figure without range or from/to markers is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingleFigure {
    /// The figure is a fixed salary: both bounds take it.
    Fixed,
    /// The figure is a lower bound; the upper bound stays empty.
    LowerBound,
}

/// Parsed salary bounds and currency.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Salary {
    pub from: Option<u64>,
    pub to: Option<u64>,
    pub currency: Option<Currency>,
}

/// Salary text parser with pre-compiled patterns.
#[derive(Debug, Clone)]
pub struct SalaryParser {
    range: Regex,
    from: Regex,
    to: Regex,
    bare: Regex,
    rub: Regex,
    usd: Regex,
    eur: Regex,
    single_figure: SingleFigure,
}

impl SalaryParser {
    pub fn new(single_figure: SingleFigure) -> Result<Self, Error> {
        Ok(Self {
            range: compile(&format!(r"({AMOUNT})\s*[-‐‑‒–—−]\s*({AMOUNT})"))?,
            from: compile(&format!(r"(?i)(?:\bот|\bfrom)\s*({AMOUNT})"))?,
            to: compile(&format!(r"(?i)(?:\bдо|\bto)\s*({AMOUNT})"))?,
            bare: compile(AMOUNT)?,
            rub: compile(&currency_pattern(r"₽|руб", "rub"))?,
            usd: compile(&currency_pattern(r"\$|доллар", "usd"))?,
            eur: compile(&currency_pattern(r"€|евро", "eur"))?,
            single_figure,
        })
    }

    /// Parse bounds and currency out of one salary text span.
    pub fn parse(&self, text: &str) -> Salary {
        let (from, to) = self.bounds(text);
        Salary { from, to, currency: self.detect_currency(text) }
    }

    /// Lower and upper bound of a salary text span.
    pub fn bounds(&self, text: &str) -> (Option<u64>, Option<u64>) {
        if let Some(caps) = self.range.captures(text) {
            let from = parse_amount(&caps[1]);
            let to = parse_amount(&caps[2]);
            if from.is_some() && to.is_some() {
                return (from, to);
            }
        }

        let from = self.from.captures(text).and_then(|caps| parse_amount(&caps[1]));
        let to = self.to.captures(text).and_then(|caps| parse_amount(&caps[1]));
        if from.is_some() || to.is_some() {
            return (from, to);
        }

        let Some(figure) = self.bare.find(text).and_then(|m| parse_amount(m.as_str())) else {
            return (None, None);
        };

        match self.single_figure {
            SingleFigure::Fixed => (Some(figure), Some(figure)),
            SingleFigure::LowerBound => (Some(figure), None),
        }
    }

    /// Normalize the first recognized currency marker in `text`.
    ///
    /// Rubles are checked first, then dollars, then euros.
    pub fn detect_currency(&self, text: &str) -> Option<Currency> {
        if self.rub.is_match(text) {
            Some(Currency::Rub)
        } else if self.usd.is_match(text) {
            Some(Currency::Usd)
        } else if self.eur.is_match(text) {
            Some(Currency::Eur)
        } else {
            None
        }
    }

    /// Whether the text mentions any currency this parser understands.
    pub fn has_currency_marker(&self, text: &str) -> bool {
        self.detect_currency(text).is_some()
    }
}

/// Symbols and Cyrillic roots match anywhere; the Latin code must not touch
/// another letter, so digits may still run into it (`300000RUB`).
fn currency_pattern(markers: &str, code: &str) -> String {
    format!(r"(?i){markers}|(?:^|\P{{L}}){code}(?:\P{{L}}|$)")
}

fn compile(pattern: &str) -> Result<Regex, Error> {
    Regex::new(pattern).map_err(|e| Error::ParseFailed(format!("invalid salary pattern: {e}")))
}

/// Convert a formatted amount (`"350 000"`, `"1\u{a0}200\u{a0}000"`) to an integer.
fn parse_amount(raw: &str) -> Option<u64> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}
