//! Work format classification by keyword roots.

use jobparse_core::WorkFormat;

const REMOTE_ROOTS: &[&str] = &["удал", "remote"];
const OFFICE_ROOTS: &[&str] = &["офис", "office"];
const HYBRID_ROOTS: &[&str] = &["гибрид", "hybrid"];

fn mentions(lower: &str, roots: &[&str]) -> bool {
    roots.iter().any(|root| lower.contains(root))
}

/// Classify free text into a work format.
///
/// Priority when several keywords co-occur: remote, then office and hybrid
/// together (hybrid), then office, then hybrid.
pub fn classify(text: &str) -> Option<WorkFormat> {
    let lower = text.to_lowercase();
    let office = mentions(&lower, OFFICE_ROOTS);
    let hybrid = mentions(&lower, HYBRID_ROOTS);

    if mentions(&lower, REMOTE_ROOTS) {
        Some(WorkFormat::Remote)
    } else if office && hybrid {
        Some(WorkFormat::Hybrid)
    } else if office {
        Some(WorkFormat::Office)
    } else if hybrid {
        Some(WorkFormat::Hybrid)
    } else {
        None
    }
}

/// Whether the text contains any work format keyword.
pub fn has_keyword(text: &str) -> bool {
    classify(text).is_some()
}

/// Classify a location element's text, falling back to the raw text when no
/// keyword matches.
pub fn from_location(text: &str) -> Option<WorkFormat> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    classify(trimmed).or_else(|| Some(WorkFormat::Other(trimmed.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_wins_over_everything() {
        assert_eq!(classify("Можно удалённо"), Some(WorkFormat::Remote));
        assert_eq!(classify("Офис или удаленно, возможен гибрид"), Some(WorkFormat::Remote));
        assert_eq!(classify("Remote / office"), Some(WorkFormat::Remote));
    }

    #[test]
    fn test_office_and_hybrid_is_hybrid() {
        assert_eq!(classify("Офис, гибрид"), Some(WorkFormat::Hybrid));
        assert_eq!(classify("office or hybrid"), Some(WorkFormat::Hybrid));
    }

    #[test]
    fn test_single_keywords() {
        assert_eq!(classify("Москва, ОФИС"), Some(WorkFormat::Office));
        assert_eq!(classify("Гибридный формат"), Some(WorkFormat::Hybrid));
        assert_eq!(classify("Москва"), None);
    }

    #[test]
    fn test_from_location_keeps_raw_text() {
        assert_eq!(from_location("  Санкт-Петербург "), Some(WorkFormat::Other("Санкт-Петербург".into())));
        assert_eq!(from_location("Москва • Можно удаленно"), Some(WorkFormat::Remote));
        assert_eq!(from_location("   "), None);
    }

    #[test]
    fn test_has_keyword() {
        assert!(has_keyword("Формат работы: гибрид"));
        assert!(!has_keyword("Полная занятость"));
    }
}
