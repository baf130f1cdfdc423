//! Accent- and case-insensitive text folding
//!
//! Text is lowercased, decomposed (NFD) and stripped of combining marks, so
//! "Économie", "economie" and "ECONOMIE" all fold to "economie".

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fold text for matching. Idempotent; empty input gives an empty string.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Substring containment on folded text.
///
/// `needle` must already be folded with [`normalize`]; an empty needle matches everything.
pub fn contains_normalized(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || normalize(haystack).contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_accents_and_case() {
        assert_eq!(normalize("Économie"), "economie");
        assert_eq!(normalize("ECONOMIE"), "economie");
        assert_eq!(normalize("Palais de l'Élysée"), "palais de l'elysee");
        assert_eq!(normalize("Œuvres d'art"), "œuvres d'art");
    }

    #[test]
    fn test_decomposed_input() {
        // "é" written as e + U+0301
        assert_eq!(normalize("e\u{301}te\u{301}"), "ete");
    }

    #[test]
    fn test_empty() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_idempotent_on_samples() {
        for sample in ["Hôtel de Matignon", "İstanbul", "ΣΟΦΊΑ", "Ångström", "Ǆemal"] {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "sample {sample}");
        }
    }

    #[test]
    fn test_contains_normalized() {
        assert!(contains_normalized("Hôtel de Matignon", "matignon"));
        assert!(contains_normalized("Hôtel de Matignon", "hotel"));
        assert!(contains_normalized("Hôtel de Matignon", ""));
        assert!(!contains_normalized("Hôtel de Matignon", "elysee"));
        assert!(!contains_normalized("", "a"));
    }
}
