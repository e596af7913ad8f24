//! Locale-aware text ordering
//!
//! Text is compared in three passes, the way dictionary collation does:
//! 1. base letters (Unicode NFD, combining marks stripped, case folded)
//! 2. accents (unaccented before accented)
//! 3. case (lowercase before uppercase)
//!
//! A final code-point comparison keeps the order total.

use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Precomputed comparison key for a piece of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollationKey {
    primary: String,
    secondary: String,
    raw: String,
}

impl CollationKey {
    pub fn new(text: &str) -> Self {
        let primary = text
            .nfd()
            .filter(|c| !is_combining_mark(*c))
            .flat_map(char::to_lowercase)
            .collect();
        let secondary = text.nfd().flat_map(char::to_lowercase).collect();
        Self {
            primary,
            secondary,
            raw: text.to_string(),
        }
    }
}

impl Ord for CollationKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.primary
            .cmp(&other.primary)
            .then_with(|| self.secondary.cmp(&other.secondary))
            .then_with(|| case_pattern(&self.raw).cmp(case_pattern(&other.raw)))
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialOrd for CollationKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn case_pattern(text: &str) -> impl Iterator<Item = bool> + '_ {
    text.chars().map(char::is_uppercase)
}

/// Compare two strings with locale-aware ordering
pub fn compare_text(a: &str, b: &str) -> Ordering {
    CollationKey::new(a).cmp(&CollationKey::new(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut words: Vec<&str>) -> Vec<&str> {
        words.sort_by(|a, b| compare_text(a, b));
        words
    }

    #[test]
    fn test_case_does_not_dominate() {
        assert_eq!(sorted(vec!["bob", "Amy", "carl"]), vec!["Amy", "bob", "carl"]);
    }

    #[test]
    fn test_accented_letters_sort_with_base_letter() {
        assert_eq!(
            sorted(vec!["Zoe", "Émile", "Eva", "Dan"]),
            vec!["Dan", "Émile", "Eva", "Zoe"]
        );
    }

    #[test]
    fn test_unaccented_before_accented() {
        assert_eq!(compare_text("resume", "résumé"), Ordering::Less);
    }

    #[test]
    fn test_lowercase_before_uppercase_on_tie() {
        assert_eq!(compare_text("amy", "Amy"), Ordering::Less);
        assert_eq!(compare_text("Amy", "Amy"), Ordering::Equal);
    }

    #[test]
    fn test_precomposed_and_decomposed_differ_only_at_last_pass() {
        let precomposed = "\u{e9}";
        let decomposed = "e\u{301}";
        assert_ne!(compare_text(precomposed, decomposed), Ordering::Equal);
        assert_eq!(
            CollationKey::new(precomposed).primary,
            CollationKey::new(decomposed).primary
        );
    }
}
