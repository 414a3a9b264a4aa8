//! Term matcher
//!
//! Finds accent- and case-insensitive literal occurrences of terms and
//! reports them in original-text character offsets.

use tracing::trace;

use crate::core::model::{Match, MatchSet};
use crate::core::normalize::{fold, NormalizedText};

/// Absent, empty and whitespace-only strings are blank
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Scan a prebuilt folded view for one term.
///
/// Occurrences are non-overlapping and reported left to right: after a hit
/// the scan resumes right after its end.
pub fn scan(text: &NormalizedText, term: &str) -> Vec<Match> {
    if is_blank(term) {
        return Vec::new();
    }
    let needle = fold(term);
    if needle.is_empty() {
        return Vec::new();
    }

    let mut matches = Vec::new();
    let mut from = 0;
    let mut last_end = 0;

    while let Some(pos) = text.find_from(&needle, from) {
        let (start, end) = text.source_span(pos, needle.len());
        // Two hits inside one expanded character map to the same span
        if start >= last_end {
            matches.push(Match::new(start, end - start));
            last_end = end;
        }
        from = pos + needle.len();
    }

    trace!(term, count = matches.len(), "scanned term");
    matches
}

/// Find every occurrence of `term` in `text`
pub fn find_matches(text: &str, term: &str) -> MatchSet {
    if is_blank(text) || is_blank(term) {
        return MatchSet::new();
    }
    let normalized = NormalizedText::new(text);
    MatchSet::from_unsorted(scan(&normalized, term))
}

/// Find occurrences of several terms, merged and sorted by start.
///
/// Each term is matched independently; matches of different terms may
/// overlap. The text is folded once for all terms.
pub fn find_matches_multi<S: AsRef<str>>(text: &str, terms: &[S]) -> MatchSet {
    if is_blank(text) || terms.is_empty() {
        return MatchSet::new();
    }
    let normalized = NormalizedText::new(text);
    let matches = terms
        .iter()
        .flat_map(|term| scan(&normalized, term.as_ref()))
        .collect();
    MatchSet::from_unsorted(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(set: &MatchSet) -> Vec<(usize, usize)> {
        set.iter().map(|m| (m.start, m.len)).collect()
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("  \t\n"));
        assert!(!is_blank(" a "));
    }

    #[test]
    fn test_single_match() {
        assert_eq!(spans(&find_matches("the cat sat", "cat")), vec![(4, 3)]);
    }

    #[test]
    fn test_repeated_term_non_overlapping() {
        assert_eq!(
            spans(&find_matches("cat cat cat", "cat")),
            vec![(0, 3), (4, 3), (8, 3)]
        );
        // "aaaa" holds two non-overlapping "aa", not three
        assert_eq!(spans(&find_matches("aaaa", "aa")), vec![(0, 2), (2, 2)]);
        assert_eq!(spans(&find_matches("aaa", "aa")), vec![(0, 2)]);
    }

    #[test]
    fn test_case_and_accent_insensitive() {
        assert_eq!(spans(&find_matches("Café society", "cafe")), vec![(0, 4)]);
        assert_eq!(spans(&find_matches("cafe society", "CAFÉ")), vec![(0, 4)]);
        assert_eq!(
            spans(&find_matches("Ação e reação", "acao")),
            vec![(0, 4), (9, 4)]
        );
    }

    #[test]
    fn test_length_measured_in_original_chars() {
        // "Straße" is 6 chars even though it folds to 7
        assert_eq!(spans(&find_matches("Straße 1", "strasse")), vec![(0, 6)]);
        assert_eq!(spans(&find_matches("x Straße", "STRASSE")), vec![(2, 6)]);
    }

    #[test]
    fn test_expanded_char_matched_once() {
        assert_eq!(spans(&find_matches("ß", "s")), vec![(0, 1)]);
        assert_eq!(spans(&find_matches("aßa", "s")), vec![(1, 1)]);
    }

    #[test]
    fn test_decomposed_accent_included_in_span() {
        // 'e' + COMBINING ACUTE ACCENT
        assert_eq!(
            spans(&find_matches("cafe\u{0301} noir", "café")),
            vec![(0, 5)]
        );
    }

    #[test]
    fn test_term_is_literal_not_pattern() {
        assert!(find_matches("hello", ".").is_empty());
        assert_eq!(spans(&find_matches("a.b", ".")), vec![(1, 1)]);
        assert_eq!(spans(&find_matches("(x)", "(")), vec![(0, 1)]);
    }

    #[test]
    fn test_blank_text_or_term() {
        assert!(find_matches("", "cat").is_empty());
        assert!(find_matches("   ", "cat").is_empty());
        assert!(find_matches("cat", "").is_empty());
        assert!(find_matches("cat", "  ").is_empty());
        assert!(find_matches("cat", "\u{0301}").is_empty());
    }

    #[test]
    fn test_no_match() {
        assert!(find_matches("hello world", "xyz").is_empty());
    }

    #[test]
    fn test_term_with_spaces() {
        assert_eq!(
            spans(&find_matches("a black cat", "black cat")),
            vec![(2, 9)]
        );
    }

    #[test]
    fn test_multi_sorted_regardless_of_term_order() {
        assert_eq!(
            spans(&find_matches_multi("a dog and a cat", &["cat", "dog"])),
            vec![(2, 3), (12, 3)]
        );
    }

    #[test]
    fn test_multi_keeps_overlaps_and_duplicates() {
        let set = find_matches_multi("abcd", &["abc", "bc", "abc"]);
        assert_eq!(spans(&set), vec![(0, 3), (0, 3), (1, 2)]);
    }

    #[test]
    fn test_multi_equal_starts_keep_term_order() {
        let set = find_matches_multi("catalog", &["catalog", "cat"]);
        assert_eq!(spans(&set), vec![(0, 7), (0, 3)]);
    }

    #[test]
    fn test_multi_skips_blank_terms() {
        let set = find_matches_multi("cat", &["", "cat", "  "]);
        assert_eq!(spans(&set), vec![(0, 3)]);
        let none: [&str; 0] = [];
        assert!(find_matches_multi("cat", &none).is_empty());
    }
}
