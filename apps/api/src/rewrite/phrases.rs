//! Substitution tables for the deterministic rewriter, applied in three passes:
//! weak phrase → strong verb, redundant verb pair collapse, redundant phrase clean-up.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Weak phrase → strong verb. Matched longest-first so "was responsible for" wins over
/// "responsible for".
pub const WEAK_PHRASE_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("was responsible for", "managed"),
    ("responsible for", "managed"),
    ("was in charge of", "led"),
    ("in charge of", "led"),
    ("was helping with", "contributed to"),
    ("helped with", "contributed to"),
    ("was working on", "developed"),
    ("worked on", "developed"),
    ("duties included", "delivered"),
    ("assisted in", "supported"),
    ("assisted with", "facilitated"),
    ("was making sure", "ensured"),
    ("was ensuring that", "ensured"),
    ("making sure", "ensuring"),
    ("was tasked with", "executed"),
    ("participated in", "contributed to"),
    ("was involved in", "played a key role in"),
    ("took part in", "collaborated on"),
];

/// Verb pairs that substitution and tense normalisation can stack up.
pub const REDUNDANT_VERB_PAIRS: &[(&str, &str)] = &[
    ("managed leading", "led"),
    ("led managing", "managed"),
    ("managed managing", "oversaw"),
    ("contributed to improving", "improved"),
    ("developed implementing", "implemented"),
    ("managed handling", "handled"),
    ("contributed to developing", "developed"),
    ("managed coordinating", "coordinated"),
    ("led leading", "directed"),
];

pub const REDUNDANT_PHRASES: &[(&str, &str)] = &[
    ("in order to", "to"),
    ("in an effort to", "to"),
    ("and did everything that was required to", "to"),
    ("and making sure everything was completed", "and completed all tasks"),
    ("that were specified by", "from"),
    ("making sure that", "ensuring"),
];

fn phrase_pattern(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+")
}

fn normalize_key(matched: &str) -> String {
    matched.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// Capitalises the replacement if the matched span started uppercase.
pub fn match_case(matched: &str, replacement: &str) -> String {
    let upper = matched.chars().next().map(char::is_uppercase).unwrap_or(false);
    if !upper {
        return replacement.to_string();
    }
    let mut chars = replacement.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// One alternation over every phrase in a table, longest first, with a lookup back to
/// the replacement.
struct PhraseTable {
    regex: Regex,
    replacements: HashMap<String, &'static str>,
}

impl PhraseTable {
    fn build(table: &'static [(&'static str, &'static str)]) -> Self {
        let mut phrases: Vec<&(&str, &str)> = table.iter().collect();
        phrases.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        let alternation = phrases
            .iter()
            .map(|(phrase, _)| phrase_pattern(phrase))
            .collect::<Vec<_>>()
            .join("|");
        let regex = Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).expect("valid phrase table regex");
        let replacements = table.iter().map(|(p, r)| (p.to_string(), *r)).collect();
        Self { regex, replacements }
    }

    /// Replaces every match, returning the new text and the number of replacements.
    fn apply(&self, text: &str) -> (String, usize) {
        let mut count = 0;
        let out = self.regex.replace_all(text, |caps: &Captures| {
            let matched = &caps[0];
            match self.replacements.get(&normalize_key(matched)) {
                Some(replacement) => {
                    count += 1;
                    match_case(matched, replacement)
                }
                None => matched.to_string(),
            }
        });
        (out.into_owned(), count)
    }
}

static WEAK_PHRASE_TABLE: Lazy<PhraseTable> = Lazy::new(|| PhraseTable::build(WEAK_PHRASE_SUBSTITUTIONS));
static VERB_PAIR_TABLE: Lazy<PhraseTable> = Lazy::new(|| PhraseTable::build(REDUNDANT_VERB_PAIRS));
static REDUNDANT_PHRASE_TABLE: Lazy<PhraseTable> = Lazy::new(|| PhraseTable::build(REDUNDANT_PHRASES));

pub fn substitute_weak_phrases(text: &str) -> (String, usize) {
    WEAK_PHRASE_TABLE.apply(text)
}

pub fn collapse_verb_pairs(text: &str) -> String {
    VERB_PAIR_TABLE.apply(text).0
}

pub fn remove_redundant_phrases(text: &str) -> String {
    REDUNDANT_PHRASE_TABLE.apply(text).0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longest_match_wins() {
        let (out, n) = substitute_weak_phrases("• Was responsible for developing and maintaining the company website");
        assert_eq!(out, "• Managed developing and maintaining the company website");
        assert_eq!(n, 1);
    }

    #[test]
    fn test_lowercase_match_stays_lowercase() {
        let (out, _) = substitute_weak_phrases("• Team lead, in charge of hiring");
        assert_eq!(out, "• Team lead, led hiring");
    }

    #[test]
    fn test_multiple_phrases_in_one_line() {
        let (out, n) = substitute_weak_phrases(
            "• Was in charge of coordinating activities and was making sure everything ran smoothly",
        );
        assert_eq!(out, "• Led coordinating activities and ensured everything ran smoothly");
        assert_eq!(n, 2);
    }

    #[test]
    fn test_phrase_needs_word_boundaries() {
        let (out, n) = substitute_weak_phrases("• Coworked onboarding flows");
        assert_eq!(out, "• Coworked onboarding flows");
        assert_eq!(n, 0);
    }

    #[test]
    fn test_irregular_spacing_still_matches() {
        let (out, _) = substitute_weak_phrases("- Worked  on the billing API");
        assert_eq!(out, "- Developed the billing API");
    }

    #[test]
    fn test_collapse_verb_pairs() {
        assert_eq!(collapse_verb_pairs("• Managed leading the migration"), "• Led the migration");
        assert_eq!(
            collapse_verb_pairs("contributed to improving onboarding"),
            "improved onboarding"
        );
    }

    #[test]
    fn test_remove_redundant_phrases() {
        assert_eq!(
            remove_redundant_phrases("Refactored jobs in order to cut latency"),
            "Refactored jobs to cut latency"
        );
    }

    #[test]
    fn test_match_case() {
        assert_eq!(match_case("Worked on", "developed"), "Developed");
        assert_eq!(match_case("worked on", "developed"), "developed");
    }
}
