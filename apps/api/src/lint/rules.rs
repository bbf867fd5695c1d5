//! Pure checkers. Each one reads its input and returns a verdict; none mutates anything,
//! and the same input always yields the same output.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::lint::passive::PassiveVoiceDetector;
use crate::lint::segmenter::starts_bullet;
use crate::lint::vocabulary::{is_bullet_glyph, ACHIEVEMENT_VERBS, STRONG_ACTION_VERBS, WEAK_PHRASES};

pub const BULLET_WORD_LIMIT: usize = 25;
pub const SENTENCE_WORD_LIMIT: usize = 20;

/// Punctuation an ATS parser copes with, besides letters, digits, whitespace and glyphs.
const ATS_SAFE_PUNCTUATION: &str = ",.!?:;'-•*#@%$()/\\\"";

static HTML_IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<img\b[^>]*>").expect("valid img regex"));

static HTML_TABLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<table\b[^>]*>").expect("valid table regex"));

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w+\b").expect("valid word regex"));

/// Patterns that signal a measurable achievement.
static ACHIEVEMENT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\d+\s*%",
        r"(?i)\$\s*\d+",
        r"(?i)\b\d+\s*x\b",
        r"(?i)\bby\s+\d+",
        r"(?i)\bimproved\s+\w+\s+by\s+\d+",
        r"(?i)\bincreased\s+\w+\s+by\s+\d+",
        r"(?i)\breduced\s+\w+\s+by\s+\d+",
        r"(?i)\bgenerated\s+\$?\d+",
        r"(?i)\bteam\s+of\s+\d+",
        r"(?i)\b\d+\s+hours\b",
        r"(?i)\b\d+\s+members\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid achievement regex"))
    .collect()
});

pub fn passive_voice(detector: &dyn PassiveVoiceDetector, text: &str) -> bool {
    detector.is_passive(text)
}

/// First weak phrase (in list order) found case-insensitively in the text.
pub fn weak_phrase(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    WEAK_PHRASES.iter().copied().find(|p| lower.contains(p))
}

/// True iff no ASCII digit appears anywhere in the text.
pub fn missing_numbers(text: &str) -> bool {
    !text.chars().any(|c| c.is_ascii_digit())
}

/// True if the text runs past the word limit for its kind (bullet vs plain sentence).
pub fn sentence_length(text: &str) -> bool {
    let is_bullet = starts_bullet(text.trim_start());
    sentence_length_with(text, is_bullet, BULLET_WORD_LIMIT, SENTENCE_WORD_LIMIT)
}

/// `is_bullet` comes from segmentation, so numbered and lettered bullets get the bullet limit.
pub fn sentence_length_with(text: &str, is_bullet: bool, bullet_limit: usize, sentence_limit: usize) -> bool {
    let words = text.split_whitespace().count();
    if is_bullet {
        words > bullet_limit
    } else {
        words > sentence_limit
    }
}

fn is_ats_safe(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c.is_whitespace()
        || ATS_SAFE_PUNCTUATION.contains(c)
        || is_bullet_glyph(c)
}

/// True if the document embeds HTML images/tables or characters outside the ATS-safe set.
pub fn ats_unfriendly(document_text: &str) -> bool {
    HTML_IMAGE.is_match(document_text)
        || HTML_TABLE.is_match(document_text)
        || document_text.chars().any(|c| !is_ats_safe(c))
}

/// Characters that trip `ats_unfriendly`, deduplicated, in order of appearance.
pub fn ats_offending_chars(document_text: &str) -> Vec<char> {
    let mut seen = HashSet::new();
    document_text
        .chars()
        .filter(|c| !is_ats_safe(*c))
        .filter(|c| seen.insert(*c))
        .collect()
}

pub fn has_bullet_points(document_text: &str) -> bool {
    document_text.lines().map(str::trim).any(starts_bullet)
}

/// Distinct strong action verbs present as whole words, in vocabulary order.
pub fn strong_action_verbs(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let words: HashSet<&str> = WORD.find_iter(&lower).map(|m| m.as_str()).collect();
    STRONG_ACTION_VERBS
        .iter()
        .filter(|verb| words.contains(*verb))
        .map(|verb| verb.to_string())
        .collect()
}

pub fn has_quantifiable_achievements(text: &str) -> bool {
    ACHIEVEMENT_PATTERNS.iter().any(|re| re.is_match(text))
}

/// Up to `limit` snippets showing matched achievements with ~20 characters of context.
pub fn quantifiable_examples(text: &str, limit: usize) -> Vec<String> {
    let mut examples = Vec::new();
    for re in ACHIEVEMENT_PATTERNS.iter() {
        for m in re.find_iter(text).take(2) {
            let start = text[..m.start()]
                .char_indices()
                .rev()
                .nth(19)
                .map(|(i, _)| i)
                .unwrap_or(0);
            let end = text[m.end()..]
                .char_indices()
                .nth(20)
                .map(|(i, _)| m.end() + i)
                .unwrap_or(text.len());
            let mut snippet = text[start..end].split_whitespace().collect::<Vec<_>>().join(" ");
            if start > 0 {
                snippet.insert_str(0, "...");
            }
            if end < text.len() {
                snippet.push_str("...");
            }
            if !examples.contains(&snippet) {
                examples.push(snippet);
            }
            if examples.len() >= limit {
                return examples;
            }
        }
    }
    examples
}

pub fn contains_achievement_verb(text: &str) -> bool {
    let lower = text.to_lowercase();
    ACHIEVEMENT_VERBS.iter().any(|v| lower.contains(v))
}
