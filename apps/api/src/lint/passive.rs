//! Passive-voice detection capability.
//!
//! The default `HeuristicPassiveDetector` is an APPROXIMATION of dependency-parse based
//! detection (an `auxpass` relation). It flags a form of "to be" followed (optionally across
//! one adverb) by a past participle, and "was/were" followed by an -ing verb. It is looser
//! than a real parser: adjectival participles ("was interested") are also flagged. Plug a
//! parser-backed implementation in through the trait when one is available.

use once_cell::sync::Lazy;
use regex::Regex;

/// Pluggable passive-voice capability. Implementations must be pure.
pub trait PassiveVoiceDetector: Send + Sync {
    fn is_passive(&self, text: &str) -> bool;
}

static BE_PARTICIPLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:am|is|are|was|were|be|been|being)\s+(?:\w+ly\s+)?([a-z]+)\b")
        .expect("valid passive regex")
});

static WAS_PROGRESSIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:was|were)\s+([a-z]{2,}ing)\b").expect("valid progressive regex")
});

/// Irregular past participles that do not end in -ed.
const IRREGULAR_PARTICIPLES: &[&str] = &[
    "built", "done", "driven", "given", "grown", "held", "kept", "known", "led", "made",
    "paid", "run", "seen", "sent", "set", "shown", "sold", "spent", "taken", "taught",
    "told", "thought", "brought", "bought", "chosen", "written", "won", "begun", "broken",
    "found", "got", "gotten", "hired", "put", "read", "tasked", "asked", "involved",
];

/// -ed words that are not participles.
const NON_PARTICIPLE_ED: &[&str] = &["need", "speed", "seed", "feed", "bed", "red", "shed", "hundred", "embed", "indeed"];

/// -ing words after was/were that are adjectives or nouns, not progressive verbs.
const NON_PROGRESSIVE_ING: &[&str] = &[
    "willing", "amazing", "interesting", "outstanding", "exciting", "challenging",
    "demanding", "engaging", "promising", "rewarding", "ongoing", "existing", "nothing",
    "something", "anything", "everything", "during", "thing", "king", "missing",
];

fn is_past_participle(word: &str) -> bool {
    let word = word.to_lowercase();
    if IRREGULAR_PARTICIPLES.contains(&word.as_str()) {
        return true;
    }
    word.len() > 3
        && word.ends_with("ed")
        && !word.ends_with("eed")
        && !NON_PARTICIPLE_ED.contains(&word.as_str())
}

#[derive(Debug, Clone, Default)]
pub struct HeuristicPassiveDetector;

impl PassiveVoiceDetector for HeuristicPassiveDetector {
    fn is_passive(&self, text: &str) -> bool {
        let participle = BE_PARTICIPLE
            .captures_iter(text)
            .any(|caps| caps.get(1).map(|m| is_past_participle(m.as_str())).unwrap_or(false));
        if participle {
            return true;
        }
        WAS_PROGRESSIVE.captures_iter(text).any(|caps| {
            caps.get(1)
                .map(|m| !NON_PROGRESSIVE_ING.contains(&m.as_str().to_lowercase().as_str()))
                .unwrap_or(false)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passive(text: &str) -> bool {
        HeuristicPassiveDetector.is_passive(text)
    }

    #[test]
    fn test_regular_passive_detected() {
        assert!(passive("The report was completed by the team"));
        assert!(passive("All deliverables were reviewed weekly"));
    }

    #[test]
    fn test_adverb_between_aux_and_participle() {
        assert!(passive("The system was quickly deployed to production"));
    }

    #[test]
    fn test_irregular_participle() {
        assert!(passive("The new service was built in Rust"));
        assert!(passive("I was tasked with the migration"));
    }

    #[test]
    fn test_was_progressive_detected() {
        assert!(passive("Was making sure all deliverables shipped"));
        assert!(passive("We were developing the mobile app"));
    }

    #[test]
    fn test_active_voice_not_flagged() {
        assert!(!passive("Led a team of 6 engineers"));
        assert!(!passive("Reduced costs by 30%"));
        assert!(!passive("Built the ingestion pipeline"));
    }

    #[test]
    fn test_adjectival_ing_not_flagged() {
        assert!(!passive("The role was challenging and rewarding"));
        assert!(!passive("She was willing to relocate"));
    }

    #[test]
    fn test_eed_words_not_participles() {
        assert!(!passive("The goal was speed"));
        assert!(!is_past_participle("exceed"));
        assert!(is_past_participle("Improved"));
    }
}
