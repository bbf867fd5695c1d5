//! Past-tense normalisation for "was/were X-ing" progressive constructions.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::rewrite::phrases::match_case;

static PROGRESSIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:was|were)\s+([a-z]+ing)\b").expect("valid progressive regex"));

const IRREGULAR: &[(&str, &str)] = &[
    ("beginning", "began"),
    ("bringing", "brought"),
    ("building", "built"),
    ("buying", "bought"),
    ("choosing", "chose"),
    ("cutting", "cut"),
    ("doing", "did"),
    ("driving", "drove"),
    ("feeling", "felt"),
    ("finding", "found"),
    ("getting", "got"),
    ("giving", "gave"),
    ("growing", "grew"),
    ("holding", "held"),
    ("keeping", "kept"),
    ("leading", "led"),
    ("leaving", "left"),
    ("making", "made"),
    ("meeting", "met"),
    ("overseeing", "oversaw"),
    ("paying", "paid"),
    ("putting", "put"),
    ("running", "ran"),
    ("saying", "said"),
    ("seeing", "saw"),
    ("selling", "sold"),
    ("sending", "sent"),
    ("setting", "set"),
    ("speaking", "spoke"),
    ("spending", "spent"),
    ("standing", "stood"),
    ("taking", "took"),
    ("teaching", "taught"),
    ("telling", "told"),
    ("thinking", "thought"),
    ("understanding", "understood"),
    ("winning", "won"),
    ("writing", "wrote"),
];

/// -ing words after was/were that are adjectives or nouns, never rewritten.
const NOT_PROGRESSIVE: &[&str] = &[
    "amazing", "anything", "being", "boring", "challenging", "charming", "demanding",
    "during", "engaging", "everything", "exciting", "existing", "interesting", "king",
    "missing", "nothing", "ongoing", "outstanding", "promising", "rewarding", "something",
    "surprising", "thing", "willing",
];

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Past tense of an -ing form, or `None` when the word is not an unambiguous verb.
pub fn past_tense(word: &str) -> Option<String> {
    let lower = word.to_lowercase();
    if NOT_PROGRESSIVE.contains(&lower.as_str()) {
        return None;
    }
    if let Some((_, past)) = IRREGULAR.iter().find(|(ing, _)| *ing == lower) {
        return Some(past.to_string());
    }

    let stem = lower.strip_suffix("ing")?;
    if stem.chars().count() < 3 {
        return None;
    }

    let mut chars = stem.chars().rev();
    let last = chars.next()?;
    let before = chars.next()?;

    let past = if last == 'y' && !is_vowel(before) {
        format!("{}ied", &stem[..stem.len() - 1])
    } else if last == 'e' {
        format!("{stem}d")
    } else {
        // "manag" → "managed", "plann" → "planned", "develop" → "developed"
        format!("{stem}ed")
    };
    Some(past)
}

/// Rewrites every unambiguous "was/were X-ing" to the simple past, keeping the case of
/// the auxiliary's first letter.
pub fn normalize_progressive(text: &str) -> String {
    PROGRESSIVE
        .replace_all(text, |caps: &Captures| match past_tense(&caps[1]) {
            Some(past) => match_case(&caps[0], &past),
            None => caps[0].to_string(),
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_verbs() {
        assert_eq!(past_tense("managing").as_deref(), Some("managed"));
        assert_eq!(past_tense("developing").as_deref(), Some("developed"));
        assert_eq!(past_tense("coordinating").as_deref(), Some("coordinated"));
        assert_eq!(past_tense("planning").as_deref(), Some("planned"));
    }

    #[test]
    fn test_y_rule() {
        assert_eq!(past_tense("applying").as_deref(), Some("applied"));
        assert_eq!(past_tense("deploying").as_deref(), Some("deployed"));
    }

    #[test]
    fn test_irregular_verbs() {
        assert_eq!(past_tense("leading").as_deref(), Some("led"));
        assert_eq!(past_tense("building").as_deref(), Some("built"));
    }

    #[test]
    fn test_blocklist_and_short_stems() {
        assert_eq!(past_tense("interesting"), None);
        assert_eq!(past_tense("being"), None);
        assert_eq!(past_tense("bring"), None);
    }

    #[test]
    fn test_normalize_progressive() {
        assert_eq!(
            normalize_progressive("• Was leading the migration while we were shipping weekly"),
            "• Led the migration while we shipped weekly"
        );
    }

    #[test]
    fn test_adjectival_ing_left_alone() {
        let line = "The work was challenging and the team was willing";
        assert_eq!(normalize_progressive(line), line);
    }
}
