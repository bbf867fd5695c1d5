//! Keyword sets for job matching: lowercase alphabetic tokens of three or more letters,
//! minus stopwords, plus any detected technology names.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::scoring::tech_stack::extract_tech_stack;

const MIN_KEYWORD_LEN: usize = 3;

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "the", "and", "or", "but", "is", "are", "was", "were", "be", "been", "being",
        "in", "on", "at", "to", "for", "with", "by", "about", "against", "between", "into",
        "through", "during", "before", "after", "above", "below", "from", "up", "down", "of",
        "off", "over", "under", "again", "further", "then", "once", "here", "there", "when",
        "where", "why", "how", "all", "any", "both", "each", "few", "more", "most", "other",
        "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very",
        "can", "will", "just", "don", "should", "now", "ain", "aren", "couldn", "didn", "doesn",
        "hadn", "hasn", "haven", "isn", "mightn", "mustn", "needn", "shan", "shouldn", "wasn",
        "weren", "won", "wouldn", "me", "my", "myself", "we", "our", "ours", "ourselves", "you",
        "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself", "she", "her",
        "hers", "herself", "it", "its", "itself", "they", "them", "their", "theirs",
        "themselves", "this", "that", "these", "those", "am", "have", "has", "had", "do",
        "does", "did", "doing", "would", "could", "ought", "cannot", "let", "who", "what",
    ]
    .into_iter()
    .collect()
});

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(word)
}

/// Keywords in first-seen order, deduplicated.
pub fn extract_keywords(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let normalized: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    let words = normalized
        .split_whitespace()
        .filter(|w| w.chars().count() >= MIN_KEYWORD_LEN)
        .filter(|w| w.chars().all(char::is_alphabetic))
        .filter(|w| !is_stopword(w))
        .map(str::to_string);

    let tech = extract_tech_stack(text).into_iter().map(|t| t.to_lowercase());

    let mut seen = HashSet::new();
    words.chain(tech).filter(|k| seen.insert(k.clone())).collect()
}

pub fn keyword_set(text: &str) -> HashSet<String> {
    extract_keywords(text).into_iter().collect()
}

/// Job-description keywords the resume never mentions, in job-description order.
pub fn missing_keywords(resume_text: &str, job_description: &str) -> Vec<String> {
    let resume = keyword_set(resume_text);
    extract_keywords(job_description)
        .into_iter()
        .filter(|k| !resume.contains(k))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_filter_stopwords_and_short_tokens() {
        let kws = extract_keywords("We are hiring an engineer to build APIs in Go and 2 SQL stores");
        assert!(kws.contains(&"hiring".to_string()));
        assert!(kws.contains(&"engineer".to_string()));
        assert!(kws.contains(&"apis".to_string()));
        assert!(!kws.contains(&"are".to_string()));
        assert!(!kws.contains(&"to".to_string()));
        assert!(kws.contains(&"go".to_string()), "tech names are added lowercased");
    }

    #[test]
    fn test_keywords_are_deduplicated_in_order() {
        let kws = extract_keywords("rust rust services Rust");
        assert_eq!(kws, vec!["rust".to_string(), "services".to_string()]);
    }

    #[test]
    fn test_numeric_tokens_are_not_keywords() {
        assert!(extract_keywords("2024 100k").is_empty());
    }

    #[test]
    fn test_missing_keywords() {
        let missing = missing_keywords("Built services in Rust", "Rust services with Kafka streaming");
        assert_eq!(missing, vec!["kafka".to_string(), "streaming".to_string()]);
    }
}
