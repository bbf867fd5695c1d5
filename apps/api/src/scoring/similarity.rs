//! Similarity — pluggable resume/job-description similarity for the job-match sub-score.
//!
//! Default: `KeywordOverlapScorer` (pure, deterministic). An embedding-backed scorer plugs
//! in through the trait; `Scorer` falls back to keyword overlap if one errors or returns a
//! value outside [0, 1].

use crate::errors::AppError;
use crate::scoring::keywords::keyword_set;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Carried by the optimizer as `Arc<dyn SimilarityScorer>`.
pub trait SimilarityScorer: Send + Sync {
    /// Similarity of `resume` to `job_description`, in [0, 1].
    fn similarity(&self, resume: &str, job_description: &str) -> Result<f64, AppError>;

    /// Backend label, e.g. "keyword".
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordOverlapScorer
// ────────────────────────────────────────────────────────────────────────────

/// |jd ∩ resume| / |jd| over keyword sets. Zero when the job description has no keywords.
#[derive(Debug, Clone, Default)]
pub struct KeywordOverlapScorer;

impl SimilarityScorer for KeywordOverlapScorer {
    fn similarity(&self, resume: &str, job_description: &str) -> Result<f64, AppError> {
        Ok(keyword_overlap(resume, job_description))
    }

    fn backend(&self) -> &'static str {
        "keyword"
    }
}

pub fn keyword_overlap(resume: &str, job_description: &str) -> f64 {
    let jd = keyword_set(job_description);
    if jd.is_empty() {
        return 0.0;
    }
    let resume = keyword_set(resume);
    let matched = jd.iter().filter(|k| resume.contains(*k)).count();
    matched as f64 / jd.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_overlap() {
        let score = keyword_overlap("Rust services engineer", "engineer rust services");
        assert!((score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_overlap() {
        let score = keyword_overlap("Rust engineer", "rust kafka engineer golang");
        assert!((score - 0.5).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_empty_job_description_scores_zero() {
        assert_eq!(keyword_overlap("Rust engineer", "the and of"), 0.0);
    }

    #[test]
    fn test_backend_label() {
        assert_eq!(KeywordOverlapScorer.backend(), "keyword");
    }
}
