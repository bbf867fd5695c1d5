//! Scorer — folds findings into a base score, four sub-scores and a weighted composite.

use std::sync::Arc;

use tracing::warn;

use crate::config::OptimizerSettings;
use crate::models::finding::{Finding, FindingKind, Severity};
use crate::models::report::ScoreBreakdown;
use crate::scoring::similarity::{keyword_overlap, KeywordOverlapScorer, SimilarityScorer};

#[derive(Clone)]
pub struct Scorer {
    settings: OptimizerSettings,
    similarity: Arc<dyn SimilarityScorer>,
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new(OptimizerSettings::default(), Arc::new(KeywordOverlapScorer))
    }
}

fn clamp_score(value: f64) -> u32 {
    value.clamp(0.0, 100.0) as u32
}

fn count(findings: &[Finding], kinds: &[FindingKind]) -> u32 {
    findings
        .iter()
        .filter(|f| !f.is_positive() && kinds.contains(&f.kind))
        .count() as u32
}

impl Scorer {
    pub fn new(settings: OptimizerSettings, similarity: Arc<dyn SimilarityScorer>) -> Self {
        Self {
            settings,
            similarity,
        }
    }

    /// Signed contribution of a single finding to the base score.
    pub fn weight(&self, finding: &Finding) -> i32 {
        let s = &self.settings;
        match (finding.severity, finding.kind) {
            (Severity::High, _) => s.high_format_weight,
            (Severity::Medium, FindingKind::PassiveVoice) => s.passive_weight,
            (Severity::Medium, FindingKind::WeakPhrase) => s.weak_phrase_weight,
            (Severity::Medium, FindingKind::MissingNumbers) => s.missing_numbers_weight,
            (Severity::Low, FindingKind::LongSentence) => s.long_sentence_weight,
            (Severity::Positive, FindingKind::StrongVerbs | FindingKind::Metrics) => s.positive_weight,
            _ => 0,
        }
    }

    /// 100 plus every finding's weight, clamped to [0, 100].
    pub fn base_score(&self, findings: &[Finding]) -> u32 {
        let total: i32 = 100 + findings.iter().map(|f| self.weight(f)).sum::<i32>();
        total.clamp(0, 100) as u32
    }

    /// Job-match sub-score. Zero without a (non-blank) job description.
    pub fn job_match(&self, resume: &str, job_description: Option<&str>) -> u32 {
        let Some(jd) = job_description.filter(|jd| !jd.trim().is_empty()) else {
            return 0;
        };

        let ratio = match self.similarity.similarity(resume, jd) {
            Ok(r) if (0.0..=1.0).contains(&r) => r,
            Ok(r) => {
                warn!(
                    backend = self.similarity.backend(),
                    "Similarity {r} outside [0, 1]; using keyword overlap"
                );
                keyword_overlap(resume, jd)
            }
            Err(e) => {
                warn!(
                    backend = self.similarity.backend(),
                    "Similarity scorer failed: {e}; using keyword overlap"
                );
                keyword_overlap(resume, jd)
            }
        };

        clamp_score((ratio * 100.0).floor())
    }

    pub fn score(
        &self,
        resume: &str,
        findings: &[Finding],
        job_description: Option<&str>,
        is_already_optimized: bool,
    ) -> ScoreBreakdown {
        let s = &self.settings;

        let ats = 100.0
            - f64::from(s.ats_penalty * count(findings, &[FindingKind::Format, FindingKind::PassiveVoice]));
        let recruiter = 100.0
            - f64::from(
                s.recruiter_penalty * count(findings, &[FindingKind::WeakPhrase, FindingKind::MissingNumbers]),
            );
        let grammar = 100.0 - f64::from(s.grammar_penalty * count(findings, &[FindingKind::LongSentence]));

        let ats_score = clamp_score(ats);
        let recruiter_score = clamp_score(recruiter);
        let grammar_score = clamp_score(grammar);

        let has_jd = job_description.map(|jd| !jd.trim().is_empty()).unwrap_or(false);
        let job_match_score = self.job_match(resume, job_description);

        let composite = if has_jd {
            let [wa, wr, wg, wj] = s.weights_with_jd;
            wa * f64::from(ats_score)
                + wr * f64::from(recruiter_score)
                + wg * f64::from(grammar_score)
                + wj * f64::from(job_match_score)
        } else {
            let [wa, wr, wg] = s.weights_without_jd;
            wa * f64::from(ats_score) + wr * f64::from(recruiter_score) + wg * f64::from(grammar_score)
        };
        let composite_score = clamp_score(composite.round());

        ScoreBreakdown {
            composite_score,
            ats_score,
            recruiter_score,
            grammar_score,
            job_match_score,
            base_score: self.base_score(findings),
            is_resume_ready: composite_score >= s.ready_threshold || is_already_optimized,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    fn unit_finding(severity: Severity, kind: FindingKind) -> Finding {
        Finding::for_unit(severity, kind, "x", 0, "x")
    }

    struct FailingSimilarity;

    impl SimilarityScorer for FailingSimilarity {
        fn similarity(&self, _: &str, _: &str) -> Result<f64, AppError> {
            Err(AppError::Internal(anyhow::anyhow!("embedding provider unavailable")))
        }
        fn backend(&self) -> &'static str {
            "failing"
        }
    }

    struct OutOfRangeSimilarity;

    impl SimilarityScorer for OutOfRangeSimilarity {
        fn similarity(&self, _: &str, _: &str) -> Result<f64, AppError> {
            Ok(1.7)
        }
        fn backend(&self) -> &'static str {
            "broken"
        }
    }

    #[test]
    fn test_clean_document_scores_full_marks() {
        let score = Scorer::default().score("• Led things", &[], None, false);
        assert_eq!(score.composite_score, 100);
        assert_eq!(score.job_match_score, 0);
        assert!(score.is_resume_ready);
    }

    #[test]
    fn test_severity_weights() {
        let scorer = Scorer::default();
        let findings = vec![
            Finding::document(Severity::High, FindingKind::Format, "x"),
            unit_finding(Severity::Medium, FindingKind::PassiveVoice),
            unit_finding(Severity::Medium, FindingKind::WeakPhrase),
            unit_finding(Severity::Medium, FindingKind::MissingNumbers),
            unit_finding(Severity::Low, FindingKind::LongSentence),
            Finding::document(Severity::Positive, FindingKind::Metrics, "x"),
        ];
        assert_eq!(scorer.base_score(&findings), 100 - 10 - 5 - 5 - 3 - 2 + 5);
    }

    #[test]
    fn test_base_score_never_exceeds_bounds() {
        let scorer = Scorer::default();
        let many_bad = vec![unit_finding(Severity::Medium, FindingKind::WeakPhrase); 40];
        assert_eq!(scorer.base_score(&many_bad), 0);
        let many_good = vec![Finding::document(Severity::Positive, FindingKind::StrongVerbs, "x"); 5];
        assert_eq!(scorer.base_score(&many_good), 100);
    }

    #[test]
    fn test_subscores_are_bounded() {
        let scorer = Scorer::default();
        let mut findings = vec![unit_finding(Severity::Medium, FindingKind::PassiveVoice); 15];
        findings.extend(vec![unit_finding(Severity::Medium, FindingKind::MissingNumbers); 15]);
        findings.extend(vec![unit_finding(Severity::Low, FindingKind::LongSentence); 25]);
        let score = scorer.score("text", &findings, Some("rust engineer"), false);
        for value in [
            score.composite_score,
            score.ats_score,
            score.recruiter_score,
            score.grammar_score,
            score.job_match_score,
        ] {
            assert!(value <= 100);
        }
        assert_eq!(score.ats_score, 0);
        assert_eq!(score.recruiter_score, 0);
        assert_eq!(score.grammar_score, 0);
    }

    #[test]
    fn test_composite_reweights_without_job_description() {
        let scorer = Scorer::default();
        let findings = vec![unit_finding(Severity::Medium, FindingKind::WeakPhrase)];
        let without = scorer.score("Rust engineer", &findings, None, false);
        // 0.4*100 + 0.4*92 + 0.2*100
        assert_eq!(without.composite_score, 97);

        let with = scorer.score("Rust engineer", &findings, Some("rust engineer"), false);
        // 0.35*100 + 0.35*92 + 0.15*100 + 0.15*100
        assert_eq!(with.job_match_score, 100);
        assert_eq!(with.composite_score, 97);
    }

    #[test]
    fn test_blank_job_description_counts_as_absent() {
        let score = Scorer::default().score("Rust engineer", &[], Some("   "), false);
        assert_eq!(score.job_match_score, 0);
        assert_eq!(score.composite_score, 100);
    }

    #[test]
    fn test_ready_when_already_optimized() {
        let findings = vec![Finding::document(Severity::High, FindingKind::Format, "x"); 3];
        let scorer = Scorer::default();
        assert!(!scorer.score("x", &findings, None, false).is_resume_ready);
        assert!(scorer.score("x", &findings, None, true).is_resume_ready);
    }

    #[test]
    fn test_similarity_failure_falls_back_to_keywords() {
        let settings = OptimizerSettings::default();
        let failing = Scorer::new(settings.clone(), Arc::new(FailingSimilarity));
        let broken = Scorer::new(settings, Arc::new(OutOfRangeSimilarity));
        assert_eq!(failing.job_match("Rust engineer", Some("rust kafka")), 50);
        assert_eq!(broken.job_match("Rust engineer", Some("rust kafka")), 50);
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let scorer = Scorer::default();
        let findings = vec![unit_finding(Severity::Low, FindingKind::LongSentence)];
        let a = scorer.score("Rust engineer", &findings, Some("rust"), false);
        let b = scorer.score("Rust engineer", &findings, Some("rust"), false);
        assert_eq!(a, b);
    }
}
