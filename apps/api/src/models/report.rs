//! Report values returned by analysis and optimization. Computed fresh per call, never mutated.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::finding::{Finding, Severity};

/// Composite 0–100 score plus the four weighted sub-scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub composite_score: u32,
    pub ats_score: u32,
    pub recruiter_score: u32,
    pub grammar_score: u32,
    pub job_match_score: u32,
    /// Clamped 100-minus-deductions score produced directly from the findings.
    pub base_score: u32,
    pub is_resume_ready: bool,
}

/// Evidence gathered by the already-optimized circuit breaker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptimizationEvidence {
    pub has_bullet_points: bool,
    pub strong_verbs: Vec<String>,
    pub quantifiable_achievements: bool,
    pub passive_voice_count: usize,
    pub weak_phrase_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub positive: usize,
}

impl SeverityCounts {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut counts = Self::default();
        for finding in findings {
            match finding.severity {
                Severity::High => counts.high += 1,
                Severity::Medium => counts.medium += 1,
                Severity::Low => counts.low += 1,
                Severity::Positive => counts.positive += 1,
            }
        }
        counts
    }
}

/// Output of `analyze`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationAnalysis {
    pub score: ScoreBreakdown,
    pub findings: Vec<Finding>,
    pub is_already_optimized: bool,
    pub evidence: OptimizationEvidence,
    pub feedback: String,
    pub counts: SeverityCounts,
    pub unit_count: usize,
}

impl OptimizationAnalysis {
    /// Unit positions flagged `missing_numbers`, in document order.
    pub fn bullets_needing_metrics(&self) -> Vec<usize> {
        let mut positions: Vec<usize> = self
            .findings
            .iter()
            .filter(|f| f.kind == crate::models::finding::FindingKind::MissingNumbers)
            .filter_map(|f| f.unit)
            .collect();
        positions.sort_unstable();
        positions.dedup();
        positions
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeSummary {
    pub lines_changed: usize,
    pub total_lines: usize,
    pub change_percentage: u32,
    pub verb_replacements: usize,
    pub metric_additions: usize,
}

/// Output of `optimize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub run_id: Uuid,
    pub original: String,
    pub rule_based: String,
    pub optimized: String,
    pub score_before: ScoreBreakdown,
    pub score_after: ScoreBreakdown,
    pub findings: Vec<Finding>,
    pub changes_made: ChangeSummary,
    pub used_external_rewrite: bool,
    pub no_changes_needed: bool,
    /// Why the external rewrite was not used, when it was requested.
    pub fallback_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::finding::FindingKind;

    #[test]
    fn test_severity_counts() {
        let findings = vec![
            Finding::document(Severity::High, FindingKind::Format, "a"),
            Finding::document(Severity::Positive, FindingKind::Metrics, "b"),
            Finding::document(Severity::Positive, FindingKind::StrongVerbs, "c"),
        ];
        let counts = SeverityCounts::from_findings(&findings);
        assert_eq!(counts.high, 1);
        assert_eq!(counts.positive, 2);
        assert_eq!(counts.medium, 0);
    }

    #[test]
    fn test_bullets_needing_metrics_sorted_and_deduped() {
        let f = |pos| Finding::for_unit(Severity::Medium, FindingKind::MissingNumbers, "m", pos, "x");
        let analysis = OptimizationAnalysis {
            score: ScoreBreakdown {
                composite_score: 0,
                ats_score: 0,
                recruiter_score: 0,
                grammar_score: 0,
                job_match_score: 0,
                base_score: 0,
                is_resume_ready: false,
            },
            findings: vec![f(4), f(1), f(4)],
            is_already_optimized: false,
            evidence: OptimizationEvidence::default(),
            feedback: String::new(),
            counts: SeverityCounts::default(),
            unit_count: 5,
        };
        assert_eq!(analysis.bullets_needing_metrics(), vec![1, 4]);
    }
}
