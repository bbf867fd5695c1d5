//! Validation of an external rewrite against the original and the rule-based draft.
//! Any violation means the rewrite is discarded whole; there is no partial merge.

use thiserror::Error;

use crate::config::OptimizerSettings;
use crate::reconcile::extract::{extract_metrics, PreservedFacts};
use crate::scoring::tech_stack::extract_tech_stack;

/// Why an external rewrite was rejected. A control-flow signal, never returned to callers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FabricationViolation {
    #[error("rewrite truncated: {actual} chars, need at least {minimum}")]
    Truncated { actual: usize, minimum: usize },

    #[error("metric '{0}' missing from rewrite")]
    MissingMetric(String),

    #[error("approximate percentage '{0}' missing from rewrite")]
    MissingApproximatePercentage(String),

    #[error("job title line '{0}' missing from rewrite")]
    MissingJobTitle(String),

    #[error("rewrite introduces skill '{0}' absent from the original")]
    InventedSkill(String),

    #[error("rewrite introduces metric '{0}' absent from the original and the draft")]
    InventedMetric(String),

    #[error("rewrite changes {ratio:.2} of the draft's words, limit {limit:.2}")]
    ExcessiveEdit { ratio: f64, limit: f64 },
}

impl FabricationViolation {
    /// Short machine-readable label for logs and counters.
    pub fn label(&self) -> &'static str {
        match self {
            FabricationViolation::Truncated { .. } => "truncated",
            FabricationViolation::MissingMetric(_) => "missing_metric",
            FabricationViolation::MissingApproximatePercentage(_) => "missing_approximate_percentage",
            FabricationViolation::MissingJobTitle(_) => "missing_job_title",
            FabricationViolation::InventedSkill(_) => "invented_skill",
            FabricationViolation::InventedMetric(_) => "invented_metric",
            FabricationViolation::ExcessiveEdit { .. } => "excessive_edit",
        }
    }
}

/// Word-level edit distance between two texts, normalised by the longer word count.
pub fn word_edit_ratio(a: &str, b: &str) -> f64 {
    let a_words: Vec<&str> = a.split_whitespace().collect();
    let b_words: Vec<&str> = b.split_whitespace().collect();
    let longest = a_words.len().max(b_words.len());
    if longest == 0 {
        return 0.0;
    }
    strsim::generic_levenshtein(&a_words, &b_words) as f64 / longest as f64
}

#[derive(Debug, Clone)]
pub struct RewriteValidator {
    min_length_ratio: f64,
    max_edit_ratio: f64,
}

impl Default for RewriteValidator {
    fn default() -> Self {
        Self::new(&OptimizerSettings::default())
    }
}

impl RewriteValidator {
    pub fn new(settings: &OptimizerSettings) -> Self {
        Self {
            min_length_ratio: settings.min_length_ratio,
            max_edit_ratio: settings.max_edit_ratio,
        }
    }

    /// Runs every check in order and reports the first violation.
    pub fn validate(
        &self,
        facts: &PreservedFacts,
        original: &str,
        rule_based: &str,
        candidate: &str,
    ) -> Result<(), FabricationViolation> {
        let actual = candidate.chars().count();
        let minimum = (rule_based.chars().count() as f64 * self.min_length_ratio).ceil() as usize;
        if actual < minimum {
            return Err(FabricationViolation::Truncated { actual, minimum });
        }

        if let Some(metric) = facts.metric_tokens().into_iter().find(|m| !candidate.contains(m)) {
            return Err(FabricationViolation::MissingMetric(metric.to_string()));
        }

        if let Some(approx) = facts
            .approximate_percentages
            .iter()
            .find(|p| !candidate.contains(p.as_str()))
        {
            return Err(FabricationViolation::MissingApproximatePercentage(approx.clone()));
        }

        if let Some(title) = facts.job_titles.iter().find(|t| !candidate.contains(&t.line)) {
            return Err(FabricationViolation::MissingJobTitle(title.line.clone()));
        }

        if let Some(skill) = extract_tech_stack(candidate)
            .into_iter()
            .find(|s| !facts.skills.contains(s))
        {
            return Err(FabricationViolation::InventedSkill(skill));
        }

        if let Some(metric) = extract_metrics(candidate)
            .into_iter()
            .find(|m| !original.contains(&m.text) && !rule_based.contains(&m.text))
        {
            return Err(FabricationViolation::InventedMetric(metric.text));
        }

        let ratio = word_edit_ratio(rule_based, candidate);
        if ratio > self.max_edit_ratio {
            return Err(FabricationViolation::ExcessiveEdit {
                ratio,
                limit: self.max_edit_ratio,
            });
        }

        Ok(())
    }
}
