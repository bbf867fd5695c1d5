//! Optimizer — the library facade: `analyze`, `optimize`, `suggest`.
//!
//! Each call is one sequential pipeline over immutable values. The only shared state is the
//! read-only settings and the reconciliation counters.

pub mod handlers;
pub mod suggestions;

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::{Config, OptimizerSettings};
use crate::errors::AppError;
use crate::lint::engine::RuleEngine;
use crate::lint::passive::{HeuristicPassiveDetector, PassiveVoiceDetector};
use crate::lint::segmenter::Segmenter;
use crate::llm_client::LlmError;
use crate::models::document::Document;
use crate::models::report::{OptimizationAnalysis, OptimizationResult, SeverityCounts};
use crate::optimizer::suggestions::{build_suggestions, validation_suggestion, Suggestion};
use crate::reconcile::reconciler::{ExternalRewriter, Fallback, ReconcileStats, RewriteReconciler};
use crate::rewrite::changes::summarize_changes;
use crate::rewrite::metrics::MetricFiller;
use crate::rewrite::rewriter::DeterministicRewriter;
use crate::scoring::keywords::missing_keywords;
use crate::scoring::scorer::Scorer;
use crate::scoring::similarity::{KeywordOverlapScorer, SimilarityScorer};

const DEFAULT_REWRITE_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    pub resume_text: String,
    pub job_description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OptimizeRequest {
    pub resume_text: String,
    pub job_description: Option<String>,
    #[serde(default)]
    pub use_external_rewrite: bool,
    /// Overrides the configured metric seed for this run.
    pub seed: Option<u64>,
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.trim().is_empty())
}

fn require_resume(text: &str) -> Result<(), AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation("resume_text cannot be empty".to_string()));
    }
    Ok(())
}

fn feedback_for(base_score: u32) -> &'static str {
    if base_score >= 90 {
        "Your resume is well-structured with minimal issues."
    } else if base_score >= 75 {
        "Your resume is decent but could use some targeted improvements in clarity and impact."
    } else {
        "Your resume has several areas for improvement. Follow the suggestions to enhance its effectiveness."
    }
}

#[derive(Clone)]
pub struct Optimizer {
    segmenter: Segmenter,
    engine: RuleEngine,
    scorer: Scorer,
    rewriter: DeterministicRewriter,
    reconciler: RewriteReconciler,
    settings: OptimizerSettings,
    timeout: Duration,
    external: Option<Arc<dyn ExternalRewriter>>,
    metric_seed: Option<u64>,
    stats: Arc<ReconcileStats>,
}

impl Default for Optimizer {
    fn default() -> Self {
        Self::new(OptimizerSettings::default())
    }
}

impl Optimizer {
    pub fn new(settings: OptimizerSettings) -> Self {
        let timeout = Duration::from_secs(DEFAULT_REWRITE_TIMEOUT_SECS);
        Self {
            segmenter: Segmenter::new(settings.short_line_threshold),
            engine: RuleEngine::new(&settings, Arc::new(HeuristicPassiveDetector)),
            scorer: Scorer::new(settings.clone(), Arc::new(KeywordOverlapScorer)),
            rewriter: DeterministicRewriter,
            reconciler: RewriteReconciler::new(&settings, timeout),
            settings,
            timeout,
            external: None,
            metric_seed: None,
            stats: Arc::new(ReconcileStats::default()),
        }
    }

    /// Settings plus the runtime knobs from `Config` (timeout, metric seed).
    pub fn from_config(config: &Config, settings: OptimizerSettings) -> Self {
        Self::new(settings)
            .with_timeout(Duration::from_secs(config.rewrite_timeout_secs))
            .with_metric_seed(config.metric_seed)
    }

    pub fn with_external_rewriter(mut self, rewriter: Arc<dyn ExternalRewriter>) -> Self {
        self.external = Some(rewriter);
        self
    }

    pub fn with_similarity(mut self, similarity: Arc<dyn SimilarityScorer>) -> Self {
        self.scorer = Scorer::new(self.settings.clone(), similarity);
        self
    }

    pub fn with_passive_detector(mut self, detector: Arc<dyn PassiveVoiceDetector>) -> Self {
        self.engine = RuleEngine::new(&self.settings, detector);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self.reconciler = RewriteReconciler::new(&self.settings, timeout);
        self
    }

    pub fn with_metric_seed(mut self, seed: Option<u64>) -> Self {
        self.metric_seed = seed;
        self
    }

    pub fn external_rewrite_available(&self) -> bool {
        self.external.is_some()
    }

    pub fn stats(&self) -> Arc<ReconcileStats> {
        Arc::clone(&self.stats)
    }

    fn analyze_document(&self, doc: &Document, job_description: Option<&str>) -> OptimizationAnalysis {
        let report = self.engine.lint(doc);
        let score = self
            .scorer
            .score(doc.raw(), &report.findings, job_description, report.is_already_optimized);
        OptimizationAnalysis {
            feedback: feedback_for(score.base_score).to_string(),
            counts: SeverityCounts::from_findings(&report.findings),
            unit_count: doc.units().len(),
            score,
            findings: report.findings,
            is_already_optimized: report.is_already_optimized,
            evidence: report.evidence,
        }
    }

    /// Lint and score without rewriting. Deterministic for identical input.
    pub fn analyze(&self, resume_text: &str, job_description: Option<&str>) -> Result<OptimizationAnalysis, AppError> {
        require_resume(resume_text)?;
        let doc = Document::parse_with(resume_text, &self.segmenter);
        Ok(self.analyze_document(&doc, non_blank(job_description)))
    }

    pub fn suggest(&self, resume_text: &str, job_description: Option<&str>) -> Result<Vec<Suggestion>, AppError> {
        let jd = non_blank(job_description);
        let analysis = self.analyze(resume_text, jd)?;
        if analysis.is_already_optimized {
            return Ok(vec![validation_suggestion(&analysis.evidence)]);
        }
        let missing = jd.map(|jd| missing_keywords(resume_text, jd)).unwrap_or_default();
        Ok(build_suggestions(&analysis.findings, analysis.score.base_score, &missing))
    }

    /// Full pipeline. Never fails for non-empty input: provider and fabrication problems
    /// fall back to the rule-based draft and are reported in `fallback_reason`.
    pub async fn optimize(&self, request: &OptimizeRequest) -> Result<OptimizationResult, AppError> {
        require_resume(&request.resume_text)?;
        let run_id = Uuid::new_v4();
        let original = request.resume_text.as_str();
        let jd = non_blank(request.job_description.as_deref());

        let doc = Document::parse_with(original, &self.segmenter);
        let analysis = self.analyze_document(&doc, jd);

        if analysis.is_already_optimized {
            info!(%run_id, "Resume already optimized; returning it unchanged");
            return Ok(OptimizationResult {
                run_id,
                original: original.to_string(),
                rule_based: original.to_string(),
                optimized: original.to_string(),
                score_after: analysis.score.clone(),
                score_before: analysis.score,
                findings: analysis.findings,
                changes_made: summarize_changes(original, original),
                used_external_rewrite: false,
                no_changes_needed: true,
                fallback_reason: None,
            });
        }

        let mut filler = MetricFiller::from_seed_option(request.seed.or(self.metric_seed));
        let draft = self
            .rewriter
            .rewrite(&doc, &analysis.bullets_needing_metrics(), &mut filler);

        let (optimized, used_external_rewrite, fallback_reason) = if request.use_external_rewrite {
            match &self.external {
                Some(rewriter) => {
                    let outcome = self
                        .reconciler
                        .reconcile(original, &draft.text, rewriter.as_ref(), jd)
                        .await;
                    self.stats.record(outcome.fallback.as_ref());
                    let reason = outcome.fallback.as_ref().map(Fallback::to_string);
                    (outcome.text, outcome.used_external, reason)
                }
                None => {
                    let reason = Fallback::Provider(LlmError::NotConfigured.to_string());
                    warn!(%run_id, "{reason}; using rule-based text");
                    self.stats.record(Some(&reason));
                    (draft.text.clone(), false, Some(reason.to_string()))
                }
            }
        } else {
            (draft.text.clone(), false, None)
        };

        let after = self.analyze_document(&Document::parse_with(&optimized, &self.segmenter), jd);
        let changes_made = summarize_changes(original, &optimized);

        info!(
            %run_id,
            score_before = analysis.score.composite_score,
            score_after = after.score.composite_score,
            lines_changed = changes_made.lines_changed,
            used_external_rewrite,
            "Optimization complete"
        );

        Ok(OptimizationResult {
            run_id,
            original: original.to_string(),
            rule_based: draft.text,
            optimized,
            score_before: analysis.score,
            score_after: after.score,
            findings: analysis.findings,
            changes_made,
            used_external_rewrite,
            no_changes_needed: false,
            fallback_reason,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
