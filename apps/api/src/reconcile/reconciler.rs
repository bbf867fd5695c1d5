//! RewriteReconciler — the trust boundary around the external rewriter.
//!
//! The external result is advisory. It is accepted only if it passes every
//! `RewriteValidator` check; otherwise the rule-based draft is returned unchanged.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::OptimizerSettings;
use crate::llm_client::{strip_code_fences, LlmError};
use crate::reconcile::extract::PreservedFacts;
use crate::reconcile::prompts::{build_system_prompt, build_user_prompt};
use crate::reconcile::validator::{FabricationViolation, RewriteValidator};

/// Injectable generative-text capability. `LlmClient` is the production implementation;
/// tests substitute mocks.
#[async_trait]
pub trait ExternalRewriter: Send + Sync {
    async fn rewrite(&self, system_prompt: &str, user_prompt: &str) -> Result<String, LlmError>;

    fn provider(&self) -> &'static str {
        "external"
    }
}

/// Why the rule-based draft was kept.
#[derive(Debug, Clone, PartialEq)]
pub enum Fallback {
    /// The external output broke a preservation invariant.
    Fabrication(FabricationViolation),
    /// The call failed, timed out, or produced nothing usable.
    Provider(String),
}

impl fmt::Display for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fallback::Fabrication(v) => write!(f, "fabrication check failed: {v}"),
            Fallback::Provider(msg) => write!(f, "external provider error: {msg}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReconcileOutcome {
    pub text: String,
    pub used_external: bool,
    pub fallback: Option<Fallback>,
}

impl ReconcileOutcome {
    fn accepted(text: String) -> Self {
        Self {
            text,
            used_external: true,
            fallback: None,
        }
    }

    fn fallback(rule_based: &str, reason: Fallback) -> Self {
        Self {
            text: rule_based.to_string(),
            used_external: false,
            fallback: Some(reason),
        }
    }
}

/// Reconciliation outcome counters, the monitoring hook for external provider quality.
#[derive(Debug, Default)]
pub struct ReconcileStats {
    accepted: AtomicU64,
    fabrication_fallbacks: AtomicU64,
    provider_fallbacks: AtomicU64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileCounts {
    pub accepted: u64,
    pub fabrication_fallbacks: u64,
    pub provider_fallbacks: u64,
}

impl ReconcileStats {
    /// `None` records an accepted external rewrite.
    pub fn record(&self, fallback: Option<&Fallback>) {
        let counter = match fallback {
            None => &self.accepted,
            Some(Fallback::Fabrication(_)) => &self.fabrication_fallbacks,
            Some(Fallback::Provider(_)) => &self.provider_fallbacks,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> ReconcileCounts {
        ReconcileCounts {
            accepted: self.accepted.load(Ordering::Relaxed),
            fabrication_fallbacks: self.fabrication_fallbacks.load(Ordering::Relaxed),
            provider_fallbacks: self.provider_fallbacks.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RewriteReconciler {
    validator: RewriteValidator,
    timeout: Duration,
}

impl RewriteReconciler {
    pub fn new(settings: &OptimizerSettings, timeout: Duration) -> Self {
        Self {
            validator: RewriteValidator::new(settings),
            timeout,
        }
    }

    pub async fn reconcile(
        &self,
        original: &str,
        rule_based: &str,
        rewriter: &dyn ExternalRewriter,
        job_description: Option<&str>,
    ) -> ReconcileOutcome {
        let facts = PreservedFacts::extract(original);
        let system_prompt = build_system_prompt();
        let user_prompt = build_user_prompt(rule_based, &facts, job_description);

        let response = match tokio::time::timeout(self.timeout, rewriter.rewrite(&system_prompt, &user_prompt)).await {
            Ok(result) => result,
            Err(_) => Err(LlmError::Timeout {
                seconds: self.timeout.as_secs(),
            }),
        };

        let raw = match response {
            Ok(raw) => raw,
            Err(e) => {
                warn!(provider = rewriter.provider(), "External rewrite failed: {e}; using rule-based text");
                return ReconcileOutcome::fallback(rule_based, Fallback::Provider(e.to_string()));
            }
        };

        let candidate = strip_code_fences(&raw);
        if candidate.is_empty() {
            let e = LlmError::EmptyContent;
            warn!(provider = rewriter.provider(), "External rewrite failed: {e}; using rule-based text");
            return ReconcileOutcome::fallback(rule_based, Fallback::Provider(e.to_string()));
        }

        match self.validator.validate(&facts, original, rule_based, candidate) {
            Ok(()) => {
                info!(provider = rewriter.provider(), "External rewrite accepted");
                ReconcileOutcome::accepted(candidate.to_string())
            }
            Err(violation) => {
                warn!(
                    provider = rewriter.provider(),
                    violation = violation.label(),
                    "External rewrite rejected: {violation}; using rule-based text"
                );
                ReconcileOutcome::fallback(rule_based, Fallback::Fabrication(violation))
            }
        }
    }
}
