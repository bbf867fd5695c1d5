//! RuleEngine — runs the checker battery over a segmented document.
//!
//! Strengths come first in the returned findings, then document-level format issues,
//! then per-unit issues in unit order. Detection itself is order-insensitive.

use std::sync::Arc;

use crate::config::OptimizerSettings;
use crate::lint::passive::{HeuristicPassiveDetector, PassiveVoiceDetector};
use crate::lint::rules;
use crate::lint::vocabulary::strong_alternatives;
use crate::models::document::Document;
use crate::models::finding::{Finding, FindingKind, Severity};
use crate::models::report::OptimizationEvidence;

/// Resumes longer than this with no detected strengths still get a neutral structure note.
const STRUCTURE_NOTE_MIN_CHARS: usize = 500;

/// Output of one engine pass.
#[derive(Debug, Clone)]
pub struct LintReport {
    pub findings: Vec<Finding>,
    pub evidence: OptimizationEvidence,
    pub is_already_optimized: bool,
}

#[derive(Clone)]
pub struct RuleEngine {
    detector: Arc<dyn PassiveVoiceDetector>,
    bullet_word_limit: usize,
    sentence_word_limit: usize,
    min_strong_verbs: usize,
    max_passive_units: usize,
    max_weak_units: usize,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new(&OptimizerSettings::default(), Arc::new(HeuristicPassiveDetector))
    }
}

impl RuleEngine {
    pub fn new(settings: &OptimizerSettings, detector: Arc<dyn PassiveVoiceDetector>) -> Self {
        Self {
            detector,
            bullet_word_limit: settings.bullet_word_limit,
            sentence_word_limit: settings.sentence_word_limit,
            min_strong_verbs: settings.min_strong_verbs,
            max_passive_units: settings.max_passive_units,
            max_weak_units: settings.max_weak_units,
        }
    }

    /// Full pass. An already-optimized document reports strengths only.
    pub fn lint(&self, doc: &Document) -> LintReport {
        let (is_already_optimized, evidence) = self.is_already_optimized(doc);
        let mut findings = self.strengths(doc, &evidence);
        if !is_already_optimized {
            findings.extend(self.issues(doc));
        }
        LintReport {
            findings,
            evidence,
            is_already_optimized,
        }
    }

    /// Evidence for the already-optimized circuit breaker, and its verdict.
    pub fn is_already_optimized(&self, doc: &Document) -> (bool, OptimizationEvidence) {
        let text = doc.raw();
        let evidence = OptimizationEvidence {
            has_bullet_points: rules::has_bullet_points(text),
            strong_verbs: rules::strong_action_verbs(text),
            quantifiable_achievements: rules::has_quantifiable_achievements(text),
            passive_voice_count: doc
                .content_units()
                .filter(|u| rules::passive_voice(self.detector.as_ref(), &u.text))
                .count(),
            weak_phrase_count: doc
                .content_units()
                .filter(|u| rules::weak_phrase(&u.text).is_some())
                .count(),
        };

        let optimized = evidence.has_bullet_points
            && evidence.strong_verbs.len() >= self.min_strong_verbs
            && evidence.quantifiable_achievements
            && evidence.passive_voice_count <= self.max_passive_units
            && evidence.weak_phrase_count <= self.max_weak_units;

        (optimized, evidence)
    }

    fn strengths(&self, doc: &Document, evidence: &OptimizationEvidence) -> Vec<Finding> {
        let mut strengths = Vec::new();

        if !evidence.strong_verbs.is_empty() {
            let shown: Vec<&str> = evidence.strong_verbs.iter().take(3).map(String::as_str).collect();
            strengths.push(Finding::document(
                Severity::Positive,
                FindingKind::StrongVerbs,
                format!("Uses strong action verbs: {}", shown.join(", ")),
            ));
        }

        if evidence.quantifiable_achievements {
            let examples = rules::quantifiable_examples(doc.raw(), 2);
            let message = if examples.is_empty() {
                "Includes quantifiable achievements".to_string()
            } else {
                format!("Includes quantifiable achievements: {}", examples.join("; "))
            };
            strengths.push(Finding::document(Severity::Positive, FindingKind::Metrics, message));
        }

        if strengths.is_empty() && doc.raw().chars().count() > STRUCTURE_NOTE_MIN_CHARS {
            strengths.push(Finding::document(
                Severity::Positive,
                FindingKind::Structure,
                "Resume has substantial content to build on",
            ));
        }

        strengths
    }

    fn issues(&self, doc: &Document) -> Vec<Finding> {
        let mut issues = Vec::new();

        if rules::ats_unfriendly(doc.raw()) {
            let mut message =
                String::from("Document contains images, tables or special characters that ATS parsers may reject");
            let offending = rules::ats_offending_chars(doc.raw());
            if !offending.is_empty() {
                let shown: Vec<String> = offending.iter().map(|c| format!("'{c}'")).collect();
                message.push_str(&format!(" (found {})", shown.join(" ")));
            }
            issues.push(Finding::document(Severity::High, FindingKind::Format, message));
        }

        if !rules::has_bullet_points(doc.raw()) {
            issues.push(Finding::document(
                Severity::High,
                FindingKind::Format,
                "No bullet points found; list experience as bullet points",
            ));
        }

        for unit in doc.content_units() {
            let text = unit.text.as_str();

            if rules::passive_voice(self.detector.as_ref(), text) {
                issues.push(Finding::for_unit(
                    Severity::Medium,
                    FindingKind::PassiveVoice,
                    "Passive voice detected; rewrite in the active voice",
                    unit.position,
                    text,
                ));
            }

            if let Some(phrase) = rules::weak_phrase(text) {
                let alternatives = strong_alternatives(phrase).iter().map(|s| s.to_string()).collect();
                issues.push(
                    Finding::for_unit(
                        Severity::Medium,
                        FindingKind::WeakPhrase,
                        format!("Weak phrase '{phrase}'; open with a strong action verb instead"),
                        unit.position,
                        text,
                    )
                    .with_alternatives(alternatives),
                );
            }

            if unit.is_bullet() && rules::missing_numbers(text) && rules::contains_achievement_verb(text) {
                issues.push(Finding::for_unit(
                    Severity::Medium,
                    FindingKind::MissingNumbers,
                    "Achievement has no numbers; quantify the impact",
                    unit.position,
                    text,
                ));
            }

            if rules::sentence_length_with(text, unit.is_bullet(), self.bullet_word_limit, self.sentence_word_limit) {
                let words = text.split_whitespace().count();
                issues.push(Finding::for_unit(
                    Severity::Low,
                    FindingKind::LongSentence,
                    format!("Sentence runs {words} words; split it or tighten the wording"),
                    unit.position,
                    text,
                ));
            }
        }

        issues
    }
}
