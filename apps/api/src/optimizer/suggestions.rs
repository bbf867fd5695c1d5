//! Suggestions — findings turned into actionable advice with alternatives.

use serde::{Deserialize, Serialize};

use crate::lint::rules;
use crate::lint::vocabulary::strong_alternatives;
use crate::models::finding::{Finding, FindingKind, Severity};
use crate::models::report::OptimizationEvidence;

/// Base score at or above which a lightly-flagged resume gets a reassurance note.
const REASSURANCE_MIN_SCORE: u32 = 85;
const REASSURANCE_MAX_ISSUES: usize = 2;
const MAX_MISSING_KEYWORDS: usize = 5;
const MAX_VALIDATION_VERBS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Finding kind (`weak_phrase`, `format`, ...) or `validation`, `reassurance`, `job_match`.
    pub kind: String,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub alternatives: Vec<String>,
}

fn default_alternatives(finding: &Finding) -> Vec<String> {
    if !finding.alternatives.is_empty() {
        return finding.alternatives.clone();
    }
    let fallback = match finding.kind {
        FindingKind::WeakPhrase => {
            let phrase = finding.text.as_deref().and_then(rules::weak_phrase);
            if let Some(alts) = phrase.map(strong_alternatives).filter(|a| !a.is_empty()) {
                return alts.iter().map(|s| s.to_string()).collect();
            }
            "Use stronger action verbs"
        }
        FindingKind::MissingNumbers => "Add specific metrics (e.g. 'increased efficiency by 20%')",
        FindingKind::PassiveVoice => "Rewrite using active voice",
        FindingKind::LongSentence => "Break into shorter, more focused bullet points",
        _ => "Improve format and structure",
    };
    vec![fallback.to_string()]
}

/// The single positive suggestion returned for an already-optimized resume.
pub fn validation_suggestion(evidence: &OptimizationEvidence) -> Suggestion {
    let mut points = Vec::new();
    if !evidence.strong_verbs.is_empty() {
        let verbs: Vec<&str> = evidence
            .strong_verbs
            .iter()
            .take(MAX_VALIDATION_VERBS)
            .map(String::as_str)
            .collect();
        points.push(format!("strong action verbs like {}", verbs.join(", ")));
    }
    if evidence.has_bullet_points {
        points.push("well-structured bullet points".to_string());
    }
    if evidence.quantifiable_achievements {
        points.push("quantifiable achievements".to_string());
    }

    Suggestion {
        kind: "validation".into(),
        severity: Severity::Positive,
        message: "Your resume is already well-optimized. No changes needed.".into(),
        details: Some(format!(
            "Your resume demonstrates best practices including: {}.",
            points.join("; ")
        )),
        text: None,
        alternatives: vec!["Keep your resume as is.".into()],
    }
}

/// Strengths first, then issues with alternatives, then the optional reassurance and
/// job-match entries.
pub fn build_suggestions(findings: &[Finding], base_score: u32, missing_keywords: &[String]) -> Vec<Suggestion> {
    let (strengths, issues): (Vec<&Finding>, Vec<&Finding>) = findings.iter().partition(|f| f.is_positive());

    let mut suggestions: Vec<Suggestion> = strengths
        .iter()
        .map(|f| Suggestion {
            kind: f.kind.as_str().into(),
            severity: Severity::Positive,
            message: f.message.clone(),
            details: None,
            text: f.text.clone(),
            alternatives: Vec::new(),
        })
        .collect();

    suggestions.extend(issues.iter().map(|f| Suggestion {
        kind: f.kind.as_str().into(),
        severity: f.severity,
        message: f.message.clone(),
        details: None,
        text: f.text.clone(),
        alternatives: default_alternatives(f),
    }));

    if issues.len() <= REASSURANCE_MAX_ISSUES && base_score >= REASSURANCE_MIN_SCORE {
        suggestions.push(Suggestion {
            kind: "reassurance".into(),
            severity: Severity::Positive,
            message: "Your resume is already quite strong, with just a few minor improvements suggested above."
                .into(),
            details: None,
            text: None,
            alternatives: vec!["Focus on the few suggestions above.".into()],
        });
    }

    let top: Vec<&String> = missing_keywords.iter().take(MAX_MISSING_KEYWORDS).collect();
    if !top.is_empty() {
        let names: Vec<&str> = top.iter().map(|k| k.as_str()).collect();
        suggestions.push(Suggestion {
            kind: "job_match".into(),
            severity: Severity::Medium,
            message: format!(
                "Consider adding these keywords from the job description: {}",
                names.join(", ")
            ),
            details: None,
            text: None,
            alternatives: names.iter().map(|k| format!("Add relevant experience with {k}")).collect(),
        });
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_alternatives_by_kind() {
        let findings = vec![
            Finding::for_unit(Severity::Medium, FindingKind::PassiveVoice, "p", 0, "• x was done"),
            Finding::for_unit(Severity::Low, FindingKind::LongSentence, "l", 1, "• long"),
        ];
        let suggestions = build_suggestions(&findings, 50, &[]);
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].alternatives, vec!["Rewrite using active voice".to_string()]);
        assert_eq!(suggestions[1].kind, "long_sentence");
    }

    #[test]
    fn test_weak_phrase_alternatives_recovered_from_text() {
        let findings = vec![Finding::for_unit(
            Severity::Medium,
            FindingKind::WeakPhrase,
            "w",
            0,
            "• Worked on the billing API",
        )];
        let suggestions = build_suggestions(&findings, 50, &[]);
        assert!(!suggestions[0].alternatives.is_empty());
        assert_ne!(suggestions[0].alternatives[0], "Use stronger action verbs");
    }

    #[test]
    fn test_reassurance_for_high_score_and_few_issues() {
        let findings = vec![Finding::for_unit(Severity::Low, FindingKind::LongSentence, "l", 0, "• x")];
        let suggestions = build_suggestions(&findings, 95, &[]);
        assert_eq!(suggestions.last().map(|s| s.kind.as_str()), Some("reassurance"));
        let none = build_suggestions(&findings, 60, &[]);
        assert!(none.iter().all(|s| s.kind != "reassurance"));
    }

    #[test]
    fn test_job_match_lists_at_most_five_keywords() {
        let missing: Vec<String> = ["kafka", "terraform", "graphql", "redis", "docker", "spark"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let suggestions = build_suggestions(&[], 0, &missing);
        let job = suggestions.iter().find(|s| s.kind == "job_match").expect("job match suggestion");
        assert_eq!(job.alternatives.len(), 5);
        assert!(!job.message.contains("spark"));
    }

    #[test]
    fn test_validation_suggestion_mentions_evidence() {
        let evidence = OptimizationEvidence {
            has_bullet_points: true,
            strong_verbs: vec!["led".into(), "built".into()],
            quantifiable_achievements: true,
            passive_voice_count: 0,
            weak_phrase_count: 0,
        };
        let s = validation_suggestion(&evidence);
        assert_eq!(s.severity, Severity::Positive);
        let details = s.details.unwrap_or_default();
        assert!(details.contains("led, built"));
        assert!(details.contains("quantifiable achievements"));
    }
}
