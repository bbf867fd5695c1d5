use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    High,
    Medium,
    Low,
    Positive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    WeakPhrase,
    PassiveVoice,
    MissingNumbers,
    LongSentence,
    Format,
    StrongVerbs,
    Metrics,
    Structure,
}

impl FindingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingKind::WeakPhrase => "weak_phrase",
            FindingKind::PassiveVoice => "passive_voice",
            FindingKind::MissingNumbers => "missing_numbers",
            FindingKind::LongSentence => "long_sentence",
            FindingKind::Format => "format",
            FindingKind::StrongVerbs => "strong_verbs",
            FindingKind::Metrics => "metrics",
            FindingKind::Structure => "structure",
        }
    }
}

/// One issue or strength detected on a unit or on the whole document.
///
/// Findings are snapshot values: `unit` is a back-reference by position only and
/// `text` carries the unit text as it was when the finding was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub kind: FindingKind,
    pub message: String,
    pub unit: Option<usize>,
    pub text: Option<String>,
    pub alternatives: Vec<String>,
}

impl Finding {
    pub fn document(severity: Severity, kind: FindingKind, message: impl Into<String>) -> Self {
        Self {
            severity,
            kind,
            message: message.into(),
            unit: None,
            text: None,
            alternatives: Vec::new(),
        }
    }

    pub fn for_unit(
        severity: Severity,
        kind: FindingKind,
        message: impl Into<String>,
        position: usize,
        text: &str,
    ) -> Self {
        Self {
            severity,
            kind,
            message: message.into(),
            unit: Some(position),
            text: Some(text.to_string()),
            alternatives: Vec::new(),
        }
    }

    pub fn with_alternatives(mut self, alternatives: Vec<String>) -> Self {
        self.alternatives = alternatives;
        self
    }

    pub fn is_positive(&self) -> bool {
        self.severity == Severity::Positive
    }
}
