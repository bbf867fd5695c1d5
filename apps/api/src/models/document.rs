//! Document model — the immutable resume input and its segmented units.

use serde::{Deserialize, Serialize};

use crate::lint::segmenter::{segment, Segmenter};

/// Section label used until the first header is seen.
pub const UNKNOWN_SECTION: &str = "UNKNOWN";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Bullet,
    Paragraph,
    Header,
}

/// A logical line of resume content after segmentation.
///
/// `line_start..=line_end` are the 0-based indices of the raw lines merged into this unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub text: String,
    pub kind: UnitKind,
    pub section: String,
    pub position: usize,
    pub line_start: usize,
    pub line_end: usize,
}

impl Unit {
    pub fn is_bullet(&self) -> bool {
        self.kind == UnitKind::Bullet
    }

    pub fn is_header(&self) -> bool {
        self.kind == UnitKind::Header
    }

    /// True when the unit belongs to a work-experience style section.
    pub fn in_experience_section(&self) -> bool {
        self.section.contains("EXPERIENCE")
    }
}

/// The full resume text plus its derived units. Owns its units outright.
#[derive(Debug, Clone)]
pub struct Document {
    raw: String,
    units: Vec<Unit>,
}

impl Document {
    pub fn parse(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            units: segment(raw),
        }
    }

    /// Parses with a caller-tuned segmenter.
    pub fn parse_with(raw: &str, segmenter: &Segmenter) -> Self {
        Self {
            raw: raw.to_string(),
            units: segmenter.segment(raw),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Units that carry content (everything except section headers).
    pub fn content_units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|u| !u.is_header())
    }

    pub fn bullets(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|u| u.is_bullet())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tracks_sections() {
        let doc = Document::parse("WORK EXPERIENCE\n• Built the billing service\n\nEDUCATION\nBSc Computer Science");
        assert_eq!(doc.units().len(), 4);
        assert_eq!(doc.units()[1].section, "WORK EXPERIENCE");
        assert!(doc.units()[1].in_experience_section());
        assert_eq!(doc.units()[3].section, "EDUCATION");
    }

    #[test]
    fn test_content_units_skip_headers() {
        let doc = Document::parse("SKILLS\n• Rust, Go");
        assert_eq!(doc.content_units().count(), 1);
        assert_eq!(doc.bullets().count(), 1);
    }

    #[test]
    fn test_empty_document_has_no_units() {
        let doc = Document::parse("");
        assert!(doc.units().is_empty());
        assert_eq!(doc.raw(), "");
    }
}
