//! Bullet Segmenter — splits raw resume text into bullets, paragraphs and section headers.
//!
//! Continuation lines (a bullet broken across lines by PDF extraction or free typing) are
//! merged into the open bullet with a single space. When the bullet-vs-continuation call is
//! ambiguous the segmenter prefers continuation; it never fails.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::lint::vocabulary::is_bullet_glyph;
use crate::models::document::{Unit, UnitKind, UNKNOWN_SECTION};

/// Lines shorter than this are assumed to be broken mid-sentence.
pub const DEFAULT_SHORT_LINE_THRESHOLD: usize = 40;

/// Max words in an all-caps line for it to count as a section header.
const HEADER_MAX_WORDS: usize = 4;

const TERMINAL_PUNCTUATION: &[char] = &['.', '!', '?', ':', ';'];

static NUMBERED_BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\d+|[a-zA-Z])[.)]\s").expect("valid numbered bullet regex"));

static BARE_NUMERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\d{1,3}|[a-zA-Z])[.)]?$").expect("valid bare numeral regex"));

/// True if the (trimmed) line opens a new bullet.
pub fn starts_bullet(line: &str) -> bool {
    line.chars().next().map(is_bullet_glyph).unwrap_or(false) || NUMBERED_BULLET.is_match(line)
}

/// All-uppercase with at most four words, and not itself a bullet.
pub fn is_section_header(line: &str) -> bool {
    if starts_bullet(line) {
        return false;
    }
    let has_cased = line.chars().any(|c| c.is_alphabetic() && (c.is_uppercase() || c.is_lowercase()));
    let has_lower = line.chars().any(|c| c.is_lowercase());
    has_cased && !has_lower && line.split_whitespace().count() <= HEADER_MAX_WORDS
}

/// A unit made only of a bullet glyph or a bare numeral like "1." carries no content.
fn is_content_free(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty()
        || trimmed
            .chars()
            .all(|c| is_bullet_glyph(c) || c.is_whitespace())
        || (NUMBERED_BULLET.is_match(&format!("{trimmed} ")) && BARE_NUMERAL.is_match(trimmed))
}

#[derive(Debug, Clone)]
pub struct Segmenter {
    pub short_line_threshold: usize,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self {
            short_line_threshold: DEFAULT_SHORT_LINE_THRESHOLD,
        }
    }
}

struct OpenBullet {
    text: String,
    line_start: usize,
    line_end: usize,
}

struct UnitSink {
    units: Vec<Unit>,
}

impl UnitSink {
    fn push(&mut self, text: String, kind: UnitKind, section: &str, line_start: usize, line_end: usize) {
        if is_content_free(&text) {
            return;
        }
        let position = self.units.len();
        self.units.push(Unit {
            text,
            kind,
            section: section.to_string(),
            position,
            line_start,
            line_end,
        });
    }

    fn close(&mut self, open: &mut Option<OpenBullet>, section: &str) {
        if let Some(bullet) = open.take() {
            self.push(
                bullet.text,
                UnitKind::Bullet,
                section,
                bullet.line_start,
                bullet.line_end,
            );
        }
    }
}

impl Segmenter {
    pub fn new(short_line_threshold: usize) -> Self {
        Self {
            short_line_threshold,
        }
    }

    /// Segments raw text into ordered units. Empty input yields no units.
    pub fn segment(&self, text: &str) -> Vec<Unit> {
        let mut sink = UnitSink { units: Vec::new() };
        let mut section = UNKNOWN_SECTION.to_string();
        let mut open: Option<OpenBullet> = None;
        let mut prev_line: Option<&str> = None;

        for (idx, raw_line) in text.split('\n').enumerate() {
            let line = raw_line.trim();

            if line.is_empty() {
                sink.close(&mut open, &section);
                prev_line = None;
                continue;
            }

            if starts_bullet(line) {
                sink.close(&mut open, &section);
                open = Some(OpenBullet {
                    text: line.to_string(),
                    line_start: idx,
                    line_end: idx,
                });
            } else if is_section_header(line) {
                sink.close(&mut open, &section);
                section = line.to_string();
                sink.push(line.to_string(), UnitKind::Header, &section, idx, idx);
            } else if open.is_some() && self.is_continuation(prev_line, line) {
                if let Some(bullet) = open.as_mut() {
                    bullet.text.push(' ');
                    bullet.text.push_str(line);
                    bullet.line_end = idx;
                }
            } else {
                sink.close(&mut open, &section);
                sink.push(line.to_string(), UnitKind::Paragraph, &section, idx, idx);
            }

            prev_line = Some(line);
        }

        sink.close(&mut open, &section);
        sink.units
    }

    /// Continuation if the previous line is unterminated, short, or the candidate
    /// does not start with an uppercase letter.
    fn is_continuation(&self, prev_line: Option<&str>, line: &str) -> bool {
        let Some(prev) = prev_line else {
            return true;
        };
        let unterminated = !prev.ends_with(TERMINAL_PUNCTUATION);
        let short = prev.chars().count() < self.short_line_threshold;
        let lower_start = !line.chars().next().map(char::is_uppercase).unwrap_or(false);
        unterminated || short || lower_start
    }
}

/// Segments with the default thresholds.
pub fn segment(text: &str) -> Vec<Unit> {
    Segmenter::default().segment(text)
}
