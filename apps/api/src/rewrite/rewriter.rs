//! DeterministicRewriter — rewrites bullet units line by line with zero external calls.
//!
//! Only bullet lines change. Line count and order are preserved, so continuation lines
//! of a merged bullet are polished in place and metrics land on the bullet's last line.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

use crate::lint::vocabulary::BULLET_GLYPHS;
use crate::models::document::{Document, Unit};
use crate::rewrite::metrics::{append_clause, contains_metrics, MetricFiller, FLAT_METRIC_CLAUSE};
use crate::rewrite::phrases::{collapse_verb_pairs, remove_redundant_phrases, substitute_weak_phrases};
use crate::rewrite::tense::normalize_progressive;

/// Experience bullets that get a templated metric before the flat clause takes over.
const FORCED_TEMPLATE_BULLETS: usize = 2;

static BULLET_START: Lazy<Regex> = Lazy::new(|| {
    let glyphs = BULLET_GLYPHS
        .iter()
        .map(|g| regex::escape(&g.to_string()))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"^(\s*(?:{glyphs}|(?:\d+|[a-zA-Z])[.)])\s*)(\p{{Ll}})(\w*)"))
        .expect("valid bullet start regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutcome {
    pub text: String,
    pub phrase_substitutions: usize,
    pub metrics_injected: usize,
    pub forced_metrics: usize,
}

#[derive(Debug, Clone, Default)]
pub struct DeterministicRewriter;

/// Applies `f` to a line without its trailing carriage return, then restores it.
fn keep_line_ending(line: &str, f: impl FnOnce(&str) -> String) -> String {
    match line.strip_suffix('\r') {
        Some(body) => format!("{}\r", f(body)),
        None => f(line),
    }
}

/// Leaves mixed-case words such as "iOS" or "eBay" alone.
fn capitalize_bullet_start(line: &str) -> String {
    BULLET_START
        .replace(line, |caps: &Captures| {
            if caps[3].chars().any(char::is_uppercase) {
                caps[0].to_string()
            } else {
                format!("{}{}{}", &caps[1], caps[2].to_uppercase(), &caps[3])
            }
        })
        .into_owned()
}

/// Steps 1–3 plus clean-up for a single line: weak phrases, progressive tense, verb
/// pairs, redundant phrases. Returns the line and how many weak phrases were replaced.
pub fn polish_line(line: &str, first_line_of_bullet: bool) -> (String, usize) {
    let mut substitutions = 0;
    let polished = keep_line_ending(line, |body| {
        let (text, n) = substitute_weak_phrases(body);
        substitutions = n;
        let text = normalize_progressive(&text);
        let text = collapse_verb_pairs(&text);
        let text = remove_redundant_phrases(&text);
        if first_line_of_bullet {
            capitalize_bullet_start(&text)
        } else {
            text
        }
    });
    (polished, substitutions)
}

fn unit_text(lines: &[String], unit: &Unit) -> String {
    lines[unit.line_start..=unit.line_end]
        .iter()
        .map(|l| l.trim())
        .collect::<Vec<_>>()
        .join(" ")
}

impl DeterministicRewriter {
    pub fn rewrite(
        &self,
        doc: &Document,
        bullets_needing_metrics: &[usize],
        filler: &mut MetricFiller,
    ) -> RewriteOutcome {
        let mut lines: Vec<String> = doc.raw().split('\n').map(str::to_string).collect();
        let mut phrase_substitutions = 0;
        let mut metrics_injected = 0;

        // Without any quantification in the input, the leading experience bullets must
        // each end up carrying a percentage.
        let force = !contains_metrics(doc.raw());
        let leading: Vec<usize> = doc
            .bullets()
            .filter(|u| u.in_experience_section())
            .take(FORCED_TEMPLATE_BULLETS)
            .map(|u| u.position)
            .collect();

        for unit in doc.bullets() {
            if unit.line_end >= lines.len() {
                continue;
            }

            for idx in unit.line_start..=unit.line_end {
                let (polished, n) = polish_line(&lines[idx], idx == unit.line_start);
                lines[idx] = polished;
                phrase_substitutions += n;
            }

            if bullets_needing_metrics.contains(&unit.position) {
                let text = unit_text(&lines, unit);
                if !text.chars().any(|c| c.is_ascii_digit()) {
                    let clause = if force && leading.contains(&unit.position) {
                        filler.percent_clause(&text)
                    } else {
                        filler.contextual_clause(&text)
                    };
                    lines[unit.line_end] = keep_line_ending(&lines[unit.line_end], |l| append_clause(l, &clause));
                    metrics_injected += 1;
                }
            }
        }

        let mut forced_metrics = 0;
        if force {
            for unit in doc.bullets().filter(|u| u.in_experience_section()) {
                if unit.line_end >= lines.len() || contains_metrics(&unit_text(&lines, unit)) {
                    continue;
                }
                let clause = if leading.contains(&unit.position) {
                    filler.generic_clause()
                } else {
                    FLAT_METRIC_CLAUSE.to_string()
                };
                lines[unit.line_end] = keep_line_ending(&lines[unit.line_end], |l| append_clause(l, &clause));
                forced_metrics += 1;
            }
        }

        debug!(
            phrase_substitutions,
            metrics_injected, forced_metrics, "Deterministic rewrite complete"
        );

        RewriteOutcome {
            text: lines.join("\n"),
            phrase_substitutions,
            metrics_injected,
            forced_metrics,
        }
    }
}
