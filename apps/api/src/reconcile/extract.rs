//! Facts an external rewrite must carry over verbatim: metric tokens with their spans,
//! approximate percentages, "Title, Company (dates)" lines, and technology names.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::scoring::tech_stack::extract_tech_stack;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Currency,
    Percentage,
    Multiplier,
    TeamSize,
    TimePeriod,
    Count,
}

/// A quantification token and its byte span in the text it was extracted from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedMetric {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub kind: MetricKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobTitleLine {
    pub title: String,
    pub company: String,
    pub dates: String,
    /// The whole trimmed line; this is what must survive a rewrite.
    pub line: String,
}

/// Checked in order; earlier kinds win when spans overlap.
static METRIC_MATCHERS: Lazy<Vec<(MetricKind, Regex)>> = Lazy::new(|| {
    [
        (
            MetricKind::Currency,
            r"(?i)\$\s?\d[\d,]*(?:\.\d+)?(?:\s?(?:million|billion|[kmb])\b)?",
        ),
        (MetricKind::Percentage, r"(?i)\d+(?:\.\d+)?\s?(?:%|percent\b)"),
        (MetricKind::Multiplier, r"(?i)\b\d+(?:\.\d+)?x\b"),
        (MetricKind::TeamSize, r"(?i)\bteam\s+of\s+\d+"),
        (
            MetricKind::TimePeriod,
            r"(?i)\b\d+(?:\.\d+)?\s?(?:seconds|minutes|hours|hrs|days|weeks|months|years|ms)\b",
        ),
        (
            MetricKind::Count,
            r"(?i)\b\d[\d,]*(?:\.\d+)?\+?\s?(?:million|billion|k|people|team members|members|developers|engineers|clients|customers|users|projects|times|requests|transactions)\b",
        ),
    ]
    .into_iter()
    .map(|(kind, pattern)| (kind, Regex::new(pattern).expect("valid metric extraction regex")))
    .collect()
});

static APPROXIMATE_PERCENTAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"~\s*\d+(?:\.\d+)?%").expect("valid approximate percentage regex"));

static JOB_TITLE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Z][^,()]{1,80}?),\s*([^,()]{1,80}?)\s*\(([^()]*\d{4}[^()]*)\)$")
        .expect("valid job title regex")
});

/// Non-overlapping metric tokens in order of appearance.
pub fn extract_metrics(text: &str) -> Vec<ExtractedMetric> {
    let mut found: Vec<ExtractedMetric> = Vec::new();
    for (kind, re) in METRIC_MATCHERS.iter() {
        for m in re.find_iter(text) {
            let overlaps = found.iter().any(|f| m.start() < f.end && f.start < m.end());
            if !overlaps {
                found.push(ExtractedMetric {
                    text: m.as_str().to_string(),
                    start: m.start(),
                    end: m.end(),
                    kind: *kind,
                });
            }
        }
    }
    found.sort_by_key(|m| m.start);
    found
}

pub fn extract_approximate_percentages(text: &str) -> Vec<String> {
    APPROXIMATE_PERCENTAGE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

pub fn extract_job_titles(text: &str) -> Vec<JobTitleLine> {
    text.lines()
        .map(str::trim)
        .filter_map(|line| {
            let caps = JOB_TITLE_LINE.captures(line)?;
            Some(JobTitleLine {
                title: caps[1].trim().to_string(),
                company: caps[2].trim().to_string(),
                dates: caps[3].trim().to_string(),
                line: line.to_string(),
            })
        })
        .collect()
}

/// Everything extracted from an original resume for reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreservedFacts {
    pub metrics: Vec<ExtractedMetric>,
    pub approximate_percentages: Vec<String>,
    pub job_titles: Vec<JobTitleLine>,
    pub skills: Vec<String>,
}

impl PreservedFacts {
    pub fn extract(original: &str) -> Self {
        Self {
            metrics: extract_metrics(original),
            approximate_percentages: extract_approximate_percentages(original),
            job_titles: extract_job_titles(original),
            skills: extract_tech_stack(original),
        }
    }

    /// Distinct metric strings, in order of appearance.
    pub fn metric_tokens(&self) -> Vec<&str> {
        let mut tokens: Vec<&str> = Vec::new();
        for m in &self.metrics {
            if !tokens.contains(&m.text.as_str()) {
                tokens.push(&m.text);
            }
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_metric_kinds_and_spans() {
        let text = "Saved $120K, cut latency by 30%, 3x throughput, team of 8, over 6 months for 500 users";
        let metrics = extract_metrics(text);
        let kinds: Vec<MetricKind> = metrics.iter().map(|m| m.kind).collect();
        assert_eq!(
            kinds,
            vec![
                MetricKind::Currency,
                MetricKind::Percentage,
                MetricKind::Multiplier,
                MetricKind::TeamSize,
                MetricKind::TimePeriod,
                MetricKind::Count,
            ]
        );
        for m in &metrics {
            assert_eq!(&text[m.start..m.end], m.text);
        }
        assert_eq!(metrics[0].text, "$120K");
        assert_eq!(metrics[1].text, "30%");
    }

    #[test]
    fn test_overlapping_matches_are_dropped() {
        let metrics = extract_metrics("Raised $2 million");
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].text, "$2 million");
    }

    #[test]
    fn test_no_metrics_in_plain_text() {
        assert!(extract_metrics("Built pages with HTML and CSS").is_empty());
    }

    #[test]
    fn test_approximate_percentages() {
        assert_eq!(
            extract_approximate_percentages("Reached ~100% uptime and ~ 40% savings"),
            vec!["~100%".to_string(), "~ 40%".to_string()]
        );
    }

    #[test]
    fn test_job_title_lines() {
        let text = "WORK EXPERIENCE\nSenior Engineer, Acme Corp (Jan 2020 - Present)\n• Led things";
        let titles = extract_job_titles(text);
        assert_eq!(titles.len(), 1);
        assert_eq!(titles[0].title, "Senior Engineer");
        assert_eq!(titles[0].company, "Acme Corp");
        assert_eq!(titles[0].dates, "Jan 2020 - Present");
        assert_eq!(titles[0].line, "Senior Engineer, Acme Corp (Jan 2020 - Present)");
    }

    #[test]
    fn test_line_without_year_is_not_a_title() {
        assert!(extract_job_titles("Engineer, Acme (recently)").is_empty());
    }

    #[test]
    fn test_preserved_facts_dedupes_tokens() {
        let facts = PreservedFacts::extract("• Cut costs by 30%\n• Grew usage by 30%\nSkills: HTML, CSS");
        assert_eq!(facts.metric_tokens(), vec!["30%"]);
        assert_eq!(facts.skills, vec!["CSS".to_string(), "HTML".to_string()]);
    }
}
