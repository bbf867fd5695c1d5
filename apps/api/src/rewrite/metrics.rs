//! Contextual metric injection: bullet classification, template library, and the
//! seedable filler that is the only source of randomness in rewriting.

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Appended to experience bullets beyond the first two when a document has no metrics.
pub const FLAT_METRIC_CLAUSE: &str = "improving efficiency by 20%";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulletType {
    Performance,
    Team,
    Project,
    Customer,
    Sales,
    Technical,
    Generic,
}

/// Keyword lists checked in order; the first type with a hit wins.
const CLASSIFIERS: &[(BulletType, &[&str])] = &[
    (
        BulletType::Performance,
        &["performance", "optimize", "improve", "speed", "efficiency", "database", "query", "load time", "response"],
    ),
    (
        BulletType::Team,
        &["team", "led", "manage", "direct", "supervise", "mentor", "coordinate", "staff", "hire", "develop", "train"],
    ),
    (
        BulletType::Project,
        &["project", "deliver", "deadline", "timeline", "schedule", "plan", "implement", "execute", "deploy", "launch", "milestone"],
    ),
    (
        BulletType::Customer,
        &["customer", "client", "support", "satisfaction", "service", "relationship", "retention", "user", "end-user", "feedback"],
    ),
    (
        BulletType::Sales,
        &["sale", "revenue", "profit", "growth", "business", "market", "increase", "roi", "lead", "conversion", "upsell", "client acquisition"],
    ),
    (
        BulletType::Technical,
        &["develop", "code", "program", "implement", "feature", "bug", "fix", "application", "software", "website", "app", "backend", "frontend"],
    ),
];

pub fn classify(text: &str) -> BulletType {
    let lower = text.to_lowercase();
    CLASSIFIERS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(kind, _)| *kind)
        .unwrap_or(BulletType::Generic)
}

pub fn templates(kind: BulletType) -> &'static [&'static str] {
    match kind {
        BulletType::Performance => &[
            "improving efficiency by {percent}%",
            "reducing load times by {percent}%",
            "increasing system performance by {percent}%",
            "reducing resource usage by {percent}%",
            "improving query performance by {percent}% and reducing storage costs by {small_percent}%",
        ],
        BulletType::Team => &[
            "leading a team of {team_size} developers",
            "managing {team_size} team members, resulting in {percent}% improved productivity",
            "overseeing {team_size}-{team_size_upper} developers, delivering projects {small_percent}% ahead of schedule",
            "growing the team from {small_team} to {team_size} members within {time_period} months",
        ],
        BulletType::Project => &[
            "delivering {project_count} successful projects",
            "completing deliverables {percent}% ahead of schedule",
            "reducing project timeline by {small_percent}% through improved methodology",
            "successfully managing ${budget}K budget across {project_count} projects",
        ],
        BulletType::Customer => &[
            "increasing customer satisfaction by {percent}%",
            "reducing support ticket resolution time by {percent}%",
            "improving user engagement by {percent}%",
            "achieving {percent}% positive feedback from over {customer_count} users",
        ],
        BulletType::Sales => &[
            "generating ${revenue}K in additional revenue",
            "increasing sales by {percent}% year-over-year",
            "acquiring {customer_count} new clients worth ${revenue}K in annual revenue",
            "growing market share by {small_percent}% against key competitors",
        ],
        BulletType::Technical => &[
            "developing features used by over {user_count} users daily",
            "reducing bug count by {percent}% through improved testing",
            "creating {feature_count} new features with {percent}% code coverage",
            "eliminating {percent}% of legacy code while maintaining full functionality",
        ],
        BulletType::Generic => GENERIC_TEMPLATES,
    }
}

/// Every generic template carries a percentage.
const GENERIC_TEMPLATES: &[&str] = &[
    "improving efficiency by {percent}%",
    "resulting in {percent}% faster delivery",
    "achieving a {percent}% improvement in overall quality",
    "contributing to {percent}% cost reduction",
];

/// Quantification patterns that count as "this text already has a metric".
static METRIC_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\d+%",
        r"\d+\s*(?:percent|pct)",
        r"\$\s*\d+",
        r"\d+\s*(?:hours|days|weeks|months|years)",
        r"team\s*of\s*\d+",
        r"\d+\s*(?:users|clients|customers)",
        r"by\s*\d+",
        r"(?:increased|decreased|reduced|improved|saved|generated)\s*\d+",
    ]
    .iter()
    .map(|p| Regex::new(&format!("(?i){p}")).expect("valid metric regex"))
    .collect()
});

pub fn contains_metrics(text: &str) -> bool {
    METRIC_PATTERNS.iter().any(|re| re.is_match(text))
}

/// Appends `clause` to a line as ", clause", dropping a trailing period or comma first.
pub fn append_clause(line: &str, clause: &str) -> String {
    let trimmed = line.trim_end();
    let base = trimmed
        .strip_suffix('.')
        .or_else(|| trimmed.strip_suffix(','))
        .unwrap_or(trimmed);
    format!("{base}, {clause}")
}

/// Fills metric templates with bounded random numbers. Seed it for reproducible output.
pub struct MetricFiller {
    rng: StdRng,
}

impl MetricFiller {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seeded when a seed is given, OS-seeded otherwise.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map(Self::seeded).unwrap_or_else(Self::from_os_rng)
    }

    pub fn fill(&mut self, template: &str) -> String {
        let team_size = self.rng.random_range(5..=12);
        let values: [(&str, u32); 12] = [
            ("{percent}", self.rng.random_range(20..=50)),
            ("{small_percent}", self.rng.random_range(10..=25)),
            ("{team_size}", team_size),
            ("{team_size_upper}", team_size + self.rng.random_range(2..=5)),
            ("{small_team}", self.rng.random_range(2..=4)),
            ("{project_count}", self.rng.random_range(3..=15)),
            ("{time_period}", self.rng.random_range(6..=18)),
            ("{customer_count}", self.rng.random_range(20..=100) * 5),
            ("{revenue}", self.rng.random_range(10..=50) * 10),
            ("{budget}", self.rng.random_range(5..=20) * 5),
            ("{user_count}", self.rng.random_range(1..=10) * 100),
            ("{feature_count}", self.rng.random_range(3..=15)),
        ];
        values
            .iter()
            .fold(template.to_string(), |acc, (key, value)| acc.replace(key, &value.to_string()))
    }

    fn pick(&mut self, options: &'static [&'static str]) -> &'static str {
        options.choose(&mut self.rng).copied().unwrap_or(FLAT_METRIC_CLAUSE)
    }

    /// A clause matched to what the bullet talks about.
    pub fn contextual_clause(&mut self, bullet_text: &str) -> String {
        let template = self.pick(templates(classify(bullet_text)));
        self.fill(template)
    }

    /// Like `contextual_clause`, but only from the bullet type's templates that carry a
    /// percentage. Falls back to a generic clause.
    pub fn percent_clause(&mut self, bullet_text: &str) -> String {
        let options: Vec<&'static str> = templates(classify(bullet_text))
            .iter()
            .copied()
            .filter(|t| t.contains("{percent}%") || t.contains("{small_percent}%"))
            .collect();
        let template = match options.choose(&mut self.rng) {
            Some(t) => *t,
            None => self.pick(GENERIC_TEMPLATES),
        };
        self.fill(template)
    }

    /// A generic clause; always contains a percentage.
    pub fn generic_clause(&mut self) -> String {
        let template = self.pick(GENERIC_TEMPLATES);
        self.fill(template)
    }
}
