use std::str::FromStr;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Everything has a default; without `ANTHROPIC_API_KEY` the service runs rules-only.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub rewrite_timeout_secs: u64,
    /// Fixed seed for metric injection. Unset means a fresh OS-seeded generator per run.
    pub metric_seed: Option<u64>,
    pub enable_external_rewrite: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            port: parse_env("PORT", 8080u16).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            rewrite_timeout_secs: parse_env("REWRITE_TIMEOUT_SECS", 60u64)
                .context("REWRITE_TIMEOUT_SECS must be a whole number of seconds")?,
            metric_seed: optional_env("METRIC_SEED")
                .map(|s| s.parse::<u64>())
                .transpose()
                .context("METRIC_SEED must be an unsigned integer")?,
            enable_external_rewrite: parse_env("ENABLE_EXTERNAL_REWRITE", true)
                .context("ENABLE_EXTERNAL_REWRITE must be true or false")?,
        })
    }

    /// External rewriting happens only when enabled and a provider key is present.
    pub fn external_rewrite_configured(&self) -> bool {
        self.enable_external_rewrite && self.anthropic_api_key.is_some()
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'")),
        None => Ok(default),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tuning constants
// ────────────────────────────────────────────────────────────────────────────

/// Heuristic weights and thresholds used by linting, scoring and reconciliation.
///
/// These are tuning constants, not invariants. `Default` carries the canonical set.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerSettings {
    // Severity deltas applied to the base score.
    pub high_format_weight: i32,
    pub passive_weight: i32,
    pub weak_phrase_weight: i32,
    pub missing_numbers_weight: i32,
    pub long_sentence_weight: i32,
    pub positive_weight: i32,

    // Sub-score penalties per finding.
    pub ats_penalty: u32,
    pub recruiter_penalty: u32,
    pub grammar_penalty: u32,

    // Composite weights with a job description (ats, recruiter, grammar, job match).
    pub weights_with_jd: [f64; 4],
    // Composite weights without one (ats, recruiter, grammar).
    pub weights_without_jd: [f64; 3],

    pub min_strong_verbs: usize,
    pub max_passive_units: usize,
    pub max_weak_units: usize,

    pub short_line_threshold: usize,
    pub bullet_word_limit: usize,
    pub sentence_word_limit: usize,

    pub min_length_ratio: f64,
    pub max_edit_ratio: f64,

    pub ready_threshold: u32,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            high_format_weight: -10,
            passive_weight: -5,
            weak_phrase_weight: -5,
            missing_numbers_weight: -3,
            long_sentence_weight: -2,
            positive_weight: 5,
            ats_penalty: 10,
            recruiter_penalty: 8,
            grammar_penalty: 5,
            weights_with_jd: [0.35, 0.35, 0.15, 0.15],
            weights_without_jd: [0.4, 0.4, 0.2],
            min_strong_verbs: 5,
            max_passive_units: 1,
            max_weak_units: 1,
            short_line_threshold: 40,
            bullet_word_limit: 25,
            sentence_word_limit: 20,
            min_length_ratio: 0.5,
            max_edit_ratio: 0.75,
            ready_threshold: 90,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_composite_weights_sum_to_one() {
        let s = OptimizerSettings::default();
        let with: f64 = s.weights_with_jd.iter().sum();
        let without: f64 = s.weights_without_jd.iter().sum();
        assert!((with - 1.0).abs() < 1e-9, "with-JD weights sum to {with}");
        assert!((without - 1.0).abs() < 1e-9, "without-JD weights sum to {without}");
    }

    #[test]
    fn test_external_rewrite_requires_key() {
        let mut config = Config {
            anthropic_api_key: None,
            port: 8080,
            rust_log: "info".into(),
            rewrite_timeout_secs: 60,
            metric_seed: None,
            enable_external_rewrite: true,
        };
        assert!(!config.external_rewrite_configured());
        config.anthropic_api_key = Some("sk-test".into());
        assert!(config.external_rewrite_configured());
        config.enable_external_rewrite = false;
        assert!(!config.external_rewrite_configured());
    }
}
