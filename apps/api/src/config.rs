use std::str::FromStr;

use anyhow::{bail, Context, Result};
use chrono::{Datelike, Utc};

use crate::analysis::scoring::{MAX_EXPERIENCE_YEARS, SCORE_CAP};
use crate::analysis::ScoringConfig;

pub const DEFAULT_SUMMARIZER_URL: &str =
    "https://api-inference.huggingface.co/models/facebook/bart-large-cnn";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub huggingface_api_key: String,
    pub summarizer_url: String,
    pub summarizer_timeout_secs: u64,
    /// Pins the year used for "present" ranges. `None` reads the system clock.
    pub current_year: Option<i32>,
    pub scoring: ScoringConfig,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = ScoringConfig::default();
        let scoring = ScoringConfig {
            keyword_weight: optional_env("SCORE_KEYWORD_WEIGHT")?
                .unwrap_or(defaults.keyword_weight),
            score_cap: optional_env("SCORE_CAP")?.unwrap_or(defaults.score_cap),
            reconcile_tolerance: optional_env("EXPERIENCE_RECONCILE_TOLERANCE")?
                .unwrap_or(defaults.reconcile_tolerance),
            max_experience_years: optional_env("EXPERIENCE_MAX_YEARS")?
                .unwrap_or(defaults.max_experience_years),
        };
        validate_scoring(&scoring)?;

        Ok(Config {
            huggingface_api_key: require_env("HUGGINGFACE_API_KEY")?,
            summarizer_url: std::env::var("SUMMARIZER_URL")
                .unwrap_or_else(|_| DEFAULT_SUMMARIZER_URL.to_string()),
            summarizer_timeout_secs: optional_env("SUMMARIZER_TIMEOUT_SECS")?.unwrap_or(30),
            current_year: optional_env("CURRENT_YEAR")?,
            scoring,
            port: optional_env("PORT")?.unwrap_or(8080),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Year used to resolve "present"/"current"/"now" in date ranges.
    pub fn current_year(&self) -> i32 {
        self.current_year.unwrap_or_else(|| Utc::now().year())
    }
}

/// Overrides may tighten the scoring limits but never widen them past
/// the ranges an `AnalysisResult` guarantees.
fn validate_scoring(scoring: &ScoringConfig) -> Result<()> {
    if scoring.keyword_weight == 0 {
        bail!("SCORE_KEYWORD_WEIGHT must be greater than 0");
    }
    if scoring.score_cap > SCORE_CAP {
        bail!(
            "SCORE_CAP must not exceed {SCORE_CAP}, got {}",
            scoring.score_cap
        );
    }
    if scoring.max_experience_years > MAX_EXPERIENCE_YEARS {
        bail!(
            "EXPERIENCE_MAX_YEARS must not exceed {MAX_EXPERIENCE_YEARS}, got {}",
            scoring.max_experience_years
        );
    }
    Ok(())
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(None),
    }
}
