//! Experience Duration Estimator: years of experience from date ranges and
//! explicit "N years of experience" statements.
//!
//! Two signals are combined:
//! 1. Date ranges such as `2018 - 2020`, `2019 to present`, `2015/now`.
//!    Ranges that start or end in the future, or end before they start, are
//!    dropped. An identical (start, end) pair is counted once.
//! 2. The first explicit statement (`5+ years of experience`).
//!
//! The explicit figure replaces the date-range total when it is the only
//! signal, or when it lies within `reconcile_tolerance` years of the total.
//! The result is clamped to `[0, max_experience_years]`.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::analysis::scoring::ScoringConfig;

static DATE_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([0-9]{4})\s*(?:-|–|—|to|/)\s*(present|current|now|[0-9]{4})")
        .expect("date range pattern is valid")
});

static EXPLICIT_YEARS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([0-9]+)\s*\+?\s*years?\s+(?:of\s+)?experience")
        .expect("explicit experience pattern is valid")
});

/// Which signal produced the final figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceSource {
    DateRanges,
    ExplicitStatement,
    None,
}

/// A date range that survived validation and de-duplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Period {
    pub start: i32,
    pub end: i32,
}

impl Period {
    pub fn years(&self) -> u32 {
        self.end.abs_diff(self.start)
    }
}

/// Every intermediate value of one estimation, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExperienceBreakdown {
    pub periods: Vec<Period>,
    pub date_range_total: u32,
    pub explicit_years: u32,
    pub source: ExperienceSource,
    pub years: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExperienceEstimator {
    reconcile_tolerance: u32,
    max_years: u32,
}

impl Default for ExperienceEstimator {
    fn default() -> Self {
        Self::from_config(&ScoringConfig::default())
    }
}

impl ExperienceEstimator {
    pub fn from_config(config: &ScoringConfig) -> Self {
        Self {
            reconcile_tolerance: config.reconcile_tolerance,
            max_years: config.max_experience_years,
        }
    }

    #[allow(dead_code)]
    pub fn estimate(&self, text: &str, current_year: i32) -> u32 {
        self.breakdown(text, current_year).years
    }

    pub fn breakdown(&self, text: &str, current_year: i32) -> ExperienceBreakdown {
        let periods = date_ranges(text, current_year);
        let date_range_total = periods
            .iter()
            .fold(0u32, |total, p| total.saturating_add(p.years()));
        let explicit_years = explicit_years(text);

        let use_explicit = explicit_years > 0
            && (date_range_total == 0
                || explicit_years.abs_diff(date_range_total) <= self.reconcile_tolerance);

        let (chosen, source) = if use_explicit {
            (explicit_years, ExperienceSource::ExplicitStatement)
        } else if date_range_total > 0 {
            (date_range_total, ExperienceSource::DateRanges)
        } else {
            (0, ExperienceSource::None)
        };

        ExperienceBreakdown {
            periods,
            date_range_total,
            explicit_years,
            source,
            years: chosen.min(self.max_years),
        }
    }
}

/// Valid, de-duplicated ranges in order of first appearance.
fn date_ranges(text: &str, current_year: i32) -> Vec<Period> {
    let mut seen = HashSet::new();
    let mut periods = Vec::new();

    for caps in DATE_RANGE_RE.captures_iter(text) {
        let Some(start) = caps.get(1).and_then(|m| m.as_str().parse::<i32>().ok()) else {
            continue;
        };
        let end_token = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
        let end = match end_token.to_lowercase().as_str() {
            "present" | "current" | "now" => current_year,
            year => match year.parse::<i32>() {
                Ok(year) => year,
                Err(_) => continue,
            },
        };

        if start > current_year || end > current_year || start > end {
            continue;
        }

        let period = Period { start, end };
        if seen.insert(period) {
            periods.push(period);
        }
    }

    periods
}

/// Integer of the first "N (+) year(s) (of) experience" statement, or 0.
fn explicit_years(text: &str) -> u32 {
    EXPLICIT_YEARS_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        // digits only, so a parse failure means overflow
        .map(|m| m.as_str().parse::<u32>().unwrap_or(u32::MAX))
        .unwrap_or(0)
}
