use serde::{Deserialize, Serialize};

use crate::analysis::keywords::KeywordSet;

/// Points each matched keyword contributes.
pub const KEYWORD_WEIGHT: u32 = 20;
/// Upper bound of every keyword score.
pub const SCORE_CAP: u32 = 100;
/// Max distance (in years) between an explicit statement and the date ranges
/// for the statement to win.
pub const RECONCILE_TOLERANCE: u32 = 2;
/// Upper bound of the experience estimate.
pub const MAX_EXPERIENCE_YEARS: u32 = 50;

/// Tunable constants of the heuristic scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub keyword_weight: u32,
    pub score_cap: u32,
    pub reconcile_tolerance: u32,
    pub max_experience_years: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            keyword_weight: KEYWORD_WEIGHT,
            score_cap: SCORE_CAP,
            reconcile_tolerance: RECONCILE_TOLERANCE,
            max_experience_years: MAX_EXPERIENCE_YEARS,
        }
    }
}

/// Substring-presence keyword scorer.
///
/// Every keyword found anywhere in the case-folded text adds `weight`
/// points; the total is capped at `cap`. Word boundaries are not checked,
/// so "html" also matches inside "xhtml".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordScorer {
    weight: u32,
    cap: u32,
}

impl Default for KeywordScorer {
    fn default() -> Self {
        Self::from_config(&ScoringConfig::default())
    }
}

impl KeywordScorer {
    pub fn from_config(config: &ScoringConfig) -> Self {
        Self {
            weight: config.keyword_weight,
            cap: config.score_cap,
        }
    }

    pub fn score(&self, text: &str, keywords: &KeywordSet) -> u32 {
        let hits = self.matched(text, keywords).len() as u32;
        hits.saturating_mul(self.weight).min(self.cap)
    }

    /// Keywords present in `text`, in catalogue order.
    pub fn matched<'k>(&self, text: &str, keywords: &'k KeywordSet) -> Vec<&'k str> {
        if text.is_empty() {
            return vec![];
        }
        let text = text.to_lowercase();
        keywords.iter().filter(|k| text.contains(k)).collect()
    }
}
