use serde::Serialize;

use crate::analysis::fit::aggregate;
use crate::analysis::scoring::{MAX_EXPERIENCE_YEARS, SCORE_CAP};

/// The four keyword-derived sub-scores of one CV, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubScores {
    pub skills: u32,
    pub soft_skills: u32,
    pub education: u32,
    pub relevant_experience: u32,
}

impl SubScores {
    pub fn fit(&self) -> u32 {
        aggregate(
            self.skills,
            self.soft_skills,
            self.education,
            self.relevant_experience,
        )
    }

    fn all(&self) -> [u32; 4] {
        [
            self.skills,
            self.soft_skills,
            self.education,
            self.relevant_experience,
        ]
    }
}

/// Complete analysis of one CV. Immutable once built; `fit_score` is
/// always derived from the sub-scores and cannot be set directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    summary: String,
    experience_years: u32,
    skill_score: u32,
    soft_skill_score: u32,
    education_score: u32,
    relevant_experience_score: u32,
    fit_score: u32,
}

impl AnalysisResult {
    pub fn new(summary: String, experience_years: u32, scores: SubScores) -> Self {
        Self {
            summary,
            experience_years,
            skill_score: scores.skills,
            soft_skill_score: scores.soft_skills,
            education_score: scores.education,
            relevant_experience_score: scores.relevant_experience,
            fit_score: scores.fit(),
        }
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn experience_years(&self) -> u32 {
        self.experience_years
    }

    pub fn skill_score(&self) -> u32 {
        self.skill_score
    }

    pub fn soft_skill_score(&self) -> u32 {
        self.soft_skill_score
    }

    pub fn education_score(&self) -> u32 {
        self.education_score
    }

    pub fn relevant_experience_score(&self) -> u32 {
        self.relevant_experience_score
    }

    pub fn fit_score(&self) -> u32 {
        self.fit_score
    }

    pub fn scores(&self) -> SubScores {
        SubScores {
            skills: self.skill_score,
            soft_skills: self.soft_skill_score,
            education: self.education_score,
            relevant_experience: self.relevant_experience_score,
        }
    }

    /// Checks the range invariants: non-empty summary, years in
    /// `[0, MAX_EXPERIENCE_YEARS]`, every score (fit included) in `[0, SCORE_CAP]`.
    /// The limits are fixed, whatever the scorer was configured with.
    pub fn check_bounds(&self) -> Result<(), String> {
        if self.summary.trim().is_empty() {
            return Err("summary is empty".to_string());
        }
        if self.experience_years > MAX_EXPERIENCE_YEARS {
            return Err(format!(
                "experience_years {} exceeds {MAX_EXPERIENCE_YEARS}",
                self.experience_years
            ));
        }
        if let Some(score) = self
            .scores()
            .all()
            .into_iter()
            .chain([self.fit_score])
            .find(|s| *s > SCORE_CAP)
        {
            return Err(format!("score {score} exceeds {SCORE_CAP}"));
        }
        Ok(())
    }
}
