//! Analysis Pipeline: turns one document's extracted text into an `AnalysisResult`.
//!
//! Flow: blank-text guard → keyword scores (skills, soft skills, education,
//!       relevant experience) + experience estimate → summary → result.
//!
//! Scoring and estimation are pure and run on the blocking pool; a panic
//! there surfaces as `AnalysisError::Processing`. This module is the
//! observability boundary: the pure components never log, the pipeline
//! logs what they produced.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::analysis::experience::{ExperienceBreakdown, ExperienceEstimator};
use crate::analysis::keywords::KeywordCatalog;
use crate::analysis::scoring::{KeywordScorer, ScoringConfig};
use crate::models::analysis::{AnalysisResult, SubScores};
use crate::summarizer::Summarizer;

/// Characters of extracted text included in the extraction log event.
const EXTRACT_SAMPLE_CHARS: usize = 500;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("No text could be extracted from document {document_id}")]
    EmptyExtraction { document_id: String },

    #[error("Processing of document {document_id} failed: {detail}")]
    Processing { document_id: String, detail: String },
}

/// Output of the pure scoring stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringOutcome {
    pub scores: SubScores,
    pub experience: ExperienceBreakdown,
}

/// Runs every keyword score and the experience estimate over `text`.
pub fn score_document(
    catalog: &KeywordCatalog,
    scorer: &KeywordScorer,
    estimator: &ExperienceEstimator,
    text: &str,
    current_year: i32,
) -> ScoringOutcome {
    ScoringOutcome {
        scores: SubScores {
            skills: scorer.score(text, &catalog.skills),
            soft_skills: scorer.score(text, &catalog.soft_skills),
            education: scorer.score(text, &catalog.education),
            relevant_experience: scorer.score(text, &catalog.relevant_experience),
        },
        experience: estimator.breakdown(text, current_year),
    }
}

/// Stateless analysis pipeline. Shared across requests behind an `Arc`;
/// concurrent calls share nothing mutable.
pub struct Analyzer {
    catalog: Arc<KeywordCatalog>,
    scorer: KeywordScorer,
    estimator: ExperienceEstimator,
    summarizer: Arc<dyn Summarizer>,
}

impl Analyzer {
    pub fn new(
        catalog: KeywordCatalog,
        config: ScoringConfig,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            scorer: KeywordScorer::from_config(&config),
            estimator: ExperienceEstimator::from_config(&config),
            summarizer,
        }
    }

    /// Analyzes one document. `document_id` is only used for log and error context.
    pub async fn analyze(
        &self,
        document_id: &str,
        text: &str,
        current_year: i32,
    ) -> Result<AnalysisResult, AnalysisError> {
        if text.trim().is_empty() {
            warn!(document_id, "No text could be extracted; skipping analysis");
            return Err(AnalysisError::EmptyExtraction {
                document_id: document_id.to_string(),
            });
        }

        let sample: String = text.chars().take(EXTRACT_SAMPLE_CHARS).collect();
        info!(
            document_id,
            text_length = text.len(),
            extract_sample = %sample,
            "Text extraction received"
        );

        let catalog = Arc::clone(&self.catalog);
        let scorer = self.scorer;
        let estimator = self.estimator;
        let owned_text = text.to_string();
        let outcome = run_blocking(document_id, move || {
            score_document(&catalog, &scorer, &estimator, &owned_text, current_year)
        })
        .await?;

        log_experience(document_id, &outcome.experience);

        let summary = self.summarizer.summarize(text).await;

        let result = AnalysisResult::new(summary, outcome.experience.years, outcome.scores);
        if let Err(detail) = result.check_bounds() {
            return Err(processing_failure(document_id, detail));
        }

        info!(
            document_id,
            experience_years = result.experience_years(),
            skill_score = result.skill_score(),
            soft_skill_score = result.soft_skill_score(),
            education_score = result.education_score(),
            relevant_experience_score = result.relevant_experience_score(),
            fit_score = result.fit_score(),
            summary_length = result.summary().len(),
            "Analysis complete"
        );

        Ok(result)
    }
}

/// Runs a pure computation on the blocking pool. A panic becomes a
/// `Processing` error instead of tearing down the request.
async fn run_blocking<F, T>(document_id: &str, f: F) -> Result<T, AnalysisError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| processing_failure(document_id, e.to_string()))
}

fn processing_failure(document_id: &str, detail: String) -> AnalysisError {
    error!(document_id, error = %detail, "Document processing error");
    AnalysisError::Processing {
        document_id: document_id.to_string(),
        detail,
    }
}

fn log_experience(document_id: &str, breakdown: &ExperienceBreakdown) {
    for period in &breakdown.periods {
        debug!(
            document_id,
            start = period.start,
            end = period.end,
            years = period.years(),
            "Counted period"
        );
    }
    debug!(
        document_id,
        date_ranges_total = breakdown.date_range_total,
        explicit_statement = breakdown.explicit_years,
        source = ?breakdown.source,
        final_total = breakdown.years,
        "Experience calculation results"
    );
}
