//! Axum route handlers for the Analysis API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::analysis::AnalysisResult;
use crate::state::AppState;

const MAX_DOCUMENT_ID_LEN: usize = 255;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Filename or other identifier, echoed back and used in logs.
    pub document_id: Option<String>,
    /// Plain text already extracted from the document.
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub document_id: String,
    pub analysis: AnalysisResult,
}

/// POST /api/v1/analyses
///
/// Scores one CV's extracted text. Blank text is rejected with 422, a
/// malformed body with 400; the result is all-or-nothing.
pub async fn handle_analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let Json(request) = payload?;

    let document_id = match request.document_id {
        Some(id) if id.len() > MAX_DOCUMENT_ID_LEN => {
            return Err(AppError::Validation(format!(
                "document_id cannot exceed {MAX_DOCUMENT_ID_LEN} bytes"
            )));
        }
        Some(id) if !id.trim().is_empty() => id,
        _ => Uuid::new_v4().to_string(),
    };

    let analysis = state
        .analyzer
        .analyze(&document_id, &request.text, state.config.current_year())
        .await?;

    Ok(Json(AnalyzeResponse {
        document_id,
        analysis,
    }))
}
