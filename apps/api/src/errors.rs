use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::pipeline::AnalysisError;

/// Shown to the caller whenever a document could not be analyzed.
const RETRY_MESSAGE: &str =
    "Could not process the document. Please try again with a different file.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Empty extraction: {0}")]
    EmptyExtraction(String),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::EmptyExtraction { .. } => AppError::EmptyExtraction(err.to_string()),
            AnalysisError::Processing { .. } => AppError::Processing(err.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            // the pipeline already logged both analysis failures with the document id
            AppError::EmptyExtraction(msg) => {
                tracing::debug!("Empty extraction: {msg}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "EMPTY_EXTRACTION",
                    RETRY_MESSAGE.to_string(),
                )
            }
            AppError::Processing(msg) => {
                tracing::debug!("Processing error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PROCESSING_ERROR",
                    RETRY_MESSAGE.to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    struct ErrorCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for ErrorCounter {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == tracing::Level::ERROR {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn error_events_during(f: impl FnOnce()) -> usize {
        let count = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(ErrorCounter(Arc::clone(&count)));
        tracing::subscriber::with_default(subscriber, f);
        count.load(Ordering::SeqCst)
    }

    #[test]
    fn test_processing_response_does_not_log_error_again() {
        let err = AppError::Processing("Processing of document cv.pdf failed: boom".to_string());
        assert_eq!(error_events_during(|| drop(err.into_response())), 0);
    }

    #[test]
    fn test_internal_response_logs_error() {
        let err = AppError::Internal(anyhow::anyhow!("disk on fire"));
        assert_eq!(error_events_during(|| drop(err.into_response())), 1);
    }

    #[test]
    fn test_empty_extraction_maps_to_422() {
        let err: AppError = AnalysisError::EmptyExtraction {
            document_id: "cv.pdf".to_string(),
        }
        .into();
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_processing_maps_to_500() {
        let err: AppError = AnalysisError::Processing {
            document_id: "cv.pdf".to_string(),
            detail: "boom".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Processing(ref msg) if msg.contains("boom")));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validation_maps_to_400() {
        let err = AppError::Validation("bad".to_string());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
