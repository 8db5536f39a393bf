pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/analyses", post(handlers::handle_analyze))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::keywords::KeywordCatalog;
    use crate::analysis::pipeline::Analyzer;
    use crate::analysis::ScoringConfig;
    use crate::config::{Config, DEFAULT_SUMMARIZER_URL};
    use crate::summarizer::Summarizer;

    struct FixedSummarizer;

    #[async_trait]
    impl Summarizer for FixedSummarizer {
        async fn summarize(&self, _text: &str) -> String {
            "Summary not available".to_string()
        }
    }

    fn test_router() -> Router {
        let config = Config {
            huggingface_api_key: "hf_test".to_string(),
            summarizer_url: DEFAULT_SUMMARIZER_URL.to_string(),
            summarizer_timeout_secs: 1,
            current_year: Some(2024),
            scoring: ScoringConfig::default(),
            port: 0,
            rust_log: "info".to_string(),
        };
        let analyzer = Analyzer::new(
            KeywordCatalog::default(),
            config.scoring,
            Arc::new(FixedSummarizer),
        );
        build_router(AppState {
            analyzer: Arc::new(analyzer),
            config,
        })
    }

    async fn post_json(router: Router, body: Value) -> (StatusCode, Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/analyses")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_analyze_returns_scores() {
        let (status, body) = post_json(
            test_router(),
            json!({
                "document_id": "jane_doe.pdf",
                "text": "Web developer since 2018 - present. PHP, Laravel. Master degree."
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["document_id"], "jane_doe.pdf");
        let analysis = &body["analysis"];
        assert_eq!(analysis["skill_score"], 40);
        assert_eq!(analysis["soft_skill_score"], 0);
        assert_eq!(analysis["education_score"], 40);
        assert_eq!(analysis["relevant_experience_score"], 80);
        assert_eq!(analysis["experience_years"], 6);
        assert_eq!(analysis["fit_score"], 40);
        assert_eq!(analysis["summary"], "Summary not available");
    }

    #[tokio::test]
    async fn test_analyze_generates_document_id_when_missing() {
        let (status, body) = post_json(test_router(), json!({ "text": "php" })).await;
        assert_eq!(status, StatusCode::OK);
        let id = body["document_id"].as_str().unwrap();
        assert!(uuid::Uuid::parse_str(id).is_ok());
    }

    #[tokio::test]
    async fn test_blank_text_is_unprocessable() {
        let (status, body) = post_json(
            test_router(),
            json!({ "document_id": "scan.pdf", "text": "  \n " }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "EMPTY_EXTRACTION");
        assert!(body.get("analysis").is_none());
    }

    async fn post_raw(content_type: Option<&str>, body: &str) -> (StatusCode, Value) {
        let mut request = Request::builder().method("POST").uri("/api/v1/analyses");
        if let Some(content_type) = content_type {
            request = request.header("content-type", content_type);
        }
        let response = test_router()
            .oneshot(request.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_missing_text_field_gets_error_envelope() {
        let (status, body) = post_json(test_router(), json!({ "document_id": "cv.pdf" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"].as_str().unwrap().contains("text"));
    }

    #[tokio::test]
    async fn test_malformed_json_gets_error_envelope() {
        let (status, body) = post_raw(Some("application/json"), "{\"text\": ").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_missing_content_type_gets_error_envelope() {
        let (status, body) = post_raw(None, "{\"text\": \"php\"}").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_oversized_document_id_is_rejected() {
        let (status, body) = post_json(
            test_router(),
            json!({ "document_id": "x".repeat(300), "text": "php" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
