//! Summarization client: the only component of cvscan that performs network I/O.
//!
//! ARCHITECTURAL RULE: no other module calls the summarization service directly.
//! The pipeline depends on the `Summarizer` trait so tests can swap in a stub.
//!
//! Failures never escape: a transport or service error becomes
//! `ERROR_SENTINEL`, a response without a summary becomes `MISSING_SENTINEL`.
//! One attempt per document, bounded by the client timeout; no retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

/// Returned when the service answered successfully but without a summary.
pub const MISSING_SENTINEL: &str = "Summary not available";
/// Returned when the service could not be reached or answered with an error.
pub const ERROR_SENTINEL: &str = "Error generating summary";

/// Target output length band, in tokens.
const MIN_SUMMARY_LENGTH: u32 = 100;
const MAX_SUMMARY_LENGTH: u32 = 300;

/// JSON pointer to the summary inside the service's response.
const SUMMARY_POINTER: &str = "/0/summary_text";

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Produces a short synopsis of a document. Implementations never fail:
/// they resolve every error to a sentinel string.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> String;
}

#[derive(Debug, Serialize)]
struct SummarizeRequest<'a> {
    inputs: &'a str,
    parameters: SummarizeParameters,
}

#[derive(Debug, Serialize)]
struct SummarizeParameters {
    min_length: u32,
    max_length: u32,
}

/// Hugging Face inference API client (abstractive summarization model).
#[derive(Clone)]
pub struct HuggingFaceSummarizer {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl HuggingFaceSummarizer {
    pub fn new(api_key: String, endpoint: String, timeout: Duration) -> Result<Self, SummarizeError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            endpoint,
            api_key,
        })
    }

    /// Single request. `Ok(None)` means the service answered but the
    /// response had no summary at the expected path.
    async fn request_summary(&self, text: &str) -> Result<Option<String>, SummarizeError> {
        let request_body = SummarizeRequest {
            inputs: text,
            parameters: SummarizeParameters {
                min_length: MIN_SUMMARY_LENGTH,
                max_length: MAX_SUMMARY_LENGTH,
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SummarizeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let summary = serde_json::from_str::<Value>(&body).ok().and_then(|json| {
            json.pointer(SUMMARY_POINTER)
                .and_then(Value::as_str)
                .map(String::from)
        });

        Ok(summary)
    }
}

#[async_trait]
impl Summarizer for HuggingFaceSummarizer {
    async fn summarize(&self, text: &str) -> String {
        match self.request_summary(text).await {
            Ok(Some(summary)) => {
                debug!("Summary received ({} chars)", summary.len());
                summary
            }
            Ok(None) => {
                warn!("Summarization response had no summary field");
                MISSING_SENTINEL.to_string()
            }
            Err(e) => {
                warn!("Summarization failed: {e}");
                ERROR_SENTINEL.to_string()
            }
        }
    }
}
