use std::sync::Arc;

use crate::analysis::pipeline::Analyzer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Stateless pipeline; the summarization client inside it is the only I/O.
    pub analyzer: Arc<Analyzer>,
    pub config: Config,
}
