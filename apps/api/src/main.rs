mod analysis;
mod config;
mod errors;
mod models;
mod routes;
mod state;
mod summarizer;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::keywords::KeywordCatalog;
use crate::analysis::pipeline::Analyzer;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::summarizer::HuggingFaceSummarizer;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cvscan v{}", env!("CARGO_PKG_VERSION"));

    // Initialize summarization client
    let summarizer = HuggingFaceSummarizer::new(
        config.huggingface_api_key.clone(),
        config.summarizer_url.clone(),
        Duration::from_secs(config.summarizer_timeout_secs),
    )?;
    info!(
        "Summarizer initialized ({}; timeout {}s)",
        config.summarizer_url, config.summarizer_timeout_secs
    );

    let analyzer = Analyzer::new(KeywordCatalog::default(), config.scoring, Arc::new(summarizer));
    info!("Scoring config: {:?}", config.scoring);

    let state = AppState {
        analyzer: Arc::new(analyzer),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
