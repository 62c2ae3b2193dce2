mod config;
mod errors;
mod features;
mod llm_client;
mod pipeline;
mod prediction;
mod result_page;
mod routes;
mod scoring;
mod state;
mod wizard;

#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::prediction::HttpSalaryPredictor;
use crate::routes::build_router;
use crate::scoring::{LlmProjectScorer, ProjectScorer, RemoteProjectScorer};
use crate::state::AppState;
use crate::wizard::store::{FileSessionStore, InMemorySessionStore, SessionStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Salary Predictor API v{}", env!("CARGO_PKG_VERSION"));

    // One HTTP connection pool shared by every outbound client
    let http = reqwest::Client::builder()
        .build()
        .context("Failed to build HTTP client")?;

    let llm = LlmClient::new(
        http.clone(),
        config.openai_api_key.clone(),
        config.llm_api_url.clone(),
        config.llm_model.clone(),
    );
    info!("LLM client initialized (model: {})", llm.model());

    let evaluator: Arc<dyn ProjectScorer> = Arc::new(LlmProjectScorer::new(llm));
    let scorer: Arc<dyn ProjectScorer> = match &config.scoring_url {
        Some(url) => {
            info!("Wizard scoring delegated to {url}");
            Arc::new(RemoteProjectScorer::new(http.clone(), url.clone()))
        }
        None => evaluator.clone(),
    };

    let predictor = Arc::new(HttpSalaryPredictor::new(
        http.clone(),
        config.prediction_url.clone(),
    ));
    info!("Prediction service: {}", config.prediction_url);

    let sessions: Arc<dyn SessionStore> = match &config.session_dir {
        Some(dir) => {
            info!("Persisting wizard sessions under {}", dir.display());
            Arc::new(FileSessionStore::open(dir).await?)
        }
        None => Arc::new(InMemorySessionStore::new()),
    };

    let state = AppState {
        sessions,
        evaluator,
        scorer,
        predictor,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
