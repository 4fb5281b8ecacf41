//! Scholarship recommendation server binary

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use scholarbot_config::load_settings;
use scholarbot_engine::{load_dataset, ScholarshipStore};
use scholarbot_llm::{GeminiBackend, LlmConfig};
use scholarbot_server::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path: Option<PathBuf> = std::env::args().nth(1).map(PathBuf::from);
    let settings = load_settings(config_path.as_deref()).context("Failed to load settings")?;

    let store = Arc::new(
        load_dataset(&settings.dataset.path).context("Failed to load scholarship dataset")?,
    );
    log_dataset_summary(&store);

    let api_key = settings.llm.api_key().context("LLM API key not configured")?;
    let llm = GeminiBackend::new(LlmConfig::from_settings(&settings.llm, api_key))
        .context("Failed to initialize LLM backend")?;
    tracing::info!("LLM backend ready with model {}", settings.llm.model);

    let bind_addr = format!("{}:{}", settings.server.host, settings.server.port);
    let state = AppState::new(settings, store, Arc::new(llm));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {bind_addr}"))?;
    tracing::info!("Listening on {}", bind_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// One-time startup summary of what was loaded.
fn log_dataset_summary(store: &ScholarshipStore) {
    tracing::info!(
        "Dataset summary: {} scholarships, {} education levels, {} communities, {} religions",
        store.len(),
        store.distinct(|r| r.education_qualification.as_str()).len(),
        store.distinct(|r| r.community.as_str()).len(),
        store.distinct(|r| r.religion.as_str()).len(),
    );
}
