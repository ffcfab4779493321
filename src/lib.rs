pub mod actions; // Validation boundary for symptom submissions
pub mod api; // HTTP surface (axum)
pub mod config;
pub mod models;
pub mod pipeline;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, ConfigError};
use crate::pipeline::analysis::{AnalysisError, OllamaChatClient, SymptomAnalyzer};
use crate::pipeline::facilities::{FacilityCatalog, FacilityService};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("model client error: {0}")]
    ModelClient(#[from] AnalysisError),
    #[error("failed to bind API server: {0}")]
    Bind(#[from] std::io::Error),
}

/// Start the service and serve until Ctrl-C.
pub async fn run() -> Result<(), StartupError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = AppConfig::from_env()?;
    tracing::info!(
        ollama_url = %config.ollama_url,
        model = %config.model,
        timeout_secs = config.timeout_secs,
        fallback_policy = config.fallback_policy.as_str(),
        "Configuration loaded"
    );

    let catalog = Arc::new(FacilityCatalog::curated());
    tracing::debug!(branches = catalog.branch_count(), "Facility catalog ready");
    let facilities = FacilityService::new(catalog, config.fallback_policy);

    let model = OllamaChatClient::new(&config.ollama_url, &config.model, config.timeout_secs)?;
    // Startup check only: analyses degrade to the default answer if the model is missing.
    match model.is_model_available().await {
        Ok(true) => tracing::info!(model = %config.model, "Model available"),
        Ok(false) => tracing::warn!(model = %config.model, "Model not installed on Ollama, run `ollama pull` first"),
        Err(e) => tracing::warn!(error = %e, "Could not reach Ollama at startup"),
    }

    let analyzer = Arc::new(SymptomAnalyzer::new(model, facilities));
    let mut server = api::start_api_server(api::api_router(analyzer), config.bind).await?;
    tracing::info!(addr = %server.addr, "Serving /api/health and /api/analyze");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {e}");
    }
    server.shutdown();
    server.wait().await;
    Ok(())
}
