//! JusCash Verifier HTTP service.

use std::sync::Arc;

use secrecy::Secret;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use juscash_verifier::adapters::{
    verifier_router, FilePromptStore, OpenAIConfig, OpenAIProvider, VerifierHandlers,
};
use juscash_verifier::application::{AnalyzeProcessHandler, RequestDecisionHandler};
use juscash_verifier::config::{AppConfig, ConfigError, ValidationError};
use juscash_verifier::ports::AIError;

/// Failures that abort startup.
#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("AI provider setup failed: {0}")]
    Provider(#[from] AIError),

    #[error("Invalid bind address: {0}")]
    Address(#[from] std::net::AddrParseError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    config.validate().map_err(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        ConfigError::from(e)
    })?;

    let api_key = config
        .ai
        .openai_api_key
        .clone()
        .ok_or(ConfigError::ValidationFailed(ValidationError::MissingRequired(
            "OPENAI_API_KEY",
        )))?;

    let provider = OpenAIProvider::new(
        OpenAIConfig::from_secret(Secret::new(api_key))
            .with_model(config.ai.model.clone())
            .with_base_url(config.ai.base_url.clone())
            .with_timeout(config.ai.timeout()),
    )?;
    let prompts = FilePromptStore::new(config.prompt.directory.clone());

    let decision_handler = Arc::new(RequestDecisionHandler::new(
        Arc::new(provider),
        Arc::new(prompts),
        config.decision_settings(),
    ));
    let analyze_handler = Arc::new(AnalyzeProcessHandler::new(decision_handler));

    let app = verifier_router(VerifierHandlers::new(analyze_handler))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        %addr,
        model = %config.ai.model,
        prompt_version = %config.prompt.version,
        "JusCash verifier listening"
    );

    axum::serve(listener, app).await?;

    Ok(())
}
