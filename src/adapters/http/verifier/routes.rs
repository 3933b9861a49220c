//! HTTP routes for the screening endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{analyze_process, health, technical_opinion, VerifierHandlers};

/// Creates the service router with all endpoints.
pub fn verifier_router(handlers: VerifierHandlers) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/analisar-processo", post(analyze_process))
        .route("/parecer-tecnico", post(technical_opinion))
        .with_state(handlers)
}
