//! HTTP handlers for the screening endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::{AnalyzeProcessHandler, DecisionError};
use crate::domain::process::Process;

use super::dto::{ErrorResponse, HealthResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct VerifierHandlers {
    analyze_handler: Arc<AnalyzeProcessHandler>,
}

impl VerifierHandlers {
    pub fn new(analyze_handler: Arc<AnalyzeProcessHandler>) -> Self {
        Self { analyze_handler }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /health - Liveness check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// POST /analisar-processo - Full pipeline, returns the model's decision
pub async fn analyze_process(
    State(handlers): State<VerifierHandlers>,
    Json(process): Json<Process>,
) -> Response {
    match handlers.analyze_handler.handle(&process).await {
        Ok(result) => {
            tracing::info!(
                request_id = %result.request_id,
                parecer_secs = result.timings.opinion.as_secs_f64(),
                llm_secs = result.timings.llm.as_secs_f64(),
                total_secs = result.timings.total.as_secs_f64(),
                "Analysis response sent"
            );
            (StatusCode::OK, Json(result.decision)).into_response()
        }
        Err(e) => handle_decision_error(e),
    }
}

/// POST /parecer-tecnico - Deterministic stages only
pub async fn technical_opinion(
    State(handlers): State<VerifierHandlers>,
    Json(process): Json<Process>,
) -> Response {
    let opinion = handlers.analyze_handler.opinion(&process);
    tracing::debug!(
        process_number = %opinion.process_number,
        violated = ?opinion.potentially_violated(),
        "Technical opinion served"
    );
    (StatusCode::OK, Json(opinion)).into_response()
}

// ════════════════════════════════════════════════════════════════════════════
// Error mapping
// ════════════════════════════════════════════════════════════════════════════

fn handle_decision_error(error: DecisionError) -> Response {
    if let Some(raw) = error.raw() {
        tracing::warn!(raw, "Model output attached to failure");
    }
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::from(&error)),
    )
        .into_response()
}
