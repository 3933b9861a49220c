//! HTTP DTOs for the screening endpoints.
//!
//! Request and success bodies are the domain types themselves (`Process`,
//! `TechnicalOpinion`, `DecisionResult`), whose serde names are the wire contract.
//! Only the health payload and the error envelope live here.

use serde::{Deserialize, Serialize};

use crate::application::DecisionError;

/// Name reported by the health endpoint.
pub const SERVICE_NAME: &str = "juscash-ml-api";

pub const LLM_FAILURE_MESSAGE: &str = "Falha ao obter decisão do LLM.";
pub const INTERNAL_FAILURE_MESSAGE: &str = "Erro interno ao analisar o processo.";

/// Response for `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            service: SERVICE_NAME.to_string(),
        }
    }
}

/// Error envelope: `{"detail": {"error": ..., "details": ...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: ErrorDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub error: String,
    pub details: String,
}

impl ErrorResponse {
    pub fn llm(details: impl Into<String>) -> Self {
        Self::with_message(LLM_FAILURE_MESSAGE, details)
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::with_message(INTERNAL_FAILURE_MESSAGE, details)
    }

    fn with_message(error: &str, details: impl Into<String>) -> Self {
        Self {
            detail: ErrorDetail {
                error: error.to_string(),
                details: details.into(),
            },
        }
    }
}

impl From<&DecisionError> for ErrorResponse {
    fn from(err: &DecisionError) -> Self {
        if err.is_llm() {
            Self::llm(err.to_string())
        } else {
            Self::internal(err.to_string())
        }
    }
}
