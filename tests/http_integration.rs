//! Integration tests for the HTTP endpoints.
//!
//! These tests exercise the axum router end to end with the model mocked:
//! 1. Health check payload
//! 2. Decision responses and the error envelope
//! 3. Technical opinion inspection without a model call

mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use juscash_verifier::adapters::ai::MockError;
use juscash_verifier::adapters::{verifier_router, MockAIProvider, VerifierHandlers};

use common::{analyze_handler, eligible_case_json, APPROVED_JSON};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app(provider: MockAIProvider) -> Router {
    verifier_router(VerifierHandlers::new(analyze_handler(provider)))
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// =============================================================================
// GET /health
// =============================================================================

#[tokio::test]
async fn health_reports_service() {
    let response = app(MockAIProvider::new())
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"status": "ok", "service": "juscash-ml-api"})
    );
}

// =============================================================================
// POST /analisar-processo
// =============================================================================

#[tokio::test]
async fn analyze_returns_decision() {
    let response = app(MockAIProvider::new().with_response(APPROVED_JSON))
        .oneshot(post_json("/analisar-processo", &eligible_case_json()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["decisao"], "approved");
    assert_eq!(body["justificativa"], "Processo elegível.");
    assert_eq!(body["citacoes"], json!(["POL-1", "POL-2"]));
}

#[tokio::test]
async fn analyze_maps_llm_failure_to_500() {
    let response = app(MockAIProvider::new().with_empty_response())
        .oneshot(post_json("/analisar-processo", &eligible_case_json()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["detail"]["error"], "Falha ao obter decisão do LLM.");
    assert_eq!(body["detail"]["details"], "Resposta vazia do LLM.");
}

#[tokio::test]
async fn analyze_maps_configuration_failure_to_internal_error() {
    let response = app(MockAIProvider::new().with_error(MockError::AuthenticationFailed))
        .oneshot(post_json("/analisar-processo", &eligible_case_json()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["detail"]["error"], "Erro interno ao analisar o processo.");
}

#[tokio::test]
async fn analyze_rejects_malformed_case_before_model_call() {
    let provider = MockAIProvider::new().with_response(APPROVED_JSON);
    let mut case = eligible_case_json();
    case.as_object_mut().unwrap().remove("numeroProcesso");

    let response = app(provider.clone())
        .oneshot(post_json("/analisar-processo", &case))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
    assert_eq!(provider.call_count(), 0);
}

// =============================================================================
// POST /parecer-tecnico
// =============================================================================

#[tokio::test]
async fn technical_opinion_is_served_without_model_call() {
    let provider = MockAIProvider::new();
    let mut case = eligible_case_json();
    case["valorCondenacao"] = json!(500.0);

    let response = app(provider.clone())
        .oneshot(post_json("/parecer-tecnico", &case))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["numero_processo"], "0001234-56.2023.4.05.8100");
    assert_eq!(body["politicas_potencialmente_violadas"], json!(["POL-3"]));
    assert_eq!(body["analise"]["valor_muito_baixo"], true);
    assert!(body["resumo_tecnico"]
        .as_str()
        .unwrap()
        .starts_with("Processo 0001234-56.2023.4.05.8100."));
    assert_eq!(provider.call_count(), 0);
}
