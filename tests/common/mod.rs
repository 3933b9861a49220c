//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{json, Value};

use juscash_verifier::adapters::{InMemoryPromptStore, MockAIProvider};
use juscash_verifier::application::{
    AnalyzeProcessHandler, DecisionSettings, RequestDecisionHandler,
};
use juscash_verifier::domain::process::Process;

pub const TEMPLATE: &str = "Parecer:\n{technical_opinion_json}\nResponda em JSON.";

pub const APPROVED_JSON: &str =
    r#"{"decisao":"approved","justificativa":"Processo elegível.","citacoes":["POL-1","POL-2"]}"#;

/// Case record payload with the qualifying document and movement.
pub fn eligible_case_json() -> Value {
    json!({
        "numeroProcesso": "0001234-56.2023.4.05.8100",
        "classe": "Cumprimento de Sentença contra a Fazenda Pública",
        "orgaoJulgador": "19ª VARA FEDERAL - SOBRAL/CE",
        "ultimaDistribuicao": "2024-11-18T23:15:44.130Z",
        "assunto": "Rural (Art. 48/51)",
        "segredoJustica": false,
        "justicaGratuita": true,
        "siglaTribunal": "TRF5",
        "esfera": "Federal",
        "valorCondenacao": 25000.0,
        "documentos": [{
            "id": "DOC-1",
            "dataHoraJuntada": "2023-09-10T10:12:05.000",
            "nome": "Certidão de Trânsito em Julgado",
            "texto": "Certifico que a sentença transitou em julgado."
        }],
        "movimentos": [{
            "dataHora": "2024-01-20T11:22:33.000",
            "descricao": "Iniciado cumprimento definitivo de sentença."
        }]
    })
}

pub fn case_with(patch: impl FnOnce(&mut Value)) -> Process {
    let mut value = eligible_case_json();
    patch(&mut value);
    serde_json::from_value(value).unwrap()
}

pub fn eligible_case() -> Process {
    case_with(|_| {})
}

pub fn decision_handler(provider: MockAIProvider) -> Arc<RequestDecisionHandler> {
    Arc::new(RequestDecisionHandler::new(
        Arc::new(provider),
        Arc::new(InMemoryPromptStore::new().with_template("1", TEMPLATE)),
        DecisionSettings::default(),
    ))
}

pub fn analyze_handler(provider: MockAIProvider) -> Arc<AnalyzeProcessHandler> {
    Arc::new(AnalyzeProcessHandler::new(decision_handler(provider)))
}
