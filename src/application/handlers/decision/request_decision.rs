//! RequestDecisionHandler - Asks the model for a decision on a technical opinion.
//!
//! A single request moves through `Building -> Invoking -> Parsing -> Validating -> Done`,
//! and any stage may fail. Every failure is classified into one [`DecisionError`]
//! kind before it leaves this module. No retries are performed here.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::analysis::{DecisionResult, TechnicalOpinion};
use crate::ports::{AIError, AIProvider, CompletionRequest, PromptError, PromptStore, RequestMetadata};

/// Token replaced by the serialized opinion.
pub const OPINION_PLACEHOLDER: &str = "{technical_opinion_json}";

/// Message used when the model returns no content.
pub const EMPTY_RESPONSE_MESSAGE: &str = "Resposta vazia do LLM.";

/// Tunables for a decision request.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionSettings {
    /// Template version resolved through the prompt store.
    pub prompt_version: String,
    /// Sampling temperature. Kept low for repeatable decisions.
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    /// Upper bound on the model call. Elapsing counts as a transport failure.
    pub timeout: Option<Duration>,
}

impl Default for DecisionSettings {
    fn default() -> Self {
        Self {
            prompt_version: "1".to_string(),
            temperature: 0.1,
            max_tokens: None,
            timeout: None,
        }
    }
}

impl DecisionSettings {
    pub fn with_prompt_version(mut self, version: impl Into<String>) -> Self {
        self.prompt_version = version.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Externally visible failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecisionErrorKind {
    Configuration,
    Llm,
    Internal,
}

impl DecisionErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionErrorKind::Configuration => "configuration",
            DecisionErrorKind::Llm => "llm",
            DecisionErrorKind::Internal => "internal",
        }
    }
}

/// Errors that can occur when requesting a decision.
#[derive(Debug, Clone, Error)]
pub enum DecisionError {
    /// Template missing or unreadable, or credentials rejected. Not retriable.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The model call or its output failed. `raw` holds the offending text when there is one.
    #[error("{message}")]
    Llm {
        message: String,
        raw: Option<String>,
    },

    /// Anything else.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DecisionError {
    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm {
            message: message.into(),
            raw: None,
        }
    }

    pub fn llm_with_raw(message: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::Llm {
            message: message.into(),
            raw: Some(raw.into()),
        }
    }

    pub fn kind(&self) -> DecisionErrorKind {
        match self {
            DecisionError::Configuration(_) => DecisionErrorKind::Configuration,
            DecisionError::Llm { .. } => DecisionErrorKind::Llm,
            DecisionError::Internal(_) => DecisionErrorKind::Internal,
        }
    }

    pub fn is_llm(&self) -> bool {
        matches!(self, DecisionError::Llm { .. })
    }

    /// The raw model text attached to the error, if any.
    pub fn raw(&self) -> Option<&str> {
        match self {
            DecisionError::Llm { raw, .. } => raw.as_deref(),
            _ => None,
        }
    }
}

impl From<PromptError> for DecisionError {
    fn from(err: PromptError) -> Self {
        DecisionError::Configuration(err.to_string())
    }
}

impl From<AIError> for DecisionError {
    fn from(err: AIError) -> Self {
        match err {
            AIError::AuthenticationFailed => DecisionError::Configuration(err.to_string()),
            other => DecisionError::llm(format!("Falha na chamada ao LLM: {}", other)),
        }
    }
}

/// Substitutes the opinion JSON into `template`.
///
/// Non-ASCII characters are written as-is. Fails if the template has no placeholder.
pub fn build_prompt(template: &str, opinion: &TechnicalOpinion) -> Result<String, DecisionError> {
    if !template.contains(OPINION_PLACEHOLDER) {
        return Err(DecisionError::Configuration(format!(
            "prompt template does not contain the {} placeholder",
            OPINION_PLACEHOLDER
        )));
    }

    let opinion_json = serde_json::to_string(opinion)
        .map_err(|e| DecisionError::Internal(format!("failed to serialize opinion: {}", e)))?;

    Ok(template.replace(OPINION_PLACEHOLDER, &opinion_json))
}

/// Parses model output as JSON, first directly, then from the first `{` to the last `}`.
pub fn extract_json(text: &str) -> Result<Value, DecisionError> {
    let trimmed = text.trim();

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Ok(value);
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if end > start {
            if let Ok(value) = serde_json::from_str::<Value>(&trimmed[start..=end]) {
                return Ok(value);
            }
        }
    }

    Err(DecisionError::llm_with_raw(
        format!(
            "Não foi possível interpretar a saída do LLM como JSON: {}",
            text
        ),
        text,
    ))
}

/// Validates an extracted value against the decision shape.
pub fn validate_decision(value: Value) -> Result<DecisionResult, DecisionError> {
    let raw = value.to_string();
    serde_json::from_value(value).map_err(|e| {
        DecisionError::llm_with_raw(
            format!(
                "Resposta do LLM não atende ao schema ResultadoDecisao: {}",
                e
            ),
            raw,
        )
    })
}

/// Handler for decision requests.
pub struct RequestDecisionHandler {
    ai_provider: Arc<dyn AIProvider>,
    prompt_store: Arc<dyn PromptStore>,
    settings: DecisionSettings,
}

impl RequestDecisionHandler {
    pub fn new(
        ai_provider: Arc<dyn AIProvider>,
        prompt_store: Arc<dyn PromptStore>,
        settings: DecisionSettings,
    ) -> Self {
        Self {
            ai_provider,
            prompt_store,
            settings,
        }
    }

    pub fn settings(&self) -> &DecisionSettings {
        &self.settings
    }

    /// Requests a decision with a fresh trace id.
    pub async fn handle(&self, opinion: &TechnicalOpinion) -> Result<DecisionResult, DecisionError> {
        self.handle_traced(opinion, &Uuid::new_v4().to_string()).await
    }

    /// Requests a decision, tagging the provider call with `trace_id`.
    pub async fn handle_traced(
        &self,
        opinion: &TechnicalOpinion,
        trace_id: &str,
    ) -> Result<DecisionResult, DecisionError> {
        let process_number = opinion.process_number.as_str();

        tracing::info!(
            process_number,
            violated = ?opinion.potentially_violated(),
            prompt_version = %self.settings.prompt_version,
            "Requesting decision from model"
        );

        let result = self.run(opinion, trace_id).await;

        match &result {
            Ok(decision) => {
                tracing::debug!(stage = "done", process_number, "Decision request finished");
                tracing::info!(
                    process_number,
                    decision = %decision.decision,
                    verdict = ?decision.verdict(),
                    citations = ?decision.citations,
                    "Decision validated"
                );
            }
            Err(err) => {
                tracing::error!(
                    stage = "failed",
                    kind = err.kind().as_str(),
                    process_number,
                    error = %err,
                    "Decision request failed"
                );
            }
        }

        result
    }

    async fn run(
        &self,
        opinion: &TechnicalOpinion,
        trace_id: &str,
    ) -> Result<DecisionResult, DecisionError> {
        tracing::debug!(stage = "building", trace_id, "Building decision prompt");
        let template = self.prompt_store.load(&self.settings.prompt_version).await?;
        let prompt = build_prompt(&template, opinion)?;

        tracing::debug!(stage = "invoking", trace_id, prompt_chars = prompt.len(), "Invoking model");
        let text = self.invoke(opinion, prompt, trace_id).await?;

        tracing::debug!(stage = "parsing", trace_id, "Extracting JSON from model output");
        let value = extract_json(&text)?;

        tracing::debug!(stage = "validating", trace_id, "Validating decision shape");
        validate_decision(value)
    }

    async fn invoke(
        &self,
        opinion: &TechnicalOpinion,
        prompt: String,
        trace_id: &str,
    ) -> Result<String, DecisionError> {
        let mut request = CompletionRequest::new(RequestMetadata::new(
            opinion.process_number.clone(),
            trace_id,
        ))
        .with_user_message(prompt)
        .with_temperature(self.settings.temperature);

        if let Some(max_tokens) = self.settings.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }

        let call = self.ai_provider.complete(request);
        let response = match self.settings.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| AIError::timeout(limit))??,
            None => call.await?,
        };

        tracing::debug!(
            trace_id,
            model = %response.model,
            total_tokens = response.usage.total_tokens,
            "Model response received"
        );

        response
            .trimmed_content()
            .map(str::to_string)
            .ok_or_else(|| DecisionError::llm(EMPTY_RESPONSE_MESSAGE))
    }
}
