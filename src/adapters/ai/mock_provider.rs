//! Mock AI Provider for testing.
//!
//! Plays back a script of model replies so the decision requester can be
//! exercised without network access. Every request is recorded.
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_response(r#"{"decisao":"approved","justificativa":"ok","citacoes":[]}"#)
//!     .with_empty_response()
//!     .with_error(MockError::AuthenticationFailed);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{AIError, AIProvider, CompletionRequest, CompletionResponse, TokenUsage};

const MOCK_MODEL: &str = "mock-model-1";

/// Scripted stand-in for a model provider.
///
/// Clones share the script and the call log, so a test can keep a handle
/// for inspection after moving a clone into the handler.
#[derive(Debug, Clone, Default)]
pub struct MockAIProvider {
    script: Arc<Mutex<VecDeque<MockResponse>>>,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
    delay: Duration,
}

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Reply with this body.
    Text(String),
    /// Reply with a null body.
    Null,
    /// Fail the call.
    Error(MockError),
}

/// Transport failures the mock can simulate.
#[derive(Debug, Clone)]
pub enum MockError {
    RateLimited { retry_after_secs: u32 },
    Unavailable { message: String },
    AuthenticationFailed,
}

impl From<MockError> for AIError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => AIError::rate_limited(retry_after_secs),
            MockError::Unavailable { message } => AIError::unavailable(message),
            MockError::AuthenticationFailed => AIError::AuthenticationFailed,
        }
    }
}

impl MockAIProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a reply with the given body.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.enqueue(MockResponse::Text(content.into()))
    }

    /// Queues a reply whose body is null.
    pub fn with_empty_response(self) -> Self {
        self.enqueue(MockResponse::Null)
    }

    /// Queues a failed call.
    pub fn with_error(self, error: MockError) -> Self {
        self.enqueue(MockResponse::Error(error))
    }

    /// Delays every reply.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> Option<CompletionRequest> {
        self.calls.lock().unwrap().last().cloned()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn enqueue(self, response: MockResponse) -> Self {
        self.script.lock().unwrap().push_back(response);
        self
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        self.calls.lock().unwrap().push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        // An exhausted script is an error.
        let next = self.script.lock().unwrap().pop_front();
        let content = match next {
            Some(MockResponse::Text(text)) => Some(text),
            Some(MockResponse::Null) => None,
            Some(MockResponse::Error(err)) => return Err(err.into()),
            None => return Err(AIError::unavailable("mock script exhausted")),
        };

        let usage = match &content {
            Some(text) => TokenUsage::new(10, u32::try_from(text.len()).unwrap_or(u32::MAX)),
            None => TokenUsage::zero(),
        };

        Ok(CompletionResponse {
            content,
            usage,
            model: MOCK_MODEL.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::RequestMetadata;

    fn request(trace_id: &str) -> CompletionRequest {
        CompletionRequest::new(RequestMetadata::new("0000000-00.0000.0.00.0000", trace_id))
            .with_user_message("Olá")
    }

    #[tokio::test]
    async fn plays_script_in_order() {
        let provider = MockAIProvider::new()
            .with_response("primeira")
            .with_empty_response()
            .with_error(MockError::RateLimited { retry_after_secs: 30 });

        let first = provider.complete(request("t")).await.unwrap();
        let second = provider.complete(request("t")).await.unwrap();
        let third = provider.complete(request("t")).await.unwrap_err();

        assert_eq!(first.content.as_deref(), Some("primeira"));
        assert_eq!(first.model, MOCK_MODEL);
        assert!(second.content.is_none());
        assert_eq!(second.usage, TokenUsage::zero());
        assert!(matches!(third, AIError::RateLimited { retry_after_secs: 30 }));
    }

    #[tokio::test]
    async fn exhausted_script_is_unavailable() {
        let provider = MockAIProvider::new();

        let err = provider.complete(request("t")).await.unwrap_err();
        assert!(matches!(err, AIError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn clones_share_script_and_calls() {
        let provider = MockAIProvider::new().with_response("a").with_response("b");
        let observer = provider.clone();

        provider.complete(request("t-1")).await.unwrap();
        provider.complete(request("t-2")).await.unwrap();

        assert_eq!(observer.call_count(), 2);
        assert_eq!(observer.last_call().unwrap().metadata.trace_id, "t-2");

        observer.clear_calls();
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn delay_is_applied() {
        let provider = MockAIProvider::new()
            .with_response("lento")
            .with_delay(Duration::from_millis(50));

        let start = std::time::Instant::now();
        provider.complete(request("t")).await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn mock_errors_convert_to_transport_errors() {
        assert!(matches!(
            AIError::from(MockError::AuthenticationFailed),
            AIError::AuthenticationFailed
        ));
        assert!(matches!(
            AIError::from(MockError::Unavailable {
                message: "503".to_string()
            }),
            AIError::Unavailable { .. }
        ));
    }
}
