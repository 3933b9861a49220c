//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - Model transport used by the decision requester
//! - `PromptStore` - Versioned prompt template source

mod ai_provider;
mod prompt_store;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, Message, MessageRole,
    RequestMetadata, TokenUsage,
};
pub use prompt_store::{PromptError, PromptStore};
