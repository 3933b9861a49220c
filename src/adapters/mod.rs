//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the screening pipeline to external systems:
//! - `ai` - Model providers (OpenAI, mock)
//! - `prompt` - Prompt template stores (file system, in-memory)
//! - `http` - axum routes exposing the pipeline

pub mod ai;
pub mod http;
pub mod prompt;

pub use ai::{MockAIProvider, OpenAIConfig, OpenAIProvider};
pub use http::{verifier_router, VerifierHandlers};
pub use prompt::{FilePromptStore, InMemoryPromptStore};
