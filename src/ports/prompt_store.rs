//! Prompt Store Port - Interface for loading versioned prompt templates.
//!
//! Templates are plain text containing the `{technical_opinion_json}`
//! placeholder. Each deployment selects one version; the store resolves it.

use async_trait::async_trait;

/// Errors that can occur while loading a template.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("Prompt template version '{version}' not found at {location}")]
    NotFound { version: String, location: String },

    #[error("Invalid prompt version '{0}'")]
    InvalidVersion(String),

    #[error("IO error reading prompt template: {0}")]
    Io(String),
}

impl PromptError {
    pub fn not_found(version: impl Into<String>, location: impl Into<String>) -> Self {
        Self::NotFound {
            version: version.into(),
            location: location.into(),
        }
    }
}

/// Port for resolving a prompt template by version.
#[async_trait]
pub trait PromptStore: Send + Sync {
    /// Load the raw template text for `version`.
    ///
    /// # Errors
    /// Returns `PromptError::NotFound` if no template exists for the version
    async fn load(&self, version: &str) -> Result<String, PromptError>;
}
