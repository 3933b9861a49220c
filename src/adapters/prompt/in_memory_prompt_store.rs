//! In-Memory Prompt Store Adapter
//!
//! Holds templates in memory. Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::ports::{PromptError, PromptStore};

/// In-memory storage for prompt templates
///
/// Share it behind an `Arc` like any other port implementation.
#[derive(Debug, Default)]
pub struct InMemoryPromptStore {
    templates: RwLock<HashMap<String, String>>,
}

impl InMemoryPromptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style registration. Owning `self` gives exclusive access, so this cannot fail.
    pub fn with_template(
        mut self,
        version: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        self.templates
            .get_mut()
            .insert(version.into(), template.into());
        self
    }

    /// Register or replace a template
    pub async fn insert(&self, version: impl Into<String>, template: impl Into<String>) {
        self.templates
            .write()
            .await
            .insert(version.into(), template.into());
    }

    /// Get the number of stored templates
    pub async fn len(&self) -> usize {
        self.templates.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.templates.read().await.is_empty()
    }
}

#[async_trait]
impl PromptStore for InMemoryPromptStore {
    async fn load(&self, version: &str) -> Result<String, PromptError> {
        self.templates
            .read()
            .await
            .get(version)
            .cloned()
            .ok_or_else(|| PromptError::not_found(version, "memory"))
    }
}
