//! Prompt template configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Prompt template configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PromptConfig {
    /// Template version, resolved to `prompt_v{version}.txt`
    #[serde(default = "default_version")]
    pub version: String,

    /// Directory holding the template files
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
}

impl PromptConfig {
    /// Validate prompt configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.version.trim().is_empty() {
            return Err(ValidationError::MissingRequired("PROMPT__VERSION"));
        }
        Ok(())
    }
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            directory: default_directory(),
        }
    }
}

fn default_version() -> String {
    "1".to_string()
}

fn default_directory() -> PathBuf {
    PathBuf::from("prompts")
}
