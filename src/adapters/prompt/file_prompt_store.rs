//! File-based Prompt Store Adapter
//!
//! Resolves template version `v` to `{directory}/prompt_v{v}.txt`.
//! Files are read on every load so templates can be edited without a restart.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::ports::{PromptError, PromptStore};

/// File-based storage for prompt templates
#[derive(Debug, Clone)]
pub struct FilePromptStore {
    directory: PathBuf,
}

impl FilePromptStore {
    /// Create a store rooted at `directory`
    ///
    /// # Example
    /// ```ignore
    /// let store = FilePromptStore::new("./prompts");
    /// ```
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the template file for a version
    pub fn template_path(&self, version: &str) -> PathBuf {
        self.directory.join(format!("prompt_v{version}.txt"))
    }

    fn check_version(version: &str) -> Result<(), PromptError> {
        let valid = !version.is_empty()
            && version
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
            && !version.contains("..");
        if valid {
            Ok(())
        } else {
            Err(PromptError::InvalidVersion(version.to_string()))
        }
    }
}

#[async_trait]
impl PromptStore for FilePromptStore {
    async fn load(&self, version: &str) -> Result<String, PromptError> {
        Self::check_version(version)?;
        let path = self.template_path(version);

        match fs::read_to_string(&path).await {
            Ok(template) => {
                tracing::debug!(version, path = %path.display(), "Loaded prompt template");
                Ok(template)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(PromptError::not_found(version, path.display().to_string()))
            }
            Err(e) => Err(PromptError::Io(format!("{}: {}", path.display(), e))),
        }
    }
}
