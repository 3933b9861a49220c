//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `JUSCASH` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use juscash_verifier::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod ai;
mod error;
mod prompt;
mod server;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use prompt::PromptConfig;
pub use server::ServerConfig;

use serde::Deserialize;

use crate::application::DecisionSettings;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (bind address, logging, request bound)
    #[serde(default)]
    pub server: ServerConfig,

    /// Model provider configuration (OpenAI)
    #[serde(default)]
    pub ai: AiConfig,

    /// Prompt template selection
    #[serde(default)]
    pub prompt: PromptConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `JUSCASH` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `JUSCASH__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `JUSCASH__AI__OPENAI_API_KEY=...` -> `ai.openai_api_key = ...`
    /// - `JUSCASH__PROMPT__VERSION=2` -> `prompt.version = "2"`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    /// Missing values fall back to defaults; call [`validate`](Self::validate) afterwards.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("JUSCASH")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.prompt.validate()?;
        Ok(())
    }

    /// Decision request tunables derived from this configuration
    pub fn decision_settings(&self) -> DecisionSettings {
        let mut settings = DecisionSettings::default()
            .with_prompt_version(self.prompt.version.clone())
            .with_temperature(self.ai.temperature)
            .with_timeout(self.server.request_timeout());
        if let Some(max_tokens) = self.ai.max_tokens {
            settings = settings.with_max_tokens(max_tokens);
        }
        settings
    }
}
