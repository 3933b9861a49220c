//! Prompt Adapters
//!
//! Implementations of the PromptStore port.
//!
//! ## Available Adapters
//!
//! - **FilePromptStore** - Reads `prompt_v{version}.txt` from a directory
//! - **InMemoryPromptStore** - Holds templates in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::prompt::{FilePromptStore, InMemoryPromptStore};
//!
//! // Production: templates shipped under ./prompts
//! let store = FilePromptStore::new("./prompts");
//!
//! // Testing
//! let store = InMemoryPromptStore::new().with_template("1", "{technical_opinion_json}");
//! ```

mod file_prompt_store;
mod in_memory_prompt_store;

pub use file_prompt_store::FilePromptStore;
pub use in_memory_prompt_store::InMemoryPromptStore;
