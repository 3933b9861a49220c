//! Application layer - Handlers that orchestrate the screening pipeline.
//!
//! The domain stages are pure; this layer adds the prompt store and the model
//! call, and classifies every failure before it reaches the caller.

pub mod handlers;

pub use handlers::{
    AnalyzeProcessHandler, AnalyzeProcessResult, DecisionError, DecisionErrorKind,
    DecisionSettings, RequestDecisionHandler, StageTimings,
};
