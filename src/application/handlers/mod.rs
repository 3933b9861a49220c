//! Application handlers.
//!
//! Command handlers that orchestrate domain services and ports.

pub mod decision;

pub use decision::{
    AnalyzeProcessHandler, AnalyzeProcessResult, DecisionError, DecisionErrorKind,
    DecisionSettings, RequestDecisionHandler, StageTimings,
};
