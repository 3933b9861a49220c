//! Decision pipeline handlers.

mod analyze_process;
mod request_decision;

pub use analyze_process::{AnalyzeProcessHandler, AnalyzeProcessResult, StageTimings};
pub use request_decision::{
    build_prompt, extract_json, validate_decision, DecisionError, DecisionErrorKind,
    DecisionSettings, RequestDecisionHandler, EMPTY_RESPONSE_MESSAGE, OPINION_PLACEHOLDER,
};
