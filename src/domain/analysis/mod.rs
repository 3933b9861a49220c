//! Analysis Module - Pure domain services for acquisition screening.
//!
//! Turns a case record into a technical opinion without any I/O:
//!
//! - `HeuristicRules` / `SubstringRule` - Named substring classifiers and thresholds
//! - `FactExtractor` - Derives the fact set from a case record
//! - `PolicyEvaluator` - Judges the POL-1..POL-8 catalog against the facts
//! - `OpinionComposer` - Renders the Portuguese summary and assembles the opinion
//! - `DecisionResult` - Shape of the model's answer
//!
//! Every function here is total. Absence of evidence is a fact, not an error.

mod decision;
mod facts;
mod opinion;
mod policy;
mod rules;

pub use decision::{DecisionResult, Verdict};
pub use facts::{
    FactExtractor, FactSet, MISSING_DOCUMENTS_NOTE, MISSING_EXECUTION_EVIDENCE,
    MISSING_RES_JUDICATA_DOCUMENT,
};
pub use opinion::{OpinionComposer, TechnicalOpinion};
pub use policy::{PolicyCode, PolicyEvaluator, PolicyJudgement, PolicyOutcome, UnknownPolicyCode};
pub use rules::{
    HeuristicRules, SubstringRule, EXECUTION_PHASE_TERMS, LABOR_SPHERE, MINIMUM_JUDGMENT_AMOUNT,
    RES_JUDICATA_TERMS,
};
