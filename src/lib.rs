//! JusCash Verifier - Judicial case screening for credit acquisition
//!
//! This crate turns a case record into a deterministic technical opinion
//! (facts plus policy judgements) and asks a language model for the final
//! approve, reject or incomplete decision.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
