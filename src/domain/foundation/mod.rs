//! Foundation module - Shared domain primitives.
//!
//! Value objects used across the case record and the analysis services.

mod timestamp;

pub use timestamp::{Timestamp, TimestampParseError};
