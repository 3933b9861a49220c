//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (timestamps)
//! - `process` - The judicial case record as exported by court systems
//! - `analysis` - Pure services: fact extraction, policy evaluation, opinion composition

pub mod analysis;
pub mod foundation;
pub mod process;
