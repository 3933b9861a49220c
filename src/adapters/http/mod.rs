//! HTTP adapters - REST API implementations.

pub mod verifier;

pub use verifier::{verifier_router, VerifierHandlers};
