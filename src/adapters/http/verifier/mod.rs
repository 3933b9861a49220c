//! HTTP adapter for the case screening endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{ErrorDetail, ErrorResponse, HealthResponse, SERVICE_NAME};
pub use handlers::VerifierHandlers;
pub use routes::verifier_router;
