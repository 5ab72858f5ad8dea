//! Error type for identity-service calls.
//!
//! ERROR HANDLING
//! ==============
//! Every remote failure is a value. Callers in `state` turn these into
//! fail-closed state (empty roles, cleared session) plus a console warning, so
//! nothing here ever reaches the UI as a panic.

/// Failure reported by an [`IdentityService`](super::identity::IdentityService) call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// The request never produced a response (offline, DNS, CORS, placeholder host).
    #[error("network error: {0}")]
    Network(String),
    /// The service answered with a non-success status.
    #[error("service responded with {status}: {message}")]
    Status { status: u16, message: String },
    /// The response body did not match the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),
    /// Called outside the browser (server-side rendering).
    #[error("identity service is not available outside the browser")]
    Unavailable,
}
