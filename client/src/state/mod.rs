//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`auth`, `roles`, `session`, `onboarding`) so
//! each piece can be driven and tested without a browser. `AuthProvider`
//! wires them into reactive signals.

pub mod auth;
pub mod onboarding;
pub mod roles;
pub mod session;
