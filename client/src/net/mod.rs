//! Networking modules for the hosted identity/data service.
//!
//! SYSTEM CONTEXT
//! ==============
//! `identity` performs the REST calls, `types` defines the wire schema, and
//! `error` is the failure value every call returns.

pub mod error;
pub mod identity;
pub mod types;

#[cfg(test)]
pub(crate) mod fake_identity;
