//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read and write shared state from Leptos context providers;
//! `auth_provider` installs those contexts and `route_gate` consumes them.

pub mod auth_provider;
pub mod gate_loader;
pub mod route_gate;
pub mod verify_email_banner;
