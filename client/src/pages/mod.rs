//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates gating to
//! `components::route_gate`.

pub mod admin;
pub mod dashboard;
pub mod login;
