//! Route-gate decisions shared by the protected and public gate components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both gates reduce (session presence, loading flag, recorded `from`
//! location) to a [`RouteDecision`]. `loading` is absorbing: nothing redirects
//! until the auth provider has settled.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::fmt::Write as _;

use crate::state::auth::AuthState;
use crate::state::roles::{Role, RolesState};

/// Where unauthenticated users are sent.
pub const ENTRY_ROUTE: &str = "/auth";
/// Where authenticated users land when no `from` location was recorded.
pub const DEFAULT_DESTINATION: &str = "/";
/// Query parameter carrying the location a user was bounced from.
pub const REDIRECT_FROM_PARAM: &str = "from";

/// Per-render outcome of a route gate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    RenderChildren,
    ShowLoader,
    Redirect(String),
}

/// Decision for a page that requires a session.
pub fn protected_decision(state: &AuthState, current_location: &str, entry_route: &str) -> RouteDecision {
    if state.loading {
        RouteDecision::ShowLoader
    } else if state.user.is_some() {
        RouteDecision::RenderChildren
    } else {
        RouteDecision::Redirect(entry_redirect_target(entry_route, current_location))
    }
}

/// Decision for a page only meant for signed-out users (the entry flow).
///
/// A recorded `from` location wins over `default_destination`.
pub fn public_decision(state: &AuthState, redirect_from: Option<&str>, default_destination: &str) -> RouteDecision {
    if state.loading {
        RouteDecision::ShowLoader
    } else if state.user.is_none() {
        RouteDecision::RenderChildren
    } else {
        let target = redirect_from
            .filter(|from| is_safe_redirect(from))
            .unwrap_or(default_destination);
        RouteDecision::Redirect(target.to_owned())
    }
}

/// Entry route URL recording `current_location` as the `from` parameter.
pub fn entry_redirect_target(entry_route: &str, current_location: &str) -> String {
    let current_path = current_location.split('?').next().unwrap_or_default();
    if current_location.is_empty() || current_path == entry_route {
        return entry_route.to_owned();
    }
    format!("{entry_route}?{REDIRECT_FROM_PARAM}={}", encode_query_value(current_location))
}

/// Only same-origin absolute paths may be used as redirect targets.
///
/// Control and whitespace characters are rejected outright: URL parsers strip
/// tab and newline, so `/\t/host` would resolve as `//host`.
pub fn is_safe_redirect(target: &str) -> bool {
    target.starts_with('/')
        && !target.starts_with("//")
        && !target.contains('\\')
        && !target.contains("://")
        && !target.chars().any(|c| c.is_ascii_control() || c.is_whitespace())
}

/// Join a router pathname and search string into one location.
pub fn current_location(pathname: &str, search: &str) -> String {
    let search = search.trim_start_matches('?');
    if search.is_empty() {
        pathname.to_owned()
    } else {
        format!("{pathname}?{search}")
    }
}

/// Percent-encode a query value, leaving unreserved characters and `/` as is.
pub fn encode_query_value(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~' | b'/') {
            out.push(char::from(byte));
        } else {
            let _ = write!(out, "%{byte:02X}");
        }
    }
    out
}

/// Outcome of a role-restricted render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoleAccess {
    Granted,
    Pending,
    Denied,
}

/// Decide access to a page that needs `role`.
///
/// Pending while auth is loading or while the cached role set belongs to a
/// different identity than the current session.
pub fn role_access(auth: &AuthState, roles: &RolesState, role: Role) -> RoleAccess {
    if auth.loading {
        return RoleAccess::Pending;
    }
    let Some(user_id) = auth.user_id() else {
        return RoleAccess::Denied;
    };
    if roles.owner() != Some(user_id) || roles.loading {
        RoleAccess::Pending
    } else if roles.roles.has_role(role) {
        RoleAccess::Granted
    } else {
        RoleAccess::Denied
    }
}
