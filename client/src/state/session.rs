//! Session lifecycle: expiry checks, refresh, and verification prompts.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthProvider` runs [`lifecycle_tick`] on a timer and hands the resulting
//! [`SessionUpdate`] to `AuthState::apply_update`. The same logic resolves a
//! session restored from storage at startup ([`restore_session`]).
//!
//! TRADE-OFFS
//! ==========
//! A refresh that fails while the access token is still valid keeps the
//! session and retries next tick. Once the token has expired, a failed refresh
//! clears the session.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::identity::IdentityService;
use crate::net::types::Session;
use crate::state::auth::{AuthState, SESSION_STORAGE_KEY};
use crate::util::storage::{KeyValueStore, load_json};

/// Refresh this many seconds before the access token expires.
pub const REFRESH_MARGIN_SECS: i64 = 60;
/// Period of the background re-validation loop.
pub const SESSION_CHECK_INTERVAL_SECS: u64 = 30;

/// Where a session stands relative to its expiry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionCheck {
    Fresh,
    RefreshDue,
    Expired,
}

/// What the lifecycle manager wants done with the published session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionUpdate {
    Keep,
    Replace(Session),
    Clear,
}

pub fn check(session: &Session, now: i64) -> SessionCheck {
    if session.expires_at <= now {
        SessionCheck::Expired
    } else if session.expires_at - now <= REFRESH_MARGIN_SECS {
        SessionCheck::RefreshDue
    } else {
        SessionCheck::Fresh
    }
}

/// Decide the next state of `session` at `now`, refreshing through `service`
/// when due.
pub async fn revalidate<S>(service: &S, session: &Session, now: i64) -> SessionUpdate
where
    S: IdentityService + ?Sized,
{
    let status = check(session, now);
    if status == SessionCheck::Fresh {
        return SessionUpdate::Keep;
    }
    match service.refresh_session(&session.refresh_token).await {
        Ok(next) => SessionUpdate::Replace(next),
        Err(e) if status == SessionCheck::Expired => {
            leptos::logging::warn!("session expired and refresh failed: {e}");
            SessionUpdate::Clear
        }
        Err(e) => {
            leptos::logging::warn!("session refresh failed, retrying later: {e}");
            SessionUpdate::Keep
        }
    }
}

/// Resolve the session restored from storage into the one to publish.
///
/// Always returns; an unreachable service yields the stored session while it
/// is still valid and `None` once it has expired.
pub async fn resolve_initial_session<S>(service: &S, stored: Option<Session>, now: i64) -> Option<Session>
where
    S: IdentityService + ?Sized,
{
    let stored = stored?;
    match revalidate(service, &stored, now).await {
        SessionUpdate::Keep => Some(stored),
        SessionUpdate::Replace(next) => Some(next),
        SessionUpdate::Clear => None,
    }
}

/// Read the cached session from `store` and resolve it for publishing.
pub async fn restore_session<S>(service: &S, store: &impl KeyValueStore, now: i64) -> Option<Session>
where
    S: IdentityService + ?Sized,
{
    let stored = load_json::<Session>(store, SESSION_STORAGE_KEY);
    resolve_initial_session(service, stored, now).await
}

/// One pass of the re-validation loop over a snapshot of `state`.
///
/// Returns the session the result was computed from together with the
/// update, for [`AuthState::apply_update`]. `None` when there is nothing to
/// apply: still loading, signed out, or the session is fresh.
pub async fn lifecycle_tick<S>(service: &S, state: &AuthState, now: i64) -> Option<(Session, SessionUpdate)>
where
    S: IdentityService + ?Sized,
{
    if state.loading {
        return None;
    }
    let current = state.user.clone()?;
    match revalidate(service, &current, now).await {
        SessionUpdate::Keep => None,
        update => Some((current, update)),
    }
}

/// Whether to prompt the user to verify their email address.
pub fn needs_email_verification(session: &Session) -> bool {
    session.user.email.is_some() && !session.is_email_confirmed()
}

/// Current time in seconds since the Unix epoch.
pub fn now_unix_secs() -> i64 {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_possible_truncation)]
        let secs = (js_sys::Date::now() / 1000.0) as i64;
        secs
    }
    #[cfg(not(feature = "hydrate"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
    }
}
