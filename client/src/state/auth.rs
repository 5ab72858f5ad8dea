//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Provided once as `RwSignal<AuthState>` by `AuthProvider`; route gates,
//! the role resolver, and the session lifecycle loop all subscribe to it.
//! Only the methods below mutate it.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::Session;
use crate::state::session::SessionUpdate;
use crate::util::storage::{KeyValueStore, save_json};

/// localStorage key for the cached session.
pub const SESSION_STORAGE_KEY: &str = "wordlens-auth-session";

/// Authentication state tracking the current session and loading status.
///
/// Starts in `loading` until the first resolution settles; after that,
/// sign-in and sign-out change `user` without re-entering `loading`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<Session>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { user: None, loading: true }
    }
}

impl AuthState {
    /// Record the outcome of the initial session resolution.
    pub fn settle(&mut self, user: Option<Session>) {
        self.user = user;
        self.loading = false;
    }

    pub fn sign_in(&mut self, session: Session) {
        self.user = Some(session);
        self.loading = false;
    }

    /// Drop the session. Synchronous; `loading` is left alone.
    pub fn sign_out(&mut self) -> Option<Session> {
        self.user.take()
    }

    /// Apply a lifecycle result computed from `computed_from`.
    ///
    /// Ignored unless `computed_from` still carries the published access
    /// token. Whatever replaced or dropped the session while the refresh was in
    /// flight wins. Returns whether anything was applied.
    pub fn apply_update(&mut self, computed_from: &Session, update: SessionUpdate) -> bool {
        let current_token = self.user.as_ref().map(|s| s.access_token.as_str());
        if current_token != Some(computed_from.access_token.as_str()) {
            return false;
        }
        match update {
            SessionUpdate::Keep => false,
            SessionUpdate::Replace(session) => {
                self.user = Some(session);
                true
            }
            SessionUpdate::Clear => {
                self.user = None;
                true
            }
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(Session::user_id)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Mirror settled state into `store` so a reload can restore it.
///
/// Nothing is written while `loading`, so the startup default never
/// overwrites a cached session before it has been read.
pub fn persist_session(store: &impl KeyValueStore, state: &AuthState) {
    if state.loading {
        return;
    }
    match &state.user {
        Some(session) => save_json(store, SESSION_STORAGE_KEY, session),
        None => store.remove(SESSION_STORAGE_KEY),
    }
}
