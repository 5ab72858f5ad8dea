//! Wire DTOs consumed from the identity/data service.
//!
//! DESIGN
//! ======
//! `Session` is the only identity record the client keeps. Token responses are
//! decoded into `TokenResponse` first because the service has shipped both an
//! absolute `expires_at` and a relative `expires_in` over time.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// The authenticated principal as reported by the identity service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Stable user identifier (UUID string).
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Email confirmation timestamp (current field name).
    #[serde(default)]
    pub email_confirmed_at: Option<String>,
    /// Email confirmation timestamp (legacy field name).
    #[serde(default)]
    pub confirmed_at: Option<String>,
}

/// An active session: the user plus the tokens needed to call the service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Expiry in seconds since the Unix epoch.
    pub expires_at: i64,
    pub user: AuthUser,
}

impl Session {
    /// Identity token the role lookup is keyed by.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user.id
    }

    /// Whether the identity service has recorded an email confirmation under
    /// either of its field names.
    #[must_use]
    pub fn is_email_confirmed(&self) -> bool {
        self.user.email_confirmed_at.is_some() || self.user.confirmed_at.is_some()
    }
}

/// Body of `POST /auth/v1/token`.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    pub user: AuthUser,
}

impl TokenResponse {
    /// Convert into a [`Session`], resolving a relative lifetime against `now`.
    ///
    /// A response with neither field is treated as already expired so the
    /// lifecycle manager refreshes it on the next tick.
    #[must_use]
    pub fn into_session(self, now: i64) -> Session {
        let expires_at = self
            .expires_at
            .or_else(|| self.expires_in.map(|secs| now.saturating_add(secs)))
            .unwrap_or(now);
        Session { access_token: self.access_token, refresh_token: self.refresh_token, expires_at, user: self.user }
    }
}

/// One row returned by the `get_user_roles` procedure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRow {
    pub role: String,
}

/// Error body shape shared by the auth and rest endpoints.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ServiceErrorBody {
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ServiceErrorBody {
    /// First human-readable message the service provided.
    #[must_use]
    pub fn into_message(self) -> Option<String> {
        self.error_description.or(self.msg).or(self.message)
    }
}
