//! Identity/data service client.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): every call returns [`ServiceError::Unavailable`] since
//! sessions only exist in the browser.
//!
//! DESIGN
//! ======
//! State logic depends on the [`IdentityService`] trait rather than on
//! `RestIdentityService`, so session and role resolution can be driven by an
//! in-memory fake in unit tests.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use async_trait::async_trait;

use super::error::ServiceError;
use super::types::{RoleRow, Session};
use crate::config::ServiceConfig;

const PASSWORD_GRANT_PATH: &str = "/auth/v1/token?grant_type=password";
const REFRESH_GRANT_PATH: &str = "/auth/v1/token?grant_type=refresh_token";
const LOGOUT_PATH: &str = "/auth/v1/logout";
const RESEND_PATH: &str = "/auth/v1/resend";
const USER_ROLES_RPC_PATH: &str = "/rest/v1/rpc/get_user_roles";

/// Remote operations the session gate needs from the identity service.
#[async_trait(?Send)]
pub trait IdentityService {
    /// Exchange email + password for a session.
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, ServiceError>;

    /// Exchange a refresh token for a new session.
    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, ServiceError>;

    /// Revoke the session server-side.
    async fn sign_out(&self, access_token: &str) -> Result<(), ServiceError>;

    /// Call the `get_user_roles` procedure for the session's user.
    async fn get_user_roles(&self, session: &Session) -> Result<Vec<RoleRow>, ServiceError>;

    /// Re-send the signup confirmation email.
    async fn resend_verification(&self, email: &str) -> Result<(), ServiceError>;
}

/// REST implementation against the hosted service.
#[derive(Clone, Debug)]
pub struct RestIdentityService {
    #[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
    config: ServiceConfig,
}

impl RestIdentityService {
    pub fn new(config: ServiceConfig) -> Self {
        Self { config }
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn password_grant_body(email: &str, password: &str) -> serde_json::Value {
    serde_json::json!({ "email": email, "password": password })
}

#[cfg(any(test, feature = "hydrate"))]
fn refresh_grant_body(refresh_token: &str) -> serde_json::Value {
    serde_json::json!({ "refresh_token": refresh_token })
}

#[cfg(any(test, feature = "hydrate"))]
fn resend_body(email: &str) -> serde_json::Value {
    serde_json::json!({ "type": "signup", "email": email })
}

#[cfg(any(test, feature = "hydrate"))]
fn user_roles_body(user_id: &str) -> serde_json::Value {
    serde_json::json!({ "_user_id": user_id })
}

#[cfg(any(test, feature = "hydrate"))]
fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Build a [`ServiceError::Status`] from a status code and raw error body.
#[cfg(any(test, feature = "hydrate"))]
fn status_error(status: u16, body: &str) -> ServiceError {
    let message = serde_json::from_str::<super::types::ServiceErrorBody>(body)
        .ok()
        .and_then(super::types::ServiceErrorBody::into_message)
        .unwrap_or_else(|| format!("request failed: {status}"));
    ServiceError::Status { status, message }
}

#[cfg(feature = "hydrate")]
impl RestIdentityService {
    fn post(&self, path: &str, access_token: Option<&str>) -> gloo_net::http::RequestBuilder {
        let mut req = gloo_net::http::Request::post(&self.config.endpoint(path))
            .header("apikey", &self.config.anon_key)
            .header("Content-Type", "application/json");
        if let Some(token) = access_token {
            req = req.header("Authorization", &bearer(token));
        }
        req
    }

    async fn send_json(
        &self,
        path: &str,
        access_token: Option<&str>,
        body: &serde_json::Value,
    ) -> Result<gloo_net::http::Response, ServiceError> {
        let resp = self
            .post(path, access_token)
            .json(body)
            .map_err(|e| ServiceError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;
        if !resp.ok() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(status_error(status, &text));
        }
        Ok(resp)
    }

    async fn token_grant(&self, path: &str, body: &serde_json::Value) -> Result<Session, ServiceError> {
        let resp = self.send_json(path, None, body).await?;
        let token: super::types::TokenResponse =
            resp.json().await.map_err(|e| ServiceError::Decode(e.to_string()))?;
        Ok(token.into_session(crate::state::session::now_unix_secs()))
    }
}

#[async_trait(?Send)]
impl IdentityService for RestIdentityService {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, ServiceError> {
        #[cfg(feature = "hydrate")]
        {
            self.token_grant(PASSWORD_GRANT_PATH, &password_grant_body(email, password))
                .await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, password, PASSWORD_GRANT_PATH);
            Err(ServiceError::Unavailable)
        }
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, ServiceError> {
        #[cfg(feature = "hydrate")]
        {
            self.token_grant(REFRESH_GRANT_PATH, &refresh_grant_body(refresh_token))
                .await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (refresh_token, REFRESH_GRANT_PATH);
            Err(ServiceError::Unavailable)
        }
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), ServiceError> {
        #[cfg(feature = "hydrate")]
        {
            self.send_json(LOGOUT_PATH, Some(access_token), &serde_json::json!({}))
                .await?;
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (access_token, LOGOUT_PATH);
            Err(ServiceError::Unavailable)
        }
    }

    async fn get_user_roles(&self, session: &Session) -> Result<Vec<RoleRow>, ServiceError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = self
                .send_json(USER_ROLES_RPC_PATH, Some(&session.access_token), &user_roles_body(session.user_id()))
                .await?;
            resp.json::<Vec<RoleRow>>()
                .await
                .map_err(|e| ServiceError::Decode(e.to_string()))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (session, USER_ROLES_RPC_PATH);
            Err(ServiceError::Unavailable)
        }
    }

    async fn resend_verification(&self, email: &str) -> Result<(), ServiceError> {
        #[cfg(feature = "hydrate")]
        {
            self.send_json(RESEND_PATH, None, &resend_body(email)).await?;
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, RESEND_PATH);
            Err(ServiceError::Unavailable)
        }
    }
}
