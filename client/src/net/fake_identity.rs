//! Scripted [`IdentityService`] for unit tests.

use std::cell::RefCell;

use async_trait::async_trait;

use super::error::ServiceError;
use super::identity::IdentityService;
use super::types::{AuthUser, RoleRow, Session};

pub(crate) struct FakeIdentity {
    roles: Result<Vec<RoleRow>, ServiceError>,
    refresh: Result<Session, ServiceError>,
    sign_in: Result<Session, ServiceError>,
    calls: RefCell<Vec<&'static str>>,
}

impl FakeIdentity {
    pub(crate) fn new() -> Self {
        let offline = ServiceError::Network("offline".to_owned());
        Self { roles: Ok(Vec::new()), refresh: Err(offline.clone()), sign_in: Err(offline), calls: RefCell::default() }
    }

    pub(crate) fn with_roles(mut self, labels: &[&str]) -> Self {
        self.roles = Ok(labels.iter().map(|l| RoleRow { role: (*l).to_owned() }).collect());
        self
    }

    pub(crate) fn with_roles_error(mut self, err: ServiceError) -> Self {
        self.roles = Err(err);
        self
    }

    pub(crate) fn with_refresh(mut self, result: Result<Session, ServiceError>) -> Self {
        self.refresh = result;
        self
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    fn record(&self, name: &'static str) {
        self.calls.borrow_mut().push(name);
    }
}

#[async_trait(?Send)]
impl IdentityService for FakeIdentity {
    async fn sign_in_with_password(&self, _email: &str, _password: &str) -> Result<Session, ServiceError> {
        self.record("sign_in_with_password");
        self.sign_in.clone()
    }

    async fn refresh_session(&self, _refresh_token: &str) -> Result<Session, ServiceError> {
        self.record("refresh_session");
        self.refresh.clone()
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), ServiceError> {
        self.record("sign_out");
        Ok(())
    }

    async fn get_user_roles(&self, _session: &Session) -> Result<Vec<RoleRow>, ServiceError> {
        self.record("get_user_roles");
        self.roles.clone()
    }

    async fn resend_verification(&self, _email: &str) -> Result<(), ServiceError> {
        self.record("resend_verification");
        Ok(())
    }
}

/// Session for `id` expiring at `expires_at`, email unconfirmed.
pub(crate) fn session(id: &str, expires_at: i64) -> Session {
    Session {
        access_token: format!("at-{id}"),
        refresh_token: format!("rt-{id}"),
        expires_at,
        user: AuthUser {
            id: id.to_owned(),
            email: Some(format!("{id}@example.com")),
            email_confirmed_at: None,
            confirmed_at: None,
        },
    }
}
