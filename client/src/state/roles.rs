//! Role resolution for the current session.
//!
//! SYSTEM CONTEXT
//! ==============
//! Roles come from the `get_user_roles` procedure and are never mutated
//! locally. Lookups fail closed: a missing session, a transport error, or an
//! unrecognised label all leave the user with fewer roles, never more.

#[cfg(test)]
#[path = "roles_test.rs"]
mod roles_test;

use std::collections::BTreeSet;

use crate::net::identity::IdentityService;
use crate::net::types::{RoleRow, Session};

/// Access-level label assigned by the identity service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    Admin,
    Moderator,
    User,
}

impl Role {
    /// Wire label used by the `app_role` enum.
    pub fn label(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Moderator => "moderator",
            Self::User => "user",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "admin" => Some(Self::Admin),
            "moderator" => Some(Self::Moderator),
            "user" => Some(Self::User),
            _ => None,
        }
    }
}

/// Deduplicated, unordered set of roles.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from procedure rows, skipping labels this client does not know.
    pub fn from_rows(rows: &[RoleRow]) -> Self {
        let mut set = BTreeSet::new();
        for row in rows {
            match Role::from_label(&row.role) {
                Some(role) => {
                    set.insert(role);
                }
                None => leptos::logging::warn!("ignoring unknown role label: {}", row.role),
            }
        }
        Self(set)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    pub fn is_moderator(&self) -> bool {
        self.has_role(Role::Moderator)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Fetch the role set for `session`.
///
/// No session means no roles and no request. Any service failure is logged
/// and yields the empty set.
pub async fn resolve_roles<S>(service: &S, session: Option<&Session>) -> RoleSet
where
    S: IdentityService + ?Sized,
{
    let Some(session) = session else {
        return RoleSet::empty();
    };
    match service.get_user_roles(session).await {
        Ok(rows) => RoleSet::from_rows(&rows),
        Err(e) => {
            leptos::logging::warn!("role lookup failed for {}: {e}", session.user_id());
            RoleSet::empty()
        }
    }
}

/// Role cache published to components.
///
/// `generation` identifies the lookup in flight; a result whose generation is
/// no longer current belongs to a previous identity and is dropped.
#[derive(Clone, Debug, Default)]
pub struct RolesState {
    pub roles: RoleSet,
    pub loading: bool,
    owner: Option<String>,
    generation: u64,
}

impl RolesState {
    /// Start tracking `owner`. Clears the cached set immediately and returns
    /// the generation the eventual result must present to [`finish`](Self::finish).
    pub fn begin(&mut self, owner: Option<&str>) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.owner = owner.map(str::to_owned);
        self.roles = RoleSet::empty();
        self.loading = owner.is_some();
        self.generation
    }

    /// Follow the published identity.
    ///
    /// Starts a new lookup only when `owner` differs from the user the cache
    /// belongs to, so a token refresh for the same user keeps its roles.
    /// Returns the generation to resolve for, or `None` when no lookup is
    /// needed (unchanged identity, or nobody signed in).
    pub fn track(&mut self, owner: Option<&str>) -> Option<u64> {
        if self.generation != 0 && self.owner.as_deref() == owner {
            return None;
        }
        let generation = self.begin(owner);
        owner.is_some().then_some(generation)
    }

    /// Apply a lookup result. Returns `false` when the result is stale.
    pub fn finish(&mut self, generation: u64, roles: RoleSet) -> bool {
        if generation != self.generation {
            return false;
        }
        self.roles = roles;
        self.loading = false;
        true
    }

    /// User the cached set belongs to.
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }
}
