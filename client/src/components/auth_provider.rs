//! Root provider for auth, role, and session-lifecycle state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted once around the router. Provides `RwSignal<AuthState>`,
//! `RwSignal<RolesState>`, and the identity service through context, then
//! (in the browser) restores the cached session, keeps roles in step with the
//! current identity, and runs the periodic session re-validation loop.
//!
//! ERROR HANDLING
//! ==============
//! Every async path settles: failed restores publish "no session", failed
//! role lookups publish no roles. Results arriving after unmount are dropped.

use leptos::prelude::*;

use crate::net::identity::RestIdentityService;
use crate::state::auth::{AuthState, persist_session};
use crate::state::roles::RolesState;
use crate::util::liveness::Liveness;
use crate::util::storage::LocalStorage;

#[component]
pub fn AuthProvider(service: RestIdentityService, children: Children) -> impl IntoView {
    let auth = RwSignal::new(AuthState::default());
    let roles = RwSignal::new(RolesState::default());
    provide_context(auth);
    provide_context(roles);
    provide_context(service.clone());

    let alive = Liveness::default();
    let alive_cleanup = alive.clone();
    on_cleanup(move || alive_cleanup.end());

    #[cfg(feature = "hydrate")]
    spawn_session_lifecycle(service.clone(), auth, alive.clone());

    Effect::new(move || auth.with(|state| persist_session(&LocalStorage, state)));

    // Re-resolve roles whenever the session identity changes.
    let user_id = Memo::new(move |_| auth.with(|a| a.user_id().map(str::to_owned)));
    Effect::new(move || {
        let owner = user_id.get();
        let Some(Some(generation)) = roles.try_update(|r| r.track(owner.as_deref())) else {
            return;
        };
        #[cfg(feature = "hydrate")]
        {
            let service = service.clone();
            let alive = alive.clone();
            let session = auth.get_untracked().user;
            leptos::task::spawn_local(async move {
                let resolved = crate::state::roles::resolve_roles(&service, session.as_ref()).await;
                let applied = alive
                    .run_if_alive(|| roles.try_update(|r| r.finish(generation, resolved)))
                    .flatten()
                    .unwrap_or(false);
                if !applied {
                    leptos::logging::log!("discarding stale role lookup");
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (generation, &service, &alive);
        }
    });

    children()
}

/// Restore the cached session, then re-validate it on a fixed period until
/// the provider unmounts.
#[cfg(feature = "hydrate")]
fn spawn_session_lifecycle(service: RestIdentityService, auth: RwSignal<AuthState>, alive: Liveness) {
    use crate::state::session::{SESSION_CHECK_INTERVAL_SECS, lifecycle_tick, now_unix_secs, restore_session};

    leptos::task::spawn_local(async move {
        let initial = restore_session(&service, &LocalStorage, now_unix_secs()).await;
        if alive.run_if_alive(|| auth.update(|a| a.settle(initial))).is_none() {
            return;
        }

        loop {
            gloo_timers::future::sleep(std::time::Duration::from_secs(SESSION_CHECK_INTERVAL_SECS)).await;
            if !alive.is_alive() {
                break;
            }
            let snapshot = auth.get_untracked();
            let Some((computed_from, update)) = lifecycle_tick(&service, &snapshot, now_unix_secs()).await else {
                continue;
            };
            let applied = alive.run_if_alive(|| {
                auth.update(|a| {
                    a.apply_update(&computed_from, update);
                });
            });
            if applied.is_none() {
                break;
            }
        }
    });
}
