//! Dashboard: the authenticated landing route.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted under `ProtectedRoute`. Shows the verification banner, the
//! onboarding/tour cards driven by `OnboardingTracker`, and the user's roles.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::components::verify_email_banner::VerifyEmailBanner;
use crate::net::identity::RestIdentityService;
use crate::state::auth::AuthState;
use crate::state::onboarding::OnboardingTracker;
use crate::state::roles::{RoleSet, RolesState};
use crate::util::storage::LocalStorage;

/// Badge labels for the resolved role set, most privileged first.
fn role_badges(roles: &RoleSet) -> Vec<&'static str> {
    roles.iter().map(|role| role.label()).collect()
}

fn greeting(email: Option<&str>) -> String {
    match email.and_then(|e| e.split('@').next()).filter(|name| !name.is_empty()) {
        Some(name) => format!("Welcome back, {name}"),
        None => "Welcome back".to_owned(),
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let roles = expect_context::<RwSignal<RolesState>>();
    let onboarding = expect_context::<RwSignal<OnboardingTracker>>();
    let service = expect_context::<RestIdentityService>();

    let title = move || auth.with(|a| greeting(a.user.as_ref().and_then(|s| s.user.email.as_deref())));
    let badges = move || roles.with(|r| role_badges(&r.roles));
    let is_admin = move || roles.with(|r| r.roles.is_admin());

    let on_complete_onboarding = move |_| onboarding.update(|t| t.complete_onboarding(&LocalStorage));
    let on_complete_tour = move |_| onboarding.update(|t| t.complete_tour(&LocalStorage));
    let on_reset_onboarding = move |_| onboarding.update(|t| t.reset_onboarding(&LocalStorage));

    let on_sign_out = move |_| {
        let previous = auth.try_update(AuthState::sign_out).flatten();
        #[cfg(feature = "hydrate")]
        {
            use crate::net::identity::IdentityService;

            if let Some(session) = previous {
                let service = service.clone();
                leptos::task::spawn_local(async move {
                    if let Err(e) = service.sign_out(&session.access_token).await {
                        leptos::logging::warn!("server-side sign-out failed: {e}");
                    }
                });
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (previous, &service);
        }
    };

    view! {
        <div class="dashboard-page">
            <VerifyEmailBanner/>
            <header class="dashboard-header">
                <h1>{title}</h1>
                <ul class="role-badges">
                    <For each=badges key=|label| *label let:label>
                        <li class="role-badge">{label}</li>
                    </For>
                </ul>
                <button class="dashboard-button" on:click=on_sign_out>"Sign out"</button>
            </header>

            <Show when=move || onboarding.get().is_first_visit>
                <section class="onboarding-card">
                    <h2>"Welcome to WordLens"</h2>
                    <p>"Upload a document to see word frequencies, readability, and key phrases."</p>
                    <button class="dashboard-button" on:click=on_complete_onboarding>"Get started"</button>
                </section>
            </Show>
            <Show when=move || onboarding.get().show_tour>
                <section class="tour-card">
                    <h2>"Take the tour"</h2>
                    <p>"A quick walk through the analysis panels."</p>
                    <button class="dashboard-button" on:click=on_complete_tour>"Finish tour"</button>
                </section>
            </Show>

            <nav class="dashboard-links">
                <Show when=is_admin>
                    <a href="/admin">"Administration"</a>
                </Show>
                <button class="dashboard-link" on:click=on_reset_onboarding>"Replay onboarding"</button>
            </nav>
        </div>
    }
}
