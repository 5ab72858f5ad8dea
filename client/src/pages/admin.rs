//! Administration page, reachable only through `RoleGate(Role::Admin)`.

use leptos::prelude::*;

use crate::state::auth::AuthState;
use crate::state::roles::RolesState;

#[component]
pub fn AdminPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let roles = expect_context::<RwSignal<RolesState>>();

    let user_id = move || auth.with(|a| a.user_id().unwrap_or_default().to_owned());
    let is_moderator = move || roles.with(|r| r.roles.is_moderator());

    view! {
        <div class="admin-page">
            <h1>"Administration"</h1>
            <p>"Signed in as " <code>{user_id}</code></p>
            <Show when=is_moderator>
                <p class="admin-page__note">"You also hold the moderator role."</p>
            </Show>
            <a href="/">"Back to dashboard"</a>
        </div>
    }
}
