//! Protected, public, and role-restricted route wrappers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wrap a route's page in one of these gates. The render outcome comes from
//! the pure decision functions in `util::auth`; this module only binds them to
//! router location, navigation, and context signals.

use leptos::prelude::*;
use leptos::tachys::view::any_view::{AnyView, IntoAny};
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate, use_query_map};

use crate::components::gate_loader::GateLoader;
use crate::state::auth::AuthState;
use crate::state::roles::{Role, RolesState};
use crate::util::auth::{
    DEFAULT_DESTINATION, ENTRY_ROUTE, REDIRECT_FROM_PARAM, RoleAccess, RouteDecision, current_location,
    protected_decision, public_decision, role_access,
};

/// Navigate (replacing history) whenever the decision becomes a redirect.
fn install_gate_redirect<F>(decision: Memo<RouteDecision>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let RouteDecision::Redirect(target) = decision.get() {
            navigate(&target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}

fn render_decision(decision: RouteDecision, children: &ChildrenFn) -> AnyView {
    match decision {
        RouteDecision::RenderChildren => children().into_any(),
        RouteDecision::ShowLoader => view! { <GateLoader/> }.into_any(),
        RouteDecision::Redirect(_) => ().into_any(),
    }
}

/// Renders children only for signed-in users; others go to the entry route
/// with their current location recorded.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let location = use_location();
    let (pathname, search) = (location.pathname, location.search);

    let decision = Memo::new(move |_| {
        let here = current_location(&pathname.get(), &search.get());
        auth.with(|state| protected_decision(state, &here, ENTRY_ROUTE))
    });
    install_gate_redirect(decision, use_navigate());

    move || render_decision(decision.get(), &children)
}

/// Renders children only for signed-out users; signed-in users continue to
/// the recorded `from` location or `default_destination`.
#[component]
pub fn PublicRoute(#[prop(optional, into)] default_destination: Option<String>, children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let query = use_query_map();
    let default_destination = default_destination.unwrap_or_else(|| DEFAULT_DESTINATION.to_owned());

    let decision = Memo::new(move |_| {
        let from = query.with(|q| q.get(REDIRECT_FROM_PARAM));
        auth.with(|state| public_decision(state, from.as_deref(), &default_destination))
    });
    install_gate_redirect(decision, use_navigate());

    move || render_decision(decision.get(), &children)
}

/// Renders children only when the current user holds `role`. Place inside a
/// `ProtectedRoute`.
#[component]
pub fn RoleGate(role: Role, children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let roles = expect_context::<RwSignal<RolesState>>();

    let access = Memo::new(move |_| auth.with(|a| roles.with(|r| role_access(a, r, role))));

    move || match access.get() {
        RoleAccess::Granted => children().into_any(),
        RoleAccess::Pending => view! { <GateLoader/> }.into_any(),
        RoleAccess::Denied => view! {
            <div class="gate-denied">
                <h2>"Not authorized"</h2>
                <p>"Your account does not have access to this page."</p>
                <a href="/">"Back to dashboard"</a>
            </div>
        }
        .into_any(),
    }
}
