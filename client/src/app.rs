//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::auth_provider::AuthProvider;
use crate::components::route_gate::{ProtectedRoute, PublicRoute, RoleGate};
use crate::config::ServiceConfig;
use crate::net::identity::RestIdentityService;
use crate::pages::{admin::AdminPage, dashboard::DashboardPage, login::LoginPage};
use crate::state::onboarding::OnboardingTracker;
use crate::state::roles::Role;
use crate::util::auth::DEFAULT_DESTINATION;
use crate::util::storage::LocalStorage;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the auth/role/onboarding contexts and sets up gated routes.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let service = RestIdentityService::new(ServiceConfig::from_build_env());
    let onboarding = RwSignal::new(OnboardingTracker::load(&LocalStorage));
    provide_context(onboarding);

    view! {
        <Title text="WordLens"/>

        <AuthProvider service=service>
            <Router>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route
                        path=StaticSegment("auth")
                        view=|| view! {
                            <PublicRoute default_destination=DEFAULT_DESTINATION>
                                <LoginPage/>
                            </PublicRoute>
                        }
                    />
                    <Route
                        path=StaticSegment("")
                        view=|| view! {
                            <ProtectedRoute>
                                <DashboardPage/>
                            </ProtectedRoute>
                        }
                    />
                    <Route
                        path=StaticSegment("admin")
                        view=|| view! {
                            <ProtectedRoute>
                                <RoleGate role=Role::Admin>
                                    <AdminPage/>
                                </RoleGate>
                            </ProtectedRoute>
                        }
                    />
                </Routes>
            </Router>
        </AuthProvider>
    }
}
