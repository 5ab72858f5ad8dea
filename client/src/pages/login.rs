//! Entry page: email + password sign-in.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted under `PublicRoute`. A successful sign-in only publishes the
//! session; the gate then sends the user on to the recorded `from` location.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

#[cfg(any(test, feature = "hydrate"))]
use crate::net::error::ServiceError;
use crate::net::identity::RestIdentityService;
use crate::state::auth::AuthState;

/// Trim and require both fields.
fn validate_sign_in_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter both email and password.");
    }
    if !email.contains('@') {
        return Err("Enter a valid email address.");
    }
    Ok((email.to_owned(), password.to_owned()))
}

/// User-facing message for a failed sign-in.
#[cfg(any(test, feature = "hydrate"))]
fn sign_in_error_message(err: &ServiceError) -> String {
    match err {
        ServiceError::Status { status: 400 | 401, .. } => "Invalid email or password.".to_owned(),
        ServiceError::Status { message, .. } => format!("Sign-in failed: {message}"),
        ServiceError::Network(_) | ServiceError::Unavailable => {
            "Could not reach the sign-in service. Check your connection.".to_owned()
        }
        ServiceError::Decode(_) => "Unexpected response from the sign-in service.".to_owned(),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let service = expect_context::<RestIdentityService>();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_sign_in = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, password_value) = match validate_sign_in_input(&email.get(), &password.get()) {
            Ok(values) => values,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Signing in...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            use crate::net::identity::IdentityService;

            let service = service.clone();
            leptos::task::spawn_local(async move {
                match service.sign_in_with_password(&email_value, &password_value).await {
                    Ok(session) => {
                        password.set(String::new());
                        info.set(String::new());
                        auth.update(|a| a.sign_in(session));
                    }
                    Err(e) => {
                        leptos::logging::warn!("sign-in failed: {e}");
                        info.set(sign_in_error_message(&e));
                    }
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email_value, password_value, auth, &service);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"WordLens"</h1>
                <p class="login-card__subtitle">"Sign in to analyze your documents"</p>
                <form class="login-form" on:submit=on_sign_in>
                    <input
                        class="login-input"
                        type="email"
                        autocomplete="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign In"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
