//! Banner asking signed-in users with an unconfirmed email to verify it.

use leptos::prelude::*;

use crate::net::identity::RestIdentityService;
use crate::state::auth::AuthState;
use crate::state::session::needs_email_verification;

#[component]
pub fn VerifyEmailBanner() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let service = expect_context::<RestIdentityService>();
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let unverified_email = move || {
        auth.with(|a| {
            a.user
                .as_ref()
                .filter(|s| needs_email_verification(s))
                .and_then(|s| s.user.email.clone())
        })
    };

    let on_resend = Callback::new(move |()| {
        if busy.get() {
            return;
        }
        let Some(email) = unverified_email() else {
            return;
        };
        busy.set(true);
        info.set("Sending...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            use crate::net::identity::IdentityService;

            let service = service.clone();
            leptos::task::spawn_local(async move {
                match service.resend_verification(&email).await {
                    Ok(()) => info.set(format!("Verification email sent to {email}.")),
                    Err(e) => {
                        leptos::logging::warn!("resend verification failed: {e}");
                        info.set("Could not send the verification email. Try again later.".to_owned());
                    }
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, &service);
        }
    });

    view! {
        <Show when=move || unverified_email().is_some()>
            <div class="verify-banner" role="alert">
                <span>
                    "Please verify your email address "
                    <strong>{move || unverified_email().unwrap_or_default()}</strong>
                    " to unlock all features."
                </span>
                <button class="verify-banner__button" on:click=move |_| on_resend.run(()) disabled=move || busy.get()>
                    "Resend email"
                </button>
                <Show when=move || !info.get().is_empty()>
                    <span class="verify-banner__info">{move || info.get()}</span>
                </Show>
            </div>
        </Show>
    }
}
