//! Placeholder rendered while a gate is waiting on auth or roles.

use leptos::prelude::*;

#[component]
pub fn GateLoader() -> impl IntoView {
    view! {
        <div class="gate-loader" role="status" aria-busy="true">
            <span class="gate-loader__spinner"></span>
            <span class="gate-loader__label">"Loading..."</span>
        </div>
    }
}
