//! # wordlens-client
//!
//! Leptos + WASM frontend for WordLens.
//!
//! This crate owns the session/authorization gate: the auth provider, role
//! resolution, protected/public route gates, session lifecycle, and the
//! onboarding tracker, plus the pages they guard. The `wordlens-server`
//! crate renders it with the `ssr` feature; the browser bundle is built with
//! `hydrate`.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install console logging and hydrate the SSR markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        leptos::logging::warn!("console logger already installed");
    }
    leptos::mount::hydrate_body(app::App);
}
