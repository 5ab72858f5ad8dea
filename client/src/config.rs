//! Identity-service configuration baked into the client bundle.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser build reads `WORDLENS_SERVICE_URL` and
//! `WORDLENS_SERVICE_ANON_KEY` at compile time. A bundle built without them
//! still boots: it gets a placeholder host, logs a warning, and every remote
//! call simply fails and settles to the signed-out state.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const PLACEHOLDER_SERVICE_URL: &str = "https://placeholder.invalid";
pub const PLACEHOLDER_ANON_KEY: &str = "placeholder-anon-key";

/// Connection settings for the hosted identity/data service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Base URL without a trailing slash.
    pub url: String,
    /// Public (anonymous) API key sent as the `apikey` header.
    pub anon_key: String,
    /// True when either value was missing and placeholders were substituted.
    pub is_placeholder: bool,
}

impl ServiceConfig {
    /// Resolve from the values captured at build time.
    pub fn from_build_env() -> Self {
        Self::resolve(option_env!("WORDLENS_SERVICE_URL"), option_env!("WORDLENS_SERVICE_ANON_KEY"))
    }

    /// Build a config from raw values, falling back to placeholders when either
    /// is missing or blank.
    pub fn resolve(url: Option<&str>, anon_key: Option<&str>) -> Self {
        let url = non_blank(url);
        let anon_key = non_blank(anon_key);
        match (url, anon_key) {
            (Some(url), Some(anon_key)) => Self {
                url: url.trim_end_matches('/').to_owned(),
                anon_key: anon_key.to_owned(),
                is_placeholder: false,
            },
            (url, anon_key) => {
                leptos::logging::warn!(
                    "identity service not configured (url set: {}, key set: {}); using placeholder",
                    url.is_some(),
                    anon_key.is_some()
                );
                Self::placeholder()
            }
        }
    }

    /// Placeholder configuration; calls against it fail at the network layer.
    pub fn placeholder() -> Self {
        Self {
            url: PLACEHOLDER_SERVICE_URL.to_owned(),
            anon_key: PLACEHOLDER_ANON_KEY.to_owned(),
            is_placeholder: true,
        }
    }

    /// Absolute URL for a service path such as `/auth/v1/logout`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.url, path.trim_start_matches('/'))
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|v| !v.is_empty())
}
