//! Browser `localStorage` access behind a small key-value trait.
//!
//! SYSTEM CONTEXT
//! ==============
//! The onboarding tracker and the cached session both persist through
//! [`KeyValueStore`], so their logic runs against an in-memory store in unit
//! tests and against [`LocalStorage`] in the browser. Writes are best-effort:
//! a full or disabled storage area degrades to "not persisted", never a crash.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Durable string key-value storage. Last writer wins.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// The browser's `window.localStorage`. A no-op outside the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

#[cfg(feature = "hydrate")]
fn browser_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            browser_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) {
        #[cfg(feature = "hydrate")]
        {
            let Some(storage) = browser_storage() else {
                return;
            };
            if storage.set_item(key, value).is_err() {
                leptos::logging::warn!("localStorage write failed for {key}");
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = browser_storage() {
                if storage.remove_item(key).is_err() {
                    leptos::logging::warn!("localStorage remove failed for {key}");
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }
}

/// Load a JSON value stored under `key`. Malformed entries read as absent.
pub fn load_json<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            leptos::logging::warn!("discarding malformed {key} entry: {e}");
            None
        }
    }
}

/// Save a JSON value under `key`.
pub fn save_json<T: Serialize>(store: &impl KeyValueStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => store.set(key, &raw),
        Err(e) => leptos::logging::warn!("failed to serialize {key} entry: {e}"),
    }
}

/// In-memory store for unit tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    entries: std::cell::RefCell<std::collections::HashMap<String, String>>,
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}
