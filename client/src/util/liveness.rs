//! Shared "still mounted" flag for async work spawned by components.
//!
//! Tasks started with `spawn_local` outlive the component that spawned them.
//! Each task holds a clone of the owner's [`Liveness`] and checks it before
//! writing results back; the owner ends it from `on_cleanup`.

#[cfg(test)]
#[path = "liveness_test.rs"]
mod liveness_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Clone, Debug)]
pub struct Liveness(Arc<AtomicBool>);

impl Default for Liveness {
    fn default() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }
}

impl Liveness {
    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Mark the owner gone. Every clone observes it.
    pub fn end(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    /// Run `apply` only while the owner is alive.
    pub fn run_if_alive<T>(&self, apply: impl FnOnce() -> T) -> Option<T> {
        self.is_alive().then(apply)
    }
}
