//! First-visit onboarding and product-tour tracking.
//!
//! DESIGN
//! ======
//! The two durable flags are read into an [`OnboardingStage`] so "tour
//! completed" can never hold without "onboarding completed". The in-memory
//! `is_first_visit`/`show_tour` flags are computed once per load; completing
//! onboarding does not surface the tour until the next load.

#[cfg(test)]
#[path = "onboarding_test.rs"]
mod onboarding_test;

use crate::util::storage::KeyValueStore;

pub const ONBOARDING_COMPLETED_KEY: &str = "onboarding-completed";
pub const TOUR_COMPLETED_KEY: &str = "tour-completed";
const FLAG_SET: &str = "true";

/// Durable progress through onboarding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OnboardingStage {
    #[default]
    NotStarted,
    Onboarded,
    Toured,
}

impl OnboardingStage {
    /// Interpret the raw flags. A tour flag without onboarding reads as
    /// not started.
    pub fn from_flags(onboarding_completed: bool, tour_completed: bool) -> Self {
        match (onboarding_completed, tour_completed) {
            (false, _) => Self::NotStarted,
            (true, false) => Self::Onboarded,
            (true, true) => Self::Toured,
        }
    }

    pub fn read(store: &impl KeyValueStore) -> Self {
        Self::from_flags(flag_set(store, ONBOARDING_COMPLETED_KEY), flag_set(store, TOUR_COMPLETED_KEY))
    }
}

fn flag_set(store: &impl KeyValueStore, key: &str) -> bool {
    store.get(key).as_deref() == Some(FLAG_SET)
}

/// Onboarding flags for the current page load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OnboardingTracker {
    pub stage: OnboardingStage,
    pub is_first_visit: bool,
    pub show_tour: bool,
}

impl Default for OnboardingTracker {
    fn default() -> Self {
        Self::from_stage(OnboardingStage::NotStarted)
    }
}

impl OnboardingTracker {
    pub fn from_stage(stage: OnboardingStage) -> Self {
        Self {
            stage,
            is_first_visit: stage == OnboardingStage::NotStarted,
            show_tour: stage == OnboardingStage::Onboarded,
        }
    }

    /// Read both flags from `store`.
    pub fn load(store: &impl KeyValueStore) -> Self {
        Self::from_stage(OnboardingStage::read(store))
    }

    /// Mark onboarding done. Idempotent; leaves `show_tour` for the next load.
    pub fn complete_onboarding(&mut self, store: &impl KeyValueStore) {
        store.set(ONBOARDING_COMPLETED_KEY, FLAG_SET);
        if self.stage == OnboardingStage::NotStarted {
            self.stage = OnboardingStage::Onboarded;
        }
        self.is_first_visit = false;
    }

    /// Mark the tour done. Also records onboarding if it was still pending.
    pub fn complete_tour(&mut self, store: &impl KeyValueStore) {
        if self.stage == OnboardingStage::NotStarted {
            store.set(ONBOARDING_COMPLETED_KEY, FLAG_SET);
            self.is_first_visit = false;
        }
        store.set(TOUR_COMPLETED_KEY, FLAG_SET);
        self.stage = OnboardingStage::Toured;
        self.show_tour = false;
    }

    /// Erase both flags and return to the first-visit state.
    pub fn reset_onboarding(&mut self, store: &impl KeyValueStore) {
        store.remove(ONBOARDING_COMPLETED_KEY);
        store.remove(TOUR_COMPLETED_KEY);
        *self = Self::default();
    }
}
