use super::*;
use crate::util::storage::MemoryStore;

#[test]
fn fresh_install_is_first_visit_without_tour() {
    let store = MemoryStore::default();
    let tracker = OnboardingTracker::load(&store);
    assert_eq!(tracker.stage, OnboardingStage::NotStarted);
    assert!(tracker.is_first_visit);
    assert!(!tracker.show_tour);
}

#[test]
fn complete_onboarding_persists_literal_true() {
    let store = MemoryStore::default();
    let mut tracker = OnboardingTracker::load(&store);
    tracker.complete_onboarding(&store);
    assert_eq!(store.get(ONBOARDING_COMPLETED_KEY).as_deref(), Some("true"));
    assert!(!tracker.is_first_visit);
}

#[test]
fn complete_onboarding_is_idempotent() {
    let store = MemoryStore::default();
    let mut tracker = OnboardingTracker::load(&store);
    tracker.complete_onboarding(&store);
    tracker.complete_onboarding(&store);
    assert!(!tracker.is_first_visit);
    assert_eq!(tracker.stage, OnboardingStage::Onboarded);
    assert_eq!(store.get(ONBOARDING_COMPLETED_KEY).as_deref(), Some("true"));
}

#[test]
fn tour_waits_for_next_load_after_onboarding() {
    let store = MemoryStore::default();
    let mut tracker = OnboardingTracker::load(&store);
    tracker.complete_onboarding(&store);
    assert!(!tracker.show_tour);

    let next_load = OnboardingTracker::load(&store);
    assert!(!next_load.is_first_visit);
    assert!(next_load.show_tour);
}

#[test]
fn complete_tour_hides_tour_and_persists() {
    let store = MemoryStore::default();
    store.set(ONBOARDING_COMPLETED_KEY, "true");
    let mut tracker = OnboardingTracker::load(&store);
    assert!(tracker.show_tour);

    tracker.complete_tour(&store);
    assert!(!tracker.show_tour);
    assert_eq!(tracker.stage, OnboardingStage::Toured);
    assert_eq!(store.get(TOUR_COMPLETED_KEY).as_deref(), Some("true"));

    let next_load = OnboardingTracker::load(&store);
    assert!(!next_load.show_tour);
    assert!(!next_load.is_first_visit);
}

#[test]
fn complete_tour_before_onboarding_records_both() {
    let store = MemoryStore::default();
    let mut tracker = OnboardingTracker::load(&store);
    tracker.complete_tour(&store);
    assert!(!tracker.is_first_visit);
    assert_eq!(OnboardingStage::read(&store), OnboardingStage::Toured);
}

#[test]
fn tour_flag_alone_reads_as_not_started() {
    let store = MemoryStore::default();
    store.set(TOUR_COMPLETED_KEY, "true");
    let tracker = OnboardingTracker::load(&store);
    assert_eq!(tracker.stage, OnboardingStage::NotStarted);
    assert!(tracker.is_first_visit);
    assert!(!tracker.show_tour);
}

#[test]
fn non_literal_flag_values_are_unset() {
    let store = MemoryStore::default();
    store.set(ONBOARDING_COMPLETED_KEY, "yes");
    assert_eq!(OnboardingStage::read(&store), OnboardingStage::NotStarted);
}

#[test]
fn reset_returns_to_first_visit_from_any_stage() {
    for (onboarding, tour) in [(false, false), (true, false), (true, true), (false, true)] {
        let store = MemoryStore::default();
        if onboarding {
            store.set(ONBOARDING_COMPLETED_KEY, "true");
        }
        if tour {
            store.set(TOUR_COMPLETED_KEY, "true");
        }
        let mut tracker = OnboardingTracker::load(&store);
        tracker.reset_onboarding(&store);
        assert_eq!(tracker, OnboardingTracker::default());

        let reread = OnboardingTracker::load(&store);
        assert!(reread.is_first_visit);
        assert!(!reread.show_tour);
        assert_eq!(store.get(ONBOARDING_COMPLETED_KEY), None);
        assert_eq!(store.get(TOUR_COMPLETED_KEY), None);
    }
}
