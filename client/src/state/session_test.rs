use futures::executor::block_on;

use super::*;
use crate::net::error::ServiceError;
use crate::net::fake_identity::{FakeIdentity, session};
use crate::util::storage::{MemoryStore, save_json};

fn offline() -> ServiceError {
    ServiceError::Network("offline".to_owned())
}

// =============================================================
// check
// =============================================================

#[test]
fn check_fresh_outside_margin() {
    assert_eq!(check(&session("u1", 1_000), 1_000 - REFRESH_MARGIN_SECS - 1), SessionCheck::Fresh);
}

#[test]
fn check_refresh_due_inside_margin() {
    assert_eq!(check(&session("u1", 1_000), 1_000 - REFRESH_MARGIN_SECS), SessionCheck::RefreshDue);
    assert_eq!(check(&session("u1", 1_000), 999), SessionCheck::RefreshDue);
}

#[test]
fn check_expired_at_or_after_expiry() {
    assert_eq!(check(&session("u1", 1_000), 1_000), SessionCheck::Expired);
    assert_eq!(check(&session("u1", 1_000), 5_000), SessionCheck::Expired);
}

// =============================================================
// revalidate
// =============================================================

#[test]
fn fresh_session_is_kept_without_request() {
    let service = FakeIdentity::new();
    let update = block_on(revalidate(&service, &session("u1", 10_000), 0));
    assert_eq!(update, SessionUpdate::Keep);
    assert!(service.calls().is_empty());
}

#[test]
fn due_session_is_replaced_on_refresh() {
    let service = FakeIdentity::new().with_refresh(Ok(session("u1", 20_000)));
    let update = block_on(revalidate(&service, &session("u1", 1_000), 990));
    assert_eq!(update, SessionUpdate::Replace(session("u1", 20_000)));
    assert_eq!(service.calls(), vec!["refresh_session"]);
}

#[test]
fn due_session_is_kept_when_refresh_fails() {
    let service = FakeIdentity::new().with_refresh(Err(offline()));
    let update = block_on(revalidate(&service, &session("u1", 1_000), 990));
    assert_eq!(update, SessionUpdate::Keep);
}

#[test]
fn expired_session_is_cleared_when_refresh_fails() {
    let service = FakeIdentity::new().with_refresh(Err(offline()));
    let update = block_on(revalidate(&service, &session("u1", 1_000), 2_000));
    assert_eq!(update, SessionUpdate::Clear);
}

#[test]
fn expired_session_is_replaced_when_refresh_succeeds() {
    let service = FakeIdentity::new().with_refresh(Ok(session("u1", 9_000)));
    let update = block_on(revalidate(&service, &session("u1", 1_000), 2_000));
    assert_eq!(update, SessionUpdate::Replace(session("u1", 9_000)));
}

// =============================================================
// resolve_initial_session
// =============================================================

#[test]
fn initial_resolution_without_stored_session_is_absent() {
    let service = FakeIdentity::new();
    assert_eq!(block_on(resolve_initial_session(&service, None, 0)), None);
    assert!(service.calls().is_empty());
}

#[test]
fn initial_resolution_keeps_fresh_session() {
    let service = FakeIdentity::new();
    let restored = block_on(resolve_initial_session(&service, Some(session("u1", 10_000)), 0));
    assert_eq!(restored, Some(session("u1", 10_000)));
}

#[test]
fn initial_resolution_settles_absent_when_service_unreachable() {
    let service = FakeIdentity::new().with_refresh(Err(offline()));
    let restored = block_on(resolve_initial_session(&service, Some(session("u1", 1_000)), 5_000));
    assert_eq!(restored, None);
}

// =============================================================
// restore_session
// =============================================================

#[test]
fn restore_reads_cached_session_from_store() {
    let store = MemoryStore::default();
    save_json(&store, SESSION_STORAGE_KEY, &session("u1", 10_000));
    let service = FakeIdentity::new();
    assert_eq!(block_on(restore_session(&service, &store, 0)), Some(session("u1", 10_000)));
    assert!(service.calls().is_empty());
}

#[test]
fn restore_without_cache_is_absent() {
    let service = FakeIdentity::new();
    assert_eq!(block_on(restore_session(&service, &MemoryStore::default(), 0)), None);
}

#[test]
fn restore_treats_corrupt_cache_as_absent() {
    let store = MemoryStore::default();
    store.set(SESSION_STORAGE_KEY, "{\"access_token\":");
    let service = FakeIdentity::new();
    assert_eq!(block_on(restore_session(&service, &store, 0)), None);
    assert!(service.calls().is_empty());
}

#[test]
fn restore_refreshes_near_expiry_cache() {
    let store = MemoryStore::default();
    save_json(&store, SESSION_STORAGE_KEY, &session("u1", 1_000));
    let service = FakeIdentity::new().with_refresh(Ok(session("u1", 9_000)));
    assert_eq!(block_on(restore_session(&service, &store, 990)), Some(session("u1", 9_000)));
}

// =============================================================
// lifecycle_tick
// =============================================================

fn settled(current: Option<Session>) -> AuthState {
    let mut state = AuthState::default();
    state.settle(current);
    state
}

#[test]
fn tick_is_idle_while_loading() {
    let service = FakeIdentity::new();
    assert_eq!(block_on(lifecycle_tick(&service, &AuthState::default(), 0)), None);
    assert!(service.calls().is_empty());
}

#[test]
fn tick_is_idle_when_signed_out() {
    let service = FakeIdentity::new();
    assert_eq!(block_on(lifecycle_tick(&service, &settled(None), 0)), None);
    assert!(service.calls().is_empty());
}

#[test]
fn tick_is_idle_for_fresh_session() {
    let service = FakeIdentity::new();
    let state = settled(Some(session("u1", 10_000)));
    assert_eq!(block_on(lifecycle_tick(&service, &state, 0)), None);
    assert!(service.calls().is_empty());
}

#[test]
fn tick_refresh_is_applied_to_unchanged_state() {
    let service = FakeIdentity::new().with_refresh(Ok(session("u1", 20_000)));
    let mut state = settled(Some(session("u1", 1_000)));
    let (from, update) = block_on(lifecycle_tick(&service, &state, 990)).expect("refresh due");
    assert_eq!(from, session("u1", 1_000));
    assert!(state.apply_update(&from, update));
    assert_eq!(state.user, Some(session("u1", 20_000)));
}

#[test]
fn tick_result_is_dropped_if_user_signed_out_meanwhile() {
    let service = FakeIdentity::new().with_refresh(Err(offline()));
    let mut state = settled(Some(session("u1", 1_000)));
    let (from, update) = block_on(lifecycle_tick(&service, &state, 2_000)).expect("expired");
    assert_eq!(update, SessionUpdate::Clear);
    state.sign_out();
    state.sign_in(session("u2", 10_000));
    assert!(!state.apply_update(&from, update));
    assert_eq!(state.user_id(), Some("u2"));
}

// =============================================================
// needs_email_verification
// =============================================================

#[test]
fn verification_needed_when_both_confirmation_fields_missing() {
    assert!(needs_email_verification(&session("u1", 0)));
}

#[test]
fn verification_not_needed_with_either_confirmation_field() {
    let mut s = session("u1", 0);
    s.user.confirmed_at = Some("2024-01-01T00:00:00Z".to_owned());
    assert!(!needs_email_verification(&s));

    let mut s = session("u1", 0);
    s.user.email_confirmed_at = Some("2024-01-01T00:00:00Z".to_owned());
    assert!(!needs_email_verification(&s));
}

#[test]
fn verification_not_needed_without_email() {
    let mut s = session("u1", 0);
    s.user.email = None;
    assert!(!needs_email_verification(&s));
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn now_unix_secs_is_after_2020() {
    assert!(now_unix_secs() > 1_577_836_800);
}
