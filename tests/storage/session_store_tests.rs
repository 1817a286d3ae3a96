//! SessionStore interface tests.
//!
//! Codes and payment references used here start with `test_` so backends
//! can clean up with a prefix match.

use chrono::{TimeZone, Utc};

use arcade_pass::interfaces::{SessionStore, StorageError};
use arcade_pass::models::{GameSession, RedemptionRecord};

fn record(code: &str, payment_reference: &str) -> RedemptionRecord {
    let mut session = GameSession::timed(7, "Tekken", 50, 30, payment_reference).with_code(code);
    session.timestamp = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
    RedemptionRecord::issued(&session)
}

// =============================================================================
// SessionStore::get_by_code tests
// =============================================================================

pub async fn test_get_nonexistent<S: SessionStore>(store: &S) {
    let result = store
        .get_by_code("test_missing")
        .await
        .expect("get should succeed");
    assert!(result.is_none(), "unknown code should be None");
}

// =============================================================================
// SessionStore::insert tests
// =============================================================================

pub async fn test_insert_and_get<S: SessionStore>(store: &S) {
    let inserted = record("test_ins_1", "test_pay_ins_1");
    store.insert(&inserted).await.expect("insert should succeed");

    let loaded = store
        .get_by_code("test_ins_1")
        .await
        .expect("get should succeed")
        .expect("record should exist");

    assert_eq!(loaded, inserted, "record should survive a round trip");
    assert!(!loaded.is_played);
    assert!(loaded.played_at.is_none());
}

pub async fn test_insert_level_session<S: SessionStore>(store: &S) {
    let session = GameSession::levelled(3, "Pacman", 40, 5, "test_pay_lvl_1").with_code("test_lvl_1");
    store
        .insert(&RedemptionRecord::issued(&session))
        .await
        .expect("insert should succeed");

    let loaded = store.get_by_code("test_lvl_1").await.unwrap().unwrap();
    assert_eq!(loaded.play_time, None);
    assert_eq!(loaded.levels, Some(5));
}

pub async fn test_duplicate_code_rejected<S: SessionStore>(store: &S) {
    store
        .insert(&record("test_dup_code", "test_pay_dup_code_1"))
        .await
        .unwrap();

    let err = store
        .insert(&record("test_dup_code", "test_pay_dup_code_2"))
        .await
        .expect_err("second insert with same code should fail");
    assert!(
        matches!(err, StorageError::Duplicate(_)),
        "expected Duplicate, got {err:?}"
    );
}

pub async fn test_duplicate_payment_reference_rejected<S: SessionStore>(store: &S) {
    store
        .insert(&record("test_dup_pay_1", "test_pay_dup_ref"))
        .await
        .unwrap();

    let err = store
        .insert(&record("test_dup_pay_2", "test_pay_dup_ref"))
        .await
        .expect_err("second insert with same payment reference should fail");
    assert!(err.is_duplicate(), "expected Duplicate, got {err:?}");

    let missing = store.get_by_code("test_dup_pay_2").await.unwrap();
    assert!(missing.is_none(), "rejected record must not be stored");
}

// =============================================================================
// SessionStore::mark_played tests
// =============================================================================

pub async fn test_mark_played_once<S: SessionStore>(store: &S) {
    store
        .insert(&record("test_play_1", "test_pay_play_1"))
        .await
        .unwrap();
    let played_at = Utc.with_ymd_and_hms(2024, 5, 1, 11, 0, 0).unwrap();

    assert!(store.mark_played("test_play_1", played_at).await.unwrap());
    assert!(
        !store.mark_played("test_play_1", Utc::now()).await.unwrap(),
        "second transition should not happen"
    );

    let loaded = store.get_by_code("test_play_1").await.unwrap().unwrap();
    assert!(loaded.is_played);
    assert_eq!(loaded.played_at, Some(played_at), "first play time is kept");
}

pub async fn test_mark_played_unknown<S: SessionStore>(store: &S) {
    let flipped = store
        .mark_played("test_never_issued", Utc::now())
        .await
        .expect("mark_played should succeed");
    assert!(!flipped);
}

#[macro_export]
macro_rules! run_session_store_tests {
    ($store:expr) => {
        use $crate::storage::session_store_tests::*;

        test_get_nonexistent($store).await;
        println!("  test_get_nonexistent: PASSED");

        test_insert_and_get($store).await;
        println!("  test_insert_and_get: PASSED");

        test_insert_level_session($store).await;
        println!("  test_insert_level_session: PASSED");

        test_duplicate_code_rejected($store).await;
        println!("  test_duplicate_code_rejected: PASSED");

        test_duplicate_payment_reference_rejected($store).await;
        println!("  test_duplicate_payment_reference_rejected: PASSED");

        test_mark_played_once($store).await;
        println!("  test_mark_played_once: PASSED");

        test_mark_played_unknown($store).await;
        println!("  test_mark_played_unknown: PASSED");
    };
}
