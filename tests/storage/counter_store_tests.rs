//! CounterStore interface tests.
//!
//! Each backend gives the store a fresh namespace, so keys here are fixed.

use std::sync::Arc;

use arcade_pass::code::CodeGenerator;
use arcade_pass::interfaces::CounterStore;

pub async fn test_get_absent<S: CounterStore>(store: &S) {
    let value = store.get("test_absent").await.expect("get should succeed");
    assert!(value.is_none());
}

pub async fn test_set_if_absent<S: CounterStore>(store: &S) {
    assert!(store.set_if_absent("test_seed", "ABXYSO").await.unwrap());
    assert!(
        !store.set_if_absent("test_seed", "AAAAAA").await.unwrap(),
        "second seed should not overwrite"
    );
    assert_eq!(
        store.get("test_seed").await.unwrap().as_deref(),
        Some("ABXYSO")
    );
}

pub async fn test_compare_and_set<S: CounterStore>(store: &S) {
    store.set("test_cas", "ABXYSO").await.unwrap();

    assert!(
        !store.compare_and_set("test_cas", "ABXYSS", "ABXYSX").await.unwrap(),
        "stale expectation should lose"
    );
    assert!(store.compare_and_set("test_cas", "ABXYSO", "ABXYSS").await.unwrap());
    assert_eq!(
        store.get("test_cas").await.unwrap().as_deref(),
        Some("ABXYSS")
    );
}

pub async fn test_compare_and_set_absent<S: CounterStore>(store: &S) {
    assert!(!store
        .compare_and_set("test_cas_absent", "ABXYSO", "ABXYSS")
        .await
        .unwrap());
    assert!(store.get("test_cas_absent").await.unwrap().is_none());
}

/// Concurrent issuance through the generator never repeats a code.
pub async fn test_concurrent_generation(store: Arc<dyn CounterStore>) {
    let generator = Arc::new(
        CodeGenerator::new(store)
            .with_key("test_concurrent")
            .with_max_attempts(1_000),
    );

    let handles: Vec<_> = (0..32)
        .map(|_| {
            let generator = Arc::clone(&generator);
            tokio::spawn(async move { generator.generate_code().await })
        })
        .collect();

    let mut codes = std::collections::HashSet::new();
    for result in futures::future::join_all(handles).await {
        let code = result.expect("task panicked").expect("generation failed");
        assert!(codes.insert(code), "duplicate code issued");
    }
    assert_eq!(codes.len(), 32);
}

#[macro_export]
macro_rules! run_counter_store_tests {
    ($store:expr) => {
        use $crate::storage::counter_store_tests::*;

        test_get_absent($store).await;
        println!("  test_get_absent: PASSED");

        test_set_if_absent($store).await;
        println!("  test_set_if_absent: PASSED");

        test_compare_and_set($store).await;
        println!("  test_compare_and_set: PASSED");

        test_compare_and_set_absent($store).await;
        println!("  test_compare_and_set_absent: PASSED");
    };
}
