//! PricingCatalog interface tests.
//!
//! Backends load `SEED_CATALOG` before running these. Game ids 9001-9003
//! are reserved for tests.

use arcade_pass::interfaces::PricingCatalog;
use arcade_pass::models::{PriceEntry, PricingKind};

/// Catalog rows the contract tests expect. Plain SQL accepted by both
/// SQLite and PostgreSQL.
pub const SEED_CATALOG: &str = r#"
DELETE FROM game_prices WHERE game_id BETWEEN 9001 AND 9003;
DELETE FROM games WHERE game_id BETWEEN 9001 AND 9003;
INSERT INTO games (game_id, name, thumbnail, is_displayable) VALUES
    (9001, 'test_Tekken', 'tekken.png', TRUE),
    (9002, 'test_Pacman', NULL, TRUE),
    (9003, 'test_Hidden', NULL, FALSE);
INSERT INTO game_prices (game_id, kind, label, price) VALUES
    (9001, 'time', 60, 90),
    (9001, 'time', 30, 50),
    (9001, 'level', 3, 20),
    (9002, 'level', 5, 40);
"#;

pub async fn test_query_pricing_for_game<S: PricingCatalog>(store: &S) {
    let entries = store
        .query_pricing(9001)
        .await
        .expect("query should succeed");

    assert_eq!(entries.len(), 3);
    assert!(entries.contains(&PriceEntry::time(9001, 30, 50)));
    assert!(entries.contains(&PriceEntry::time(9001, 60, 90)));
    assert!(entries.contains(&PriceEntry::level(9001, 3, 20)));
}

pub async fn test_query_pricing_ordered<S: PricingCatalog>(store: &S) {
    let entries = store.query_pricing(9001).await.unwrap();
    let time_labels: Vec<u16> = entries
        .iter()
        .filter(|e| e.kind == PricingKind::Time)
        .map(|e| e.label)
        .collect();
    assert_eq!(time_labels, vec![30, 60], "labels should be ascending");
}

pub async fn test_query_pricing_unknown_game<S: PricingCatalog>(store: &S) {
    let entries = store.query_pricing(9999).await.unwrap();
    assert!(entries.is_empty());
}

pub async fn test_query_all_pricing<S: PricingCatalog>(store: &S) {
    let entries = store.query_all_pricing().await.unwrap();
    let seeded = entries
        .iter()
        .filter(|e| (9001..=9003).contains(&e.game_id))
        .count();
    assert_eq!(seeded, 4);
}

pub async fn test_query_games_displayable<S: PricingCatalog>(store: &S) {
    let games: Vec<_> = store
        .query_games_displayable()
        .await
        .unwrap()
        .into_iter()
        .filter(|g| (9001..=9003).contains(&g.game_id))
        .collect();

    assert_eq!(games.len(), 2, "hidden game should be excluded");
    assert_eq!(games[0].game_id, 9001);
    assert_eq!(games[0].thumbnail.as_deref(), Some("tekken.png"));
    assert_eq!(games[1].name, "test_Pacman");
    assert_eq!(games[1].thumbnail, None);
}

#[macro_export]
macro_rules! run_pricing_catalog_tests {
    ($store:expr) => {
        use $crate::storage::pricing_catalog_tests::*;

        test_query_pricing_for_game($store).await;
        println!("  test_query_pricing_for_game: PASSED");

        test_query_pricing_ordered($store).await;
        println!("  test_query_pricing_ordered: PASSED");

        test_query_pricing_unknown_game($store).await;
        println!("  test_query_pricing_unknown_game: PASSED");

        test_query_all_pricing($store).await;
        println!("  test_query_all_pricing: PASSED");

        test_query_games_displayable($store).await;
        println!("  test_query_games_displayable: PASSED");
    };
}
