//! PostgreSQL storage integration tests using testcontainers.
//!
//! Run with: cargo test --test storage_postgres --features postgres -- --ignored --nocapture
//!
//! These tests spin up PostgreSQL in a container using testcontainers-rs,
//! create the tables, and test the ledger and catalog interfaces.

mod storage;

use std::time::Duration;

use arcade_pass::storage::{PostgresPricingCatalog, PostgresSessionStore};
use testcontainers::{
    core::{IntoContainerPort, WaitFor},
    runners::AsyncRunner,
    GenericImage, ImageExt,
};

use storage::pricing_catalog_tests::SEED_CATALOG;

/// Start PostgreSQL container.
///
/// Returns (container, connection_string) where connection_string is suitable
/// for sqlx PgPool connection.
async fn start_postgres() -> (testcontainers::ContainerAsync<GenericImage>, String) {
    // PostgreSQL logs the ready message once during initdb and again when it
    // is actually serving.
    let image = GenericImage::new("postgres", "16")
        .with_exposed_port(5432.tcp())
        .with_wait_for(WaitFor::message_on_stdout(
            "database system is ready to accept connections",
        ));

    let container = image
        .with_env_var("POSTGRES_USER", "arcade")
        .with_env_var("POSTGRES_PASSWORD", "arcade")
        .with_env_var("POSTGRES_DB", "arcade")
        .with_startup_timeout(Duration::from_secs(60))
        .start()
        .await
        .expect("Failed to start postgres container");

    tokio::time::sleep(Duration::from_secs(1)).await;

    let host_port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to get mapped port");

    let host = container
        .get_host()
        .await
        .expect("Failed to get container host");

    let connection_string = format!("postgres://arcade:arcade@{}:{}/arcade", host, host_port);

    println!("PostgreSQL available at: {}", connection_string);

    (container, connection_string)
}

async fn connect(connection_string: &str) -> sqlx::PgPool {
    sqlx::PgPool::connect(connection_string)
        .await
        .expect("Failed to connect to PostgreSQL")
}

#[tokio::test]
#[ignore = "requires Docker for testcontainers"]
async fn test_postgres_session_store() {
    println!("=== PostgreSQL SessionStore Tests ===");
    println!("Starting PostgreSQL container...");

    let (_container, connection_string) = start_postgres().await;
    let store = PostgresSessionStore::new(connect(&connection_string).await);
    store.init().await.expect("Failed to create tables");

    println!("Running SessionStore tests...");
    run_session_store_tests!(&store);

    println!("=== All PostgreSQL SessionStore tests PASSED ===");
}

#[tokio::test]
#[ignore = "requires Docker for testcontainers"]
async fn test_postgres_pricing_catalog() {
    println!("=== PostgreSQL PricingCatalog Tests ===");
    println!("Starting PostgreSQL container...");

    let (_container, connection_string) = start_postgres().await;
    let pool = connect(&connection_string).await;
    let store = PostgresPricingCatalog::new(pool.clone());
    store.init().await.expect("Failed to create tables");
    sqlx::raw_sql(SEED_CATALOG)
        .execute(&pool)
        .await
        .expect("Failed to seed catalog");

    println!("Running PricingCatalog tests...");
    run_pricing_catalog_tests!(&store);

    println!("=== All PostgreSQL PricingCatalog tests PASSED ===");
}
