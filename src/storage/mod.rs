//! Storage implementations.

use std::sync::Arc;

use tracing::info;

use crate::config::{CounterConfig, StorageConfig, StorageType};
use crate::interfaces::{CounterStore, PricingCatalog, SessionStore};

pub mod mock;

#[cfg(any(feature = "sqlite", feature = "postgres"))]
pub mod schema;
#[cfg(any(feature = "sqlite", feature = "postgres"))]
pub mod sql;

#[cfg(feature = "redis")]
pub mod redis;

#[cfg(feature = "postgres")]
pub use sql::postgres::{PostgresPricingCatalog, PostgresSessionStore};
#[cfg(feature = "sqlite")]
pub use sql::sqlite::{SqlitePricingCatalog, SqliteSessionStore};

#[cfg(feature = "redis")]
pub use self::redis::RedisCounterStore;

/// Error type for storage initialization.
pub type InitError = Box<dyn std::error::Error + Send + Sync>;

/// Database-backed stores sharing one connection pool.
#[derive(Clone)]
pub struct Stores {
    pub catalog: Arc<dyn PricingCatalog>,
    pub sessions: Arc<dyn SessionStore>,
}

/// Initialize the session ledger and pricing catalog based on configuration.
///
/// Creates the tables if they are missing.
pub async fn init_storage(config: &StorageConfig) -> Result<Stores, InitError> {
    match &config.storage_type {
        #[cfg(feature = "sqlite")]
        StorageType::Sqlite => {
            let path = &config.sqlite.path;
            info!("Storage: sqlite at {}", path);

            if let Some(parent) = std::path::Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }

            let pool = sqlx::SqlitePool::connect(&format!("sqlite:{}?mode=rwc", path)).await?;

            let catalog = SqlitePricingCatalog::new(pool.clone());
            catalog.init().await?;

            let sessions = SqliteSessionStore::new(pool);
            sessions.init().await?;

            Ok(Stores {
                catalog: Arc::new(catalog),
                sessions: Arc::new(sessions),
            })
        }
        #[cfg(feature = "postgres")]
        StorageType::Postgres => {
            info!("Storage: postgres");

            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.postgres.max_connections)
                .connect(&config.postgres.uri)
                .await?;

            let catalog = PostgresPricingCatalog::new(pool.clone());
            catalog.init().await?;

            let sessions = PostgresSessionStore::new(pool);
            sessions.init().await?;

            Ok(Stores {
                catalog: Arc::new(catalog),
                sessions: Arc::new(sessions),
            })
        }
        #[allow(unreachable_patterns)]
        other => {
            tracing::error!(
                "{} storage requested but '{}' feature is not enabled",
                other,
                other
            );
            Err(format!("{} feature not enabled", other).into())
        }
    }
}

/// Connect to the shared code counter.
#[cfg(feature = "redis")]
pub async fn init_counter(config: &CounterConfig) -> Result<Arc<dyn CounterStore>, InitError> {
    info!("Counter: redis at {}", config.redis.url);

    let store =
        RedisCounterStore::new(&config.redis.url, config.redis.key_prefix.as_deref()).await?;
    Ok(Arc::new(store))
}

/// Connect to the shared code counter.
#[cfg(not(feature = "redis"))]
pub async fn init_counter(_config: &CounterConfig) -> Result<Arc<dyn CounterStore>, InitError> {
    tracing::error!("Redis counter requested but 'redis' feature is not enabled");
    Err("redis feature not enabled".into())
}
