//! Store interfaces consumed by the issuance and redemption services.
//!
//! Each store is a narrow async trait so the services can run against
//! SQL/Redis in production and the in-memory mocks in tests.

use std::time::Duration;

mod counter_store;
mod pricing_catalog;
mod session_store;

pub use counter_store::CounterStore;
pub use pricing_catalog::PricingCatalog;
pub use session_store::SessionStore;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors raised at the store boundary.
///
/// Callers branch on the variant, never on the message text.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A uniqueness constraint rejected the write.
    #[error("Duplicate key: {0}")]
    Duplicate(String),

    #[error("Invalid stored value for {field}: {message}")]
    InvalidData {
        field: &'static str,
        message: String,
    },

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store call timed out after {0:?}")]
    Timeout(Duration),

    #[cfg(any(feature = "sqlite", feature = "postgres"))]
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[cfg(feature = "redis")]
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

#[cfg(any(feature = "sqlite", feature = "postgres"))]
impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StorageError::Duplicate(db.message().to_string())
            }
            _ => StorageError::Database(err),
        }
    }
}

impl StorageError {
    /// True if a uniqueness constraint rejected the write.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, StorageError::Duplicate(_))
    }
}
