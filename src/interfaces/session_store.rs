//! SessionStore trait definition.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::Result;
use crate::models::RedemptionRecord;

/// Interface for persisted sessions (the redemption ledger's backing store).
///
/// `code` and `payment_reference` are each unique. A write that violates
/// either must fail with `StorageError::Duplicate`.
///
/// # Implementations
///
/// - `SqliteSessionStore`: SQLite storage
/// - `PostgresSessionStore`: PostgreSQL storage
/// - `MockSessionStore`: In-memory mock for testing
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Insert a newly issued record.
    async fn insert(&self, record: &RedemptionRecord) -> Result<()>;

    /// Look up the record issued under `code`.
    async fn get_by_code(&self, code: &str) -> Result<Option<RedemptionRecord>>;

    /// Flip `is_played` from false to true.
    ///
    /// Returns true if this call performed the transition, false if the code
    /// is unknown or was already played.
    async fn mark_played(&self, code: &str, played_at: DateTime<Utc>) -> Result<bool>;
}
