//! CounterStore trait definition.

use async_trait::async_trait;

use super::Result;

/// Interface for the shared code counter.
///
/// Holds string values under string keys in a store shared by every server
/// instance. `set_if_absent` and `compare_and_set` must be atomic with
/// respect to all other callers of the same key.
///
/// # Implementations
///
/// - `RedisCounterStore`: Redis storage
/// - `MockCounterStore`: In-memory mock for testing
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Read the current value. `None` if the key has never been written.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Unconditionally overwrite the value. Operator use only.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Write `value` only if the key is absent. Returns true if written.
    async fn set_if_absent(&self, key: &str, value: &str) -> Result<bool>;

    /// Replace `expected` with `new`. Returns false, without writing,
    /// if the stored value is not `expected`.
    async fn compare_and_set(&self, key: &str, expected: &str, new: &str) -> Result<bool>;
}
