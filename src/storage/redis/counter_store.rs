//! Redis CounterStore implementation.
//!
//! The code counter lives under a single string key shared by every server
//! instance. Set-if-absent maps to `SET NX`; compare-and-set runs as a Lua
//! script so the read and the write happen in one server-side step.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client, Script};
use tracing::{debug, info};

use crate::interfaces::{CounterStore, Result};

/// Atomically replace KEYS[1] with ARGV[2] if it currently equals ARGV[1].
const COMPARE_AND_SET_SCRIPT: &str = r#"
if redis.call('GET', KEYS[1]) == ARGV[1] then
    redis.call('SET', KEYS[1], ARGV[2])
    return 1
end
return 0
"#;

/// Redis implementation of CounterStore.
///
/// Key format: `{prefix}:{key}` when a prefix is configured, otherwise the
/// key verbatim so existing deployments keep reading `latest_arcade_code`.
pub struct RedisCounterStore {
    conn: ConnectionManager,
    key_prefix: Option<String>,
    cas: Script,
}

impl RedisCounterStore {
    /// Create a new Redis counter store.
    ///
    /// # Arguments
    /// * `url` - Redis connection URL (e.g., redis://localhost:55003)
    /// * `key_prefix` - Optional namespace for the counter key
    pub async fn new(url: &str, key_prefix: Option<&str>) -> Result<Self> {
        let client = Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;

        info!(url = %url, "Connected to Redis for code counter");

        Ok(Self {
            conn,
            key_prefix: key_prefix
                .filter(|p| !p.is_empty())
                .map(str::to_string),
            cas: Script::new(COMPARE_AND_SET_SCRIPT),
        })
    }

    fn counter_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{prefix}:{key}"),
            None => key.to_string(),
        }
    }
}

#[async_trait]
impl CounterStore for RedisCounterStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let key = self.counter_key(key);
        let mut conn = self.conn.clone();

        let value: Option<String> = conn.get(&key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let key = self.counter_key(key);
        let mut conn = self.conn.clone();

        let _: () = conn.set(&key, value).await?;

        debug!(key = %key, value = %value, "Counter overwritten");
        Ok(())
    }

    async fn set_if_absent(&self, key: &str, value: &str) -> Result<bool> {
        let key = self.counter_key(key);
        let mut conn = self.conn.clone();

        let written: bool = conn.set_nx(&key, value).await?;
        Ok(written)
    }

    async fn compare_and_set(&self, key: &str, expected: &str, new: &str) -> Result<bool> {
        let key = self.counter_key(key);
        let mut conn = self.conn.clone();

        let swapped: i32 = self
            .cas
            .key(&key)
            .arg(expected)
            .arg(new)
            .invoke_async(&mut conn)
            .await?;

        Ok(swapped == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Integration tests require Redis running
    // Run with: cargo test --features redis -- --ignored

    #[tokio::test]
    #[ignore = "requires running Redis"]
    async fn test_redis_counter_compare_and_set() {
        let store = RedisCounterStore::new("redis://localhost:55003", Some("arcade-unit"))
            .await
            .expect("Failed to connect to Redis");
        let key = "cas_check";

        store.set(key, "ABXYSO").await.unwrap();
        assert!(!store.compare_and_set(key, "ABXYSS", "ABXYSX").await.unwrap());
        assert!(store.compare_and_set(key, "ABXYSO", "ABXYSS").await.unwrap());
        assert_eq!(store.get(key).await.unwrap().as_deref(), Some("ABXYSS"));
        assert!(!store.set_if_absent(key, "ABXYSO").await.unwrap());
    }
}
