//! Mock CounterStore implementation for testing.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use crate::interfaces::{CounterStore, Result, StorageError};

/// Mock counter store that keeps values in memory.
///
/// A single mutex guards the map so `set_if_absent` and `compare_and_set`
/// are atomic, matching the Redis implementation.
#[derive(Default)]
pub struct MockCounterStore {
    values: Mutex<HashMap<String, String>>,
    cas_conflicts: RwLock<u32>,
    unavailable: RwLock<bool>,
    delay: RwLock<Option<Duration>>,
}

impl MockCounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `count` compare-and-set calls lose, as if another
    /// instance had advanced the counter first.
    pub async fn set_cas_conflicts(&self, count: u32) {
        *self.cas_conflicts.write().await = count;
    }

    /// Fail every call with `StorageError::Unavailable`.
    pub async fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.write().await = unavailable;
    }

    /// Stall every call for `delay` before it touches the map.
    pub async fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.write().await = delay;
    }

    /// Seed a value directly, bypassing failure injection.
    pub async fn set_value(&self, key: &str, value: &str) {
        self.values
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
    }

    /// Read a value directly, bypassing failure injection.
    pub async fn value(&self, key: &str) -> Option<String> {
        self.values.lock().await.get(key).cloned()
    }

    async fn check_available(&self) -> Result<()> {
        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if *self.unavailable.read().await {
            return Err(StorageError::Unavailable("mock counter offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CounterStore for MockCounterStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.check_available().await?;
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check_available().await?;
        self.set_value(key, value).await;
        Ok(())
    }

    async fn set_if_absent(&self, key: &str, value: &str) -> Result<bool> {
        self.check_available().await?;
        let mut values = self.values.lock().await;
        if values.contains_key(key) {
            return Ok(false);
        }
        values.insert(key.to_string(), value.to_string());
        Ok(true)
    }

    async fn compare_and_set(&self, key: &str, expected: &str, new: &str) -> Result<bool> {
        self.check_available().await?;
        {
            let mut conflicts = self.cas_conflicts.write().await;
            if *conflicts > 0 {
                *conflicts -= 1;
                return Ok(false);
            }
        }

        let mut values = self.values.lock().await;
        match values.get(key) {
            Some(current) if current == expected => {
                values.insert(key.to_string(), new.to_string());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
