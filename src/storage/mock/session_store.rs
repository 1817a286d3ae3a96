//! Mock SessionStore implementation for testing.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::interfaces::{Result, SessionStore, StorageError};
use crate::models::RedemptionRecord;

/// Mock session store that keeps records in memory, keyed by code.
///
/// Enforces the same uniqueness rules as the SQL tables: one record per
/// code and one per payment reference.
#[derive(Default)]
pub struct MockSessionStore {
    records: RwLock<HashMap<String, RedemptionRecord>>,
    fail_on_insert: RwLock<bool>,
    fail_on_get: RwLock<bool>,
}

impl MockSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_fail_on_insert(&self, fail: bool) {
        *self.fail_on_insert.write().await = fail;
    }

    pub async fn set_fail_on_get(&self, fail: bool) {
        *self.fail_on_get.write().await = fail;
    }

    /// Number of stored records.
    pub async fn stored_count(&self) -> usize {
        self.records.read().await.len()
    }

    /// Stored record for `code`, bypassing failure injection.
    pub async fn get_stored(&self, code: &str) -> Option<RedemptionRecord> {
        self.records.read().await.get(code).cloned()
    }
}

#[async_trait]
impl SessionStore for MockSessionStore {
    async fn insert(&self, record: &RedemptionRecord) -> Result<()> {
        if *self.fail_on_insert.read().await {
            return Err(StorageError::Unavailable("mock insert failure".to_string()));
        }

        let mut records = self.records.write().await;
        if records.contains_key(&record.code) {
            return Err(StorageError::Duplicate(format!(
                "code {} already exists",
                record.code
            )));
        }
        if records
            .values()
            .any(|r| r.payment_reference == record.payment_reference)
        {
            return Err(StorageError::Duplicate(format!(
                "payment reference {} already exists",
                record.payment_reference
            )));
        }

        records.insert(record.code.clone(), record.clone());
        Ok(())
    }

    async fn get_by_code(&self, code: &str) -> Result<Option<RedemptionRecord>> {
        if *self.fail_on_get.read().await {
            return Err(StorageError::Unavailable("mock get failure".to_string()));
        }
        Ok(self.records.read().await.get(code).cloned())
    }

    async fn mark_played(&self, code: &str, played_at: DateTime<Utc>) -> Result<bool> {
        let mut records = self.records.write().await;
        match records.get_mut(code) {
            Some(record) if !record.is_played => {
                record.is_played = true;
                record.played_at = Some(played_at);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
