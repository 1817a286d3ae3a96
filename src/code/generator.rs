//! Sequential code issuance over the shared counter.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::{is_valid_code, next_code, DEFAULT_SEED_CODE};
use crate::config::IssuanceConfig;
use crate::interfaces::{CounterStore, StorageError};

/// Default counter key, shared with existing deployments.
pub const DEFAULT_COUNTER_KEY: &str = "latest_arcade_code";

/// Default bound on compare-and-set retries per issuance.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 16;

/// Errors that can occur while issuing a code.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("Counter store failed while {operation}: {source}")]
    Store {
        operation: &'static str,
        #[source]
        source: StorageError,
    },

    #[error("Counter kept moving, gave up after {attempts} attempts")]
    Contention { attempts: u32 },

    #[error("Invalid code '{0}': must use only A, B, O, S, X, Y")]
    InvalidCode(String),
}

/// Issues codes by advancing the shared counter one tick at a time.
///
/// The counter is never cached in process: every issuance reads the store
/// and advances it with compare-and-set, so two callers (in this process or
/// any other) cannot be handed the same code.
pub struct CodeGenerator {
    store: Arc<dyn CounterStore>,
    key: String,
    seed: String,
    max_attempts: u32,
    timeout: Option<Duration>,
}

impl CodeGenerator {
    /// Create a generator with default key, seed and retry bound.
    pub fn new(store: Arc<dyn CounterStore>) -> Self {
        Self {
            store,
            key: DEFAULT_COUNTER_KEY.to_string(),
            seed: DEFAULT_SEED_CODE.to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            timeout: None,
        }
    }

    /// Create a generator from issuance configuration.
    pub fn from_config(store: Arc<dyn CounterStore>, config: &IssuanceConfig) -> Self {
        Self {
            store,
            key: config.counter_key.clone(),
            seed: config.seed_code.clone(),
            max_attempts: config.max_attempts.max(1),
            timeout: config.counter_timeout(),
        }
    }

    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = seed.into();
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The code handed out on first use.
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Issue the next code.
    ///
    /// First use seeds the counter and returns the seed. Afterwards the
    /// stored code is advanced by one tick and the new value is returned.
    pub async fn generate_code(&self) -> Result<String, GeneratorError> {
        for attempt in 1..=self.max_attempts {
            let current = self
                .guarded("reading counter", self.store.get(&self.key))
                .await?;

            match current {
                None => {
                    let seeded = self
                        .guarded(
                            "seeding counter",
                            self.store.set_if_absent(&self.key, &self.seed),
                        )
                        .await?;
                    if seeded {
                        info!(key = %self.key, code = %self.seed, "Seeded code counter");
                        return Ok(self.seed.clone());
                    }
                }
                Some(current) => {
                    let next = next_code(&current);
                    let advanced = self
                        .guarded(
                            "advancing counter",
                            self.store.compare_and_set(&self.key, &current, &next),
                        )
                        .await?;
                    if advanced {
                        debug!(key = %self.key, previous = %current, code = %next, "Issued code");
                        return Ok(next);
                    }
                }
            }

            debug!(key = %self.key, attempt, "Counter moved during issuance, retrying");
        }

        warn!(
            key = %self.key,
            attempts = self.max_attempts,
            "Giving up on code issuance under contention"
        );
        Err(GeneratorError::Contention {
            attempts: self.max_attempts,
        })
    }

    /// The latest issued code, if any.
    pub async fn current(&self) -> Result<Option<String>, GeneratorError> {
        self.guarded("reading counter", self.store.get(&self.key))
            .await
    }

    /// Overwrite the counter. The next issuance returns the successor of `code`.
    pub async fn reset(&self, code: &str) -> Result<(), GeneratorError> {
        if !is_valid_code(code) || code.chars().count() != self.seed.chars().count() {
            return Err(GeneratorError::InvalidCode(code.to_string()));
        }
        self.guarded("resetting counter", self.store.set(&self.key, code))
            .await?;
        warn!(key = %self.key, code = %code, "Code counter reset by operator");
        Ok(())
    }

    /// Run a store call, applying the optional timeout and operation context.
    async fn guarded<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = crate::interfaces::Result<T>>,
    ) -> Result<T, GeneratorError> {
        let result = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => Err(StorageError::Timeout(limit)),
            },
            None => call.await,
        };
        result.map_err(|source| GeneratorError::Store { operation, source })
    }
}
