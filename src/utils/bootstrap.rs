//! Bootstrap utilities for arcade-pass binaries.

use std::future::Future;
use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LOG_ENV_VAR;

/// Initialize tracing with the ARCADE_LOG environment variable.
///
/// Defaults to "info" level if ARCADE_LOG is not set.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env(LOG_ENV_VAR)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Retry policy for startup connections.
#[derive(Debug, Clone, Copy)]
pub struct ConnectRetry {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for ConnectRetry {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl ConnectRetry {
    /// Exponential backoff with jitter. `max_attempts` counts the first try.
    pub fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.initial_delay)
            .with_max_delay(self.max_delay)
            .with_max_times(self.max_attempts.max(1) as usize - 1)
            .with_jitter()
    }
}

/// Connect to a backing store with exponential backoff.
///
/// # Arguments
/// * `store_name` - Human-readable name for logging (e.g., "ledger", "counter")
/// * `policy` - Attempt bound and delays
/// * `connect` - Async function that attempts to establish a connection
///
/// # Returns
/// The connected store on success, or the last error after max attempts.
pub async fn connect_with_retry<T, E, F, Fut>(
    store_name: &str,
    policy: ConnectRetry,
    connect: F,
) -> Result<T, E>
where
    E: std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let result = connect
        .retry(policy.backoff())
        .notify(|err: &E, delay: Duration| {
            warn!(store = store_name, error = %err, delay = ?delay, "Connection failed, retrying");
        })
        .await;

    match &result {
        Ok(_) => tracing::info!(store = store_name, "Connected"),
        Err(e) => tracing::error!(
            store = store_name,
            attempts = policy.max_attempts.max(1),
            error = %e,
            "Giving up on connection"
        ),
    }
    result
}
