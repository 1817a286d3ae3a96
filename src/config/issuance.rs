//! Code issuance and session rule configuration.

use std::time::Duration;

use serde::Deserialize;

use super::ConfigError;
use crate::code::{self, DEFAULT_COUNTER_KEY, DEFAULT_MAX_ATTEMPTS, DEFAULT_SEED_CODE};

/// Minimum session price, in currency units.
pub const DEFAULT_MIN_PRICE: u16 = 10;

/// Issuance configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IssuanceConfig {
    /// First code handed out. Its length fixes the code width.
    pub seed_code: String,
    /// Counter key in the shared store.
    pub counter_key: String,
    /// Sessions priced below this are rejected.
    pub min_price: u16,
    /// Compare-and-set attempts per issuance before giving up.
    pub max_attempts: u32,
    /// Optional bound on each counter store call, in milliseconds.
    pub counter_timeout_ms: Option<u64>,
}

impl Default for IssuanceConfig {
    fn default() -> Self {
        Self {
            seed_code: DEFAULT_SEED_CODE.to_string(),
            counter_key: DEFAULT_COUNTER_KEY.to_string(),
            min_price: DEFAULT_MIN_PRICE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            counter_timeout_ms: None,
        }
    }
}

impl IssuanceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !code::is_valid_code(&self.seed_code) {
            return Err(ConfigError::InvalidSeedCode(self.seed_code.clone()));
        }
        if self.counter_key.is_empty() {
            return Err(ConfigError::EmptyCounterKey);
        }
        Ok(())
    }

    pub fn counter_timeout(&self) -> Option<Duration> {
        self.counter_timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = IssuanceConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.counter_timeout().is_none());
    }

    #[test]
    fn test_rejects_seed_outside_alphabet() {
        let config = IssuanceConfig {
            seed_code: "ABC123".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSeedCode(_))
        ));
    }

    #[test]
    fn test_rejects_empty_counter_key() {
        let config = IssuanceConfig {
            counter_key: String::new(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyCounterKey)));
    }

    #[test]
    fn test_counter_timeout() {
        let config = IssuanceConfig {
            counter_timeout_ms: Some(250),
            ..Default::default()
        };
        assert_eq!(config.counter_timeout(), Some(Duration::from_millis(250)));
    }
}
