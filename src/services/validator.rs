//! Catalog agreement checks for session requests.

use std::sync::Arc;

use tracing::debug;

use crate::interfaces::{PricingCatalog, StorageError};
use crate::models::{GameSession, PricingKind};

/// A session whose price does not appear in the catalog, or a catalog
/// that could not be read.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("wrong combination of price and time provided")]
    TimePriceMismatch {
        game_id: u16,
        price: u16,
        play_time: u16,
    },

    #[error("wrong combination of price and levels provided")]
    LevelPriceMismatch {
        game_id: u16,
        price: u16,
        levels: Option<u16>,
    },

    #[error("Failed to read pricing for game {game_id}: {source}")]
    Catalog {
        game_id: u16,
        #[source]
        source: StorageError,
    },
}

/// Checks a requested (label, price) pair against the catalog.
pub struct SessionValidator {
    catalog: Arc<dyn PricingCatalog>,
}

impl SessionValidator {
    pub fn new(catalog: Arc<dyn PricingCatalog>) -> Self {
        Self { catalog }
    }

    /// Ok iff the catalog lists `play_time` minutes at `price` for the game.
    pub async fn validate_time_and_price(
        &self,
        game_id: u16,
        price: u16,
        play_time: u16,
    ) -> Result<(), ValidationError> {
        if self.listed(game_id, PricingKind::Time, play_time, price).await? {
            return Ok(());
        }
        Err(ValidationError::TimePriceMismatch {
            game_id,
            price,
            play_time,
        })
    }

    /// Ok iff the catalog lists `levels` levels at `price` for the game.
    pub async fn validate_levels_and_price(
        &self,
        game_id: u16,
        price: u16,
        levels: u16,
    ) -> Result<(), ValidationError> {
        if self.listed(game_id, PricingKind::Level, levels, price).await? {
            return Ok(());
        }
        Err(ValidationError::LevelPriceMismatch {
            game_id,
            price,
            levels: Some(levels),
        })
    }

    /// Validate a session against the table its `is_timed` flag selects.
    ///
    /// A timed session without a play time falls through to the level
    /// table, and a missing level count never matches.
    pub async fn validate_session(&self, session: &GameSession) -> Result<(), ValidationError> {
        match (session.is_timed, session.play_time) {
            (true, Some(play_time)) => {
                self.validate_time_and_price(session.game_id, session.price, play_time)
                    .await
            }
            _ => match session.levels {
                Some(levels) => {
                    self.validate_levels_and_price(session.game_id, session.price, levels)
                        .await
                }
                None => Err(ValidationError::LevelPriceMismatch {
                    game_id: session.game_id,
                    price: session.price,
                    levels: None,
                }),
            },
        }
    }

    async fn listed(
        &self,
        game_id: u16,
        kind: PricingKind,
        label: u16,
        price: u16,
    ) -> Result<bool, ValidationError> {
        let entries = self
            .catalog
            .query_pricing(game_id)
            .await
            .map_err(|source| ValidationError::Catalog { game_id, source })?;

        let found = entries.iter().any(|e| e.matches(kind, label, price));
        debug!(game_id, %kind, label, price, found, "Catalog lookup");
        Ok(found)
    }
}
