//! Mock PricingCatalog implementation for testing.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::interfaces::{PricingCatalog, Result, StorageError};
use crate::models::{GameListing, PriceEntry};

/// Mock catalog built up front with the `with_*` builders.
#[derive(Default)]
pub struct MockPricingCatalog {
    games: RwLock<Vec<GameListing>>,
    prices: RwLock<Vec<PriceEntry>>,
    fail: RwLock<bool>,
}

impl MockPricingCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a displayable game.
    pub fn with_game(mut self, game_id: u16, name: &str) -> Self {
        self.games.get_mut().push(GameListing {
            game_id,
            name: name.to_string(),
            thumbnail: None,
        });
        self
    }

    /// Add a time price: `play_time` minutes for `price`.
    pub fn with_time_price(mut self, game_id: u16, play_time: u16, price: u16) -> Self {
        self.prices
            .get_mut()
            .push(PriceEntry::time(game_id, play_time, price));
        self
    }

    /// Add a level price: `levels` levels for `price`.
    pub fn with_level_price(mut self, game_id: u16, levels: u16, price: u16) -> Self {
        self.prices
            .get_mut()
            .push(PriceEntry::level(game_id, levels, price));
        self
    }

    /// Fail every query with `StorageError::Unavailable`.
    pub async fn set_fail(&self, fail: bool) {
        *self.fail.write().await = fail;
    }

    async fn check_available(&self) -> Result<()> {
        if *self.fail.read().await {
            return Err(StorageError::Unavailable("mock catalog offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl PricingCatalog for MockPricingCatalog {
    async fn query_pricing(&self, game_id: u16) -> Result<Vec<PriceEntry>> {
        self.check_available().await?;
        Ok(self
            .prices
            .read()
            .await
            .iter()
            .filter(|p| p.game_id == game_id)
            .copied()
            .collect())
    }

    async fn query_all_pricing(&self) -> Result<Vec<PriceEntry>> {
        self.check_available().await?;
        Ok(self.prices.read().await.clone())
    }

    async fn query_games_displayable(&self) -> Result<Vec<GameListing>> {
        self.check_available().await?;
        let mut games = self.games.read().await.clone();
        games.sort_by_key(|g| g.game_id);
        Ok(games)
    }
}
