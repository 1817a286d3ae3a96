//! PricingCatalog trait definition.

use async_trait::async_trait;

use super::Result;
use crate::models::{GameListing, PriceEntry};

/// Read-only view of the game catalog.
///
/// Catalog administration owns the data; this crate only reads it.
///
/// # Implementations
///
/// - `SqlitePricingCatalog`: SQLite storage
/// - `PostgresPricingCatalog`: PostgreSQL storage
/// - `MockPricingCatalog`: In-memory mock for testing
#[async_trait]
pub trait PricingCatalog: Send + Sync {
    /// All price entries (both kinds) for one game.
    async fn query_pricing(&self, game_id: u16) -> Result<Vec<PriceEntry>>;

    /// Every price entry in the catalog.
    async fn query_all_pricing(&self) -> Result<Vec<PriceEntry>>;

    /// Games that may be shown to users, ordered by id.
    async fn query_games_displayable(&self) -> Result<Vec<GameListing>>;
}
