//! Domain types shared by the issuance and redemption services.

mod catalog;
mod session;

pub use catalog::{
    GameListing, GamePricing, GameWithPricing, LevelPrice, PriceEntry, PriceMap, PricingKind,
    TimePrice, UnknownPricingKind,
};
pub use session::{GameSession, RedemptionRecord};
