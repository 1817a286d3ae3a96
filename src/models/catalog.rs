//! Catalog pricing types.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Which price table an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PricingKind {
    /// Label is a minute count.
    Time,
    /// Label is a level count.
    Level,
}

impl PricingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingKind::Time => "time",
            PricingKind::Level => "level",
        }
    }
}

impl fmt::Display for PricingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown pricing kind: {0}")]
pub struct UnknownPricingKind(pub String);

impl FromStr for PricingKind {
    type Err = UnknownPricingKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "time" => Ok(PricingKind::Time),
            "level" => Ok(PricingKind::Level),
            other => Err(UnknownPricingKind(other.to_string())),
        }
    }
}

/// One row of the pricing catalog: `(game, kind, label, price)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PriceEntry {
    pub game_id: u16,
    pub kind: PricingKind,
    pub label: u16,
    pub price: u16,
}

impl PriceEntry {
    pub fn time(game_id: u16, minutes: u16, price: u16) -> Self {
        Self {
            game_id,
            kind: PricingKind::Time,
            label: minutes,
            price,
        }
    }

    pub fn level(game_id: u16, levels: u16, price: u16) -> Self {
        Self {
            game_id,
            kind: PricingKind::Level,
            label: levels,
            price,
        }
    }

    /// True if this entry is exactly `(kind, label, price)`.
    pub fn matches(&self, kind: PricingKind, label: u16, price: u16) -> bool {
        self.kind == kind && self.label == label && self.price == price
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimePrice {
    pub time: u16,
    pub price: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelPrice {
    pub level: u16,
    pub price: u16,
}

/// Prices attached to a listed game. At most one of the lists is populated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GamePricing {
    pub by_time: Vec<TimePrice>,
    pub by_level: Vec<LevelPrice>,
}

/// A game the catalog allows users to see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameListing {
    pub game_id: u16,
    pub name: String,
    pub thumbnail: Option<String>,
}

/// A listed game joined with its prices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameWithPricing {
    pub game_id: u16,
    pub name: String,
    pub thumbnail: Option<String>,
    pub pricing: GamePricing,
}

/// Catalog prices grouped per game and kind.
#[derive(Debug, Clone, Default)]
pub struct PriceMap {
    time: HashMap<u16, Vec<TimePrice>>,
    level: HashMap<u16, Vec<LevelPrice>>,
}

impl PriceMap {
    pub fn from_entries(entries: impl IntoIterator<Item = PriceEntry>) -> Self {
        let mut map = Self::default();
        for entry in entries {
            match entry.kind {
                PricingKind::Time => map.time.entry(entry.game_id).or_default().push(TimePrice {
                    time: entry.label,
                    price: entry.price,
                }),
                PricingKind::Level => map.level.entry(entry.game_id).or_default().push(LevelPrice {
                    level: entry.label,
                    price: entry.price,
                }),
            }
        }
        map
    }

    /// Pricing for one game. Time prices win; level prices are only
    /// attached when the game has no time prices at all.
    pub fn pricing_for(&self, game_id: u16) -> GamePricing {
        match self.time.get(&game_id) {
            Some(by_time) if !by_time.is_empty() => GamePricing {
                by_time: by_time.clone(),
                by_level: Vec::new(),
            },
            _ => GamePricing {
                by_time: Vec::new(),
                by_level: self.level.get(&game_id).cloned().unwrap_or_default(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_kind_round_trips_through_str() {
        assert_eq!("time".parse::<PricingKind>().unwrap(), PricingKind::Time);
        assert_eq!("level".parse::<PricingKind>().unwrap(), PricingKind::Level);
        assert_eq!(
            "credits".parse::<PricingKind>(),
            Err(UnknownPricingKind("credits".to_string()))
        );
    }

    #[test]
    fn test_price_map_prefers_time_table() {
        let map = PriceMap::from_entries([
            PriceEntry::time(1, 30, 50),
            PriceEntry::time(1, 60, 90),
            PriceEntry::level(1, 3, 20),
            PriceEntry::level(2, 5, 40),
        ]);

        let first = map.pricing_for(1);
        assert_eq!(first.by_time.len(), 2);
        assert!(first.by_level.is_empty());

        let second = map.pricing_for(2);
        assert!(second.by_time.is_empty());
        assert_eq!(second.by_level, vec![LevelPrice { level: 5, price: 40 }]);
    }

    #[test]
    fn test_price_map_unknown_game_is_empty() {
        let map = PriceMap::from_entries([PriceEntry::time(1, 30, 50)]);
        assert_eq!(map.pricing_for(9), GamePricing::default());
    }
}
