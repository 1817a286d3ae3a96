//! Purchased play sessions and their ledger records.

use chrono::{DateTime, Utc};

/// A request to register one purchased unit of play.
///
/// `code` is empty on input and assigned during registration.
/// Exactly one of `play_time` / `levels` is meaningful, selected by `is_timed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    pub code: String,
    /// Display name, denormalized from the catalog. Not authoritative.
    pub name: String,
    pub game_id: u16,
    pub is_timed: bool,
    pub price: u16,
    /// Purchased minutes for timed sessions.
    pub play_time: Option<u16>,
    /// Purchased level count for level-bounded sessions.
    pub levels: Option<u16>,
    pub timestamp: DateTime<Utc>,
    pub is_played: bool,
    /// Payment provider identifier. One session per reference.
    pub payment_reference: String,
}

impl GameSession {
    /// A time-bounded session request.
    pub fn timed(
        game_id: u16,
        name: impl Into<String>,
        price: u16,
        play_time: u16,
        payment_reference: impl Into<String>,
    ) -> Self {
        Self {
            code: String::new(),
            name: name.into(),
            game_id,
            is_timed: true,
            price,
            play_time: Some(play_time),
            levels: None,
            timestamp: Utc::now(),
            is_played: false,
            payment_reference: payment_reference.into(),
        }
    }

    /// A level-bounded session request.
    pub fn levelled(
        game_id: u16,
        name: impl Into<String>,
        price: u16,
        levels: u16,
        payment_reference: impl Into<String>,
    ) -> Self {
        Self {
            code: String::new(),
            name: name.into(),
            game_id,
            is_timed: false,
            price,
            play_time: None,
            levels: Some(levels),
            timestamp: Utc::now(),
            is_played: false,
            payment_reference: payment_reference.into(),
        }
    }

    /// Attach the issued code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }
}

/// Ledger entry for an issued code.
///
/// Created unplayed on registration. `is_played` flips to true at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedemptionRecord {
    pub code: String,
    pub game_id: u16,
    pub name: String,
    pub price: u16,
    pub play_time: Option<u16>,
    pub levels: Option<u16>,
    pub payment_reference: String,
    pub is_played: bool,
    pub issued_at: DateTime<Utc>,
    pub played_at: Option<DateTime<Utc>>,
}

impl RedemptionRecord {
    /// Build the unplayed record for a session that already carries its code.
    pub fn issued(session: &GameSession) -> Self {
        Self {
            code: session.code.clone(),
            game_id: session.game_id,
            name: session.name.clone(),
            price: session.price,
            play_time: session.play_time,
            levels: session.levels,
            payment_reference: session.payment_reference.clone(),
            is_played: false,
            issued_at: session.timestamp,
            played_at: None,
        }
    }
}
