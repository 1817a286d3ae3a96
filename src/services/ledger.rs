//! Persistent record of issued codes and their redemption state.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use super::outcome::{Redemption, SaveOutcome};
use crate::interfaces::{SessionStore, StorageError};
use crate::models::{GameSession, RedemptionRecord};

/// Errors from code lookup and redemption.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Code {0} was never issued")]
    NotFound(String),

    #[error("Code {0} has already been played")]
    AlreadyPlayed(String),

    #[error("Ledger store failed while {operation}: {source}")]
    Storage {
        operation: &'static str,
        #[source]
        source: StorageError,
    },
}

/// What an unplayed code entitles the holder to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeStatus {
    pub code: String,
    pub game_id: u16,
    pub name: String,
    pub play_time: Option<u16>,
    pub levels: Option<u16>,
}

impl From<&RedemptionRecord> for CodeStatus {
    fn from(record: &RedemptionRecord) -> Self {
        Self {
            code: record.code.clone(),
            game_id: record.game_id,
            name: record.name.clone(),
            play_time: record.play_time,
            levels: record.levels,
        }
    }
}

/// Records issued sessions and consumes them at most once.
pub struct RedemptionLedger {
    sessions: Arc<dyn SessionStore>,
}

impl RedemptionLedger {
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self { sessions }
    }

    /// Persist a session that already carries its code, unplayed.
    pub async fn save_session(&self, session: &GameSession) -> SaveOutcome {
        if session.code.is_empty() {
            error!(
                payment_reference = %session.payment_reference,
                "Refusing to persist session without a code"
            );
            return SaveOutcome::InternalError {
                code: String::new(),
                message: "session has no code".to_string(),
            };
        }

        let record = RedemptionRecord::issued(session);
        match self.sessions.insert(&record).await {
            Ok(()) => {
                info!(code = %record.code, game_id = record.game_id, "Session saved");
                SaveOutcome::Saved { code: record.code }
            }
            Err(e) if e.is_duplicate() => {
                warn!(
                    code = %record.code,
                    payment_reference = %record.payment_reference,
                    error = %e,
                    "Session already recorded"
                );
                SaveOutcome::DuplicateKey
            }
            Err(e) => {
                error!(code = %record.code, error = %e, "Failed to save session");
                SaveOutcome::InternalError {
                    code: record.code,
                    message: e.to_string(),
                }
            }
        }
    }

    /// Look up an unplayed code.
    pub async fn check_code(&self, code: &str) -> Result<CodeStatus, LedgerError> {
        let record = self.load(code).await?;
        if record.is_played {
            return Err(LedgerError::AlreadyPlayed(record.code));
        }
        Ok(CodeStatus::from(&record))
    }

    /// Consume a code. Redeeming a played code is a no-op.
    pub async fn redeem(&self, code: &str) -> Result<Redemption, LedgerError> {
        let record = self.load(code).await?;
        if record.is_played {
            info!(code = %code, "Code already redeemed");
            return Ok(Redemption::AlreadyRedeemed);
        }

        let flipped = self
            .sessions
            .mark_played(code, Utc::now())
            .await
            .map_err(|source| LedgerError::Storage {
                operation: "marking code played",
                source,
            })?;

        if flipped {
            info!(code = %code, game_id = record.game_id, "Code redeemed");
            Ok(Redemption::Redeemed(CodeStatus::from(&record)))
        } else {
            // Another console redeemed it between our read and write.
            info!(code = %code, "Code redeemed concurrently");
            Ok(Redemption::AlreadyRedeemed)
        }
    }

    async fn load(&self, code: &str) -> Result<RedemptionRecord, LedgerError> {
        self.sessions
            .get_by_code(code)
            .await
            .map_err(|source| LedgerError::Storage {
                operation: "reading session",
                source,
            })?
            .ok_or_else(|| LedgerError::NotFound(code.to_string()))
    }
}
