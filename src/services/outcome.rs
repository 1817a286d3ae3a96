//! Outcomes of registration, persistence and code lookup.

use super::error::ArcadeError;
use super::ledger::CodeStatus;
use crate::validation::PrecheckError;

/// Why a registration was refused. Refusals are final; retrying the same
/// request gives the same answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    Precheck(PrecheckError),
    TimePriceMismatch {
        game_id: u16,
        price: u16,
        play_time: u16,
    },
    LevelPriceMismatch {
        game_id: u16,
        price: u16,
        levels: Option<u16>,
    },
    /// The code or payment reference is already in the ledger.
    Conflict {
        code: String,
        payment_reference: String,
    },
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::Precheck(err) => write!(f, "{err}"),
            RejectReason::TimePriceMismatch { .. } => {
                f.write_str("wrong combination of price and time provided")
            }
            RejectReason::LevelPriceMismatch { .. } => {
                f.write_str("wrong combination of price and levels provided")
            }
            RejectReason::Conflict {
                code,
                payment_reference,
            } => write!(
                f,
                "code {code} or payment reference {payment_reference} already used"
            ),
        }
    }
}

/// Result of `register_session`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    Registered { code: String },
    Rejected(RejectReason),
    /// Store or counter failure. `code` is kept when one was issued but not
    /// persisted.
    Failed {
        code: Option<String>,
        reason: String,
    },
}

impl Registration {
    pub fn code(&self) -> Option<&str> {
        match self {
            Registration::Registered { code } => Some(code),
            Registration::Failed { code, .. } => code.as_deref(),
            Registration::Rejected(_) => None,
        }
    }

    /// True if the same request may succeed when retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Registration::Failed { .. })
    }

    /// Collapse into the error taxonomy.
    pub fn into_result(self) -> Result<String, ArcadeError> {
        match self {
            Registration::Registered { code } => Ok(code),
            Registration::Rejected(reason @ RejectReason::Conflict { .. }) => {
                Err(ArcadeError::Conflict(reason.to_string()))
            }
            Registration::Rejected(reason) => Err(ArcadeError::Validation(reason.to_string())),
            Registration::Failed { code, reason } => Err(ArcadeError::Internal {
                message: reason,
                code,
            }),
        }
    }
}

/// Result of persisting a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved { code: String },
    DuplicateKey,
    CatalogMismatchTime,
    CatalogMismatchLevel,
    InternalError { code: String, message: String },
}

/// Flattened answer to "can this code be played?", for console callers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeCheck {
    pub usable: bool,
    pub reason: Option<String>,
    pub play_time: Option<u16>,
    pub levels: Option<u16>,
}

impl From<Result<CodeStatus, ArcadeError>> for CodeCheck {
    fn from(result: Result<CodeStatus, ArcadeError>) -> Self {
        match result {
            Ok(status) => CodeCheck {
                usable: true,
                reason: None,
                play_time: status.play_time,
                levels: status.levels,
            },
            Err(err) => CodeCheck {
                usable: false,
                reason: Some(err.to_string()),
                ..Default::default()
            },
        }
    }
}

/// Result of redeeming a code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redemption {
    /// This call consumed the code.
    Redeemed(CodeStatus),
    /// The code was consumed earlier. Nothing changed.
    AlreadyRedeemed,
}
