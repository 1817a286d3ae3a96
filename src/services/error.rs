//! Error taxonomy surfaced by the orchestrator.

use super::ledger::LedgerError;
use super::validator::ValidationError;
use crate::code::GeneratorError;
use crate::interfaces::StorageError;
use crate::validation::PrecheckError;

/// Result type for orchestrator operations.
pub type Result<T> = std::result::Result<T, ArcadeError>;

/// Classified failure of an orchestrator operation.
///
/// Component errors are folded into one of five classes. Only `Internal`
/// is worth retrying; every other class is a final answer for the request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArcadeError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Code {0} has already been used")]
    AlreadyConsumed(String),

    /// Store or counter failure. `code` is set when a code was issued but
    /// could not be persisted, so an operator can recover it by hand.
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        code: Option<String>,
    },
}

impl ArcadeError {
    pub fn internal(message: impl Into<String>) -> Self {
        ArcadeError::Internal {
            message: message.into(),
            code: None,
        }
    }

    /// True if the same request may succeed when retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ArcadeError::Internal { .. })
    }
}

impl From<PrecheckError> for ArcadeError {
    fn from(err: PrecheckError) -> Self {
        ArcadeError::Validation(err.to_string())
    }
}

impl From<ValidationError> for ArcadeError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::Catalog { .. } => ArcadeError::internal(err.to_string()),
            mismatch => ArcadeError::Validation(mismatch.to_string()),
        }
    }
}

impl From<GeneratorError> for ArcadeError {
    fn from(err: GeneratorError) -> Self {
        match err {
            GeneratorError::InvalidCode(_) => ArcadeError::Validation(err.to_string()),
            other => ArcadeError::internal(other.to_string()),
        }
    }
}

impl From<LedgerError> for ArcadeError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::NotFound(code) => ArcadeError::NotFound(format!("code {code}")),
            LedgerError::AlreadyPlayed(code) => ArcadeError::AlreadyConsumed(code),
            LedgerError::Storage { .. } => ArcadeError::internal(err.to_string()),
        }
    }
}

impl From<StorageError> for ArcadeError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Duplicate(detail) => ArcadeError::Conflict(detail),
            other => ArcadeError::internal(other.to_string()),
        }
    }
}
