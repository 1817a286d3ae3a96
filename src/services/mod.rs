//! Issuance and redemption services.
//!
//! `SessionOrchestrator` is the public entry point. The validator and
//! ledger are exposed for callers that need one step on its own.

mod error;
mod ledger;
mod orchestrator;
mod outcome;
mod validator;

pub use error::{ArcadeError, Result};
pub use ledger::{CodeStatus, LedgerError, RedemptionLedger};
pub use orchestrator::SessionOrchestrator;
pub use outcome::{CodeCheck, Redemption, Registration, RejectReason, SaveOutcome};
pub use validator::{SessionValidator, ValidationError};
