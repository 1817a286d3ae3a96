//! Session orchestrator: the entry point for registration and redemption.
//!
//! Composes the pre-checks, the session validator, the code generator and
//! the redemption ledger. Each call runs on the caller's task; nothing is
//! cached between calls.

use std::sync::Arc;

use tracing::{error, info, warn};

use super::error::{ArcadeError, Result};
use super::ledger::{CodeStatus, LedgerError, RedemptionLedger};
use super::outcome::{CodeCheck, Redemption, Registration, RejectReason, SaveOutcome};
use super::validator::{SessionValidator, ValidationError};
use crate::code::CodeGenerator;
use crate::config::IssuanceConfig;
use crate::interfaces::{CounterStore, PricingCatalog, SessionStore};
use crate::models::{GameSession, GameWithPricing, PriceMap};
use crate::validation;

/// Registers purchased sessions and answers console code queries.
pub struct SessionOrchestrator {
    catalog: Arc<dyn PricingCatalog>,
    validator: SessionValidator,
    generator: CodeGenerator,
    ledger: RedemptionLedger,
    min_price: u16,
}

impl SessionOrchestrator {
    pub fn new(
        catalog: Arc<dyn PricingCatalog>,
        sessions: Arc<dyn SessionStore>,
        counter: Arc<dyn CounterStore>,
        config: &IssuanceConfig,
    ) -> Self {
        Self {
            validator: SessionValidator::new(Arc::clone(&catalog)),
            catalog,
            generator: CodeGenerator::from_config(counter, config),
            ledger: RedemptionLedger::new(sessions),
            min_price: config.min_price,
        }
    }

    /// Register a purchased session and issue its code.
    ///
    /// Pre-checks and catalog validation run before a code is issued, so a
    /// rejected request consumes no code and persists nothing. Any code the
    /// caller put on `session` is replaced.
    #[tracing::instrument(
        name = "orchestrator.register",
        skip_all,
        fields(game_id = session.game_id, payment_reference = %session.payment_reference)
    )]
    pub async fn register_session(&self, mut session: GameSession) -> Registration {
        info!(price = session.price, is_timed = session.is_timed, "Registration received");

        if let Err(e) = validation::validate_session(&session, self.min_price) {
            warn!(error = %e, "Registration failed pre-checks");
            return Registration::Rejected(RejectReason::Precheck(e));
        }

        match self.validator.validate_session(&session).await {
            Ok(()) => {}
            Err(ValidationError::TimePriceMismatch {
                game_id,
                price,
                play_time,
            }) => {
                warn!(price, play_time, "Time and price not in catalog");
                return Registration::Rejected(RejectReason::TimePriceMismatch {
                    game_id,
                    price,
                    play_time,
                });
            }
            Err(ValidationError::LevelPriceMismatch {
                game_id,
                price,
                levels,
            }) => {
                warn!(price, ?levels, "Levels and price not in catalog");
                return Registration::Rejected(RejectReason::LevelPriceMismatch {
                    game_id,
                    price,
                    levels,
                });
            }
            Err(e @ ValidationError::Catalog { .. }) => {
                error!(error = %e, "Catalog unavailable during registration");
                return Registration::Failed {
                    code: None,
                    reason: e.to_string(),
                };
            }
        }

        let code = match self.generator.generate_code().await {
            Ok(code) => code,
            Err(e) => {
                error!(error = %e, "Code issuance failed");
                return Registration::Failed {
                    code: None,
                    reason: e.to_string(),
                };
            }
        };

        session.code = code.clone();
        session.is_played = false;

        match self.ledger.save_session(&session).await {
            SaveOutcome::Saved { code } => {
                info!(code = %code, "Session registered");
                Registration::Registered { code }
            }
            SaveOutcome::DuplicateKey => Registration::Rejected(RejectReason::Conflict {
                code,
                payment_reference: session.payment_reference,
            }),
            SaveOutcome::InternalError { message, .. } => {
                // The code is spent; hand it back so the purchase can be
                // recovered by hand.
                error!(code = %code, "Issued code could not be persisted");
                Registration::Failed {
                    code: Some(code),
                    reason: message,
                }
            }
            SaveOutcome::CatalogMismatchTime | SaveOutcome::CatalogMismatchLevel => {
                Registration::Failed {
                    code: Some(code),
                    reason: "ledger reported a catalog mismatch".to_string(),
                }
            }
        }
    }

    /// Validate, issue and persist without pre-checks.
    ///
    /// Returns the five-way outcome used by older callers. Prefer
    /// [`register_session`](Self::register_session).
    #[tracing::instrument(name = "orchestrator.save", skip_all, fields(game_id = session.game_id))]
    pub async fn save_session(&self, mut session: GameSession) -> SaveOutcome {
        match self.validator.validate_session(&session).await {
            Ok(()) => {}
            Err(ValidationError::TimePriceMismatch { .. }) => {
                return SaveOutcome::CatalogMismatchTime
            }
            Err(ValidationError::LevelPriceMismatch { .. }) => {
                return SaveOutcome::CatalogMismatchLevel
            }
            Err(e @ ValidationError::Catalog { .. }) => {
                error!(error = %e, "Catalog unavailable during save");
                return SaveOutcome::InternalError {
                    code: String::new(),
                    message: e.to_string(),
                };
            }
        }

        session.code = match self.generator.generate_code().await {
            Ok(code) => code,
            Err(e) => {
                error!(error = %e, "Code issuance failed");
                return SaveOutcome::InternalError {
                    code: String::new(),
                    message: e.to_string(),
                };
            }
        };
        session.is_played = false;

        self.ledger.save_session(&session).await
    }

    /// Look up what an unplayed code entitles the holder to. Does not redeem.
    #[tracing::instrument(name = "orchestrator.check", skip_all, fields(code = %code))]
    pub async fn check_code(&self, code: &str) -> Result<CodeStatus> {
        precheck_lookup(code)?;
        let status = self.ledger.check_code(code).await?;
        info!(game_id = status.game_id, "Code verified");
        Ok(status)
    }

    /// [`check_code`](Self::check_code) flattened for console callers.
    pub async fn check_game_code(&self, code: &str) -> CodeCheck {
        CodeCheck::from(self.check_code(code).await)
    }

    /// Consume a code at the console. Idempotent.
    #[tracing::instrument(name = "orchestrator.redeem", skip_all, fields(code = %code))]
    pub async fn redeem_code(&self, code: &str) -> Result<Redemption> {
        precheck_lookup(code)?;
        Ok(self.ledger.redeem(code).await?)
    }

    /// Displayable games, each with the prices of one table.
    ///
    /// A game with any time prices lists only those; otherwise it lists its
    /// level prices.
    #[tracing::instrument(name = "orchestrator.games", skip_all)]
    pub async fn list_games_with_pricing(&self) -> Result<Vec<GameWithPricing>> {
        let games = self.catalog.query_games_displayable().await?;
        let prices = PriceMap::from_entries(self.catalog.query_all_pricing().await?);

        Ok(games
            .into_iter()
            .map(|game| GameWithPricing {
                pricing: prices.pricing_for(game.game_id),
                game_id: game.game_id,
                name: game.name,
                thumbnail: game.thumbnail,
            })
            .collect())
    }

    pub async fn get_games(&self) -> Result<Vec<GameWithPricing>> {
        self.list_games_with_pricing().await
    }

    /// Issue a code without registering a session. Operator use.
    pub async fn generate_code(&self) -> Result<String> {
        Ok(self.generator.generate_code().await?)
    }

    /// The latest issued code, if any.
    pub async fn current_code(&self) -> Result<Option<String>> {
        Ok(self.generator.current().await?)
    }

    /// Overwrite the code counter. Operator use.
    pub async fn reset_counter(&self, code: &str) -> Result<()> {
        self.generator.reset(code).await.map_err(ArcadeError::from)
    }
}

/// An empty code is a bad request. A code with symbols outside the alphabet
/// was never issued, so it is reported the same way as any unknown code.
fn precheck_lookup(code: &str) -> Result<()> {
    match validation::validate_code(code) {
        Err(validation::PrecheckError::InvalidCode(code)) => {
            Err(LedgerError::NotFound(code).into())
        }
        other => other.map_err(ArcadeError::from),
    }
}
