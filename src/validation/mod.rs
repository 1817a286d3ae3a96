//! Input pre-checks for session registration and code lookup.
//!
//! These run before any catalog lookup or code issuance. They only inspect
//! the request itself; catalog agreement is checked by the session
//! validator.

use crate::code;
use crate::models::GameSession;

/// Error constants for validation failures.
pub mod errmsg {
    pub const GAME_ID_INVALID: &str = "gameId not valid";
    pub const PAYMENT_REFERENCE_EMPTY: &str = "payment reference cannot be empty";
    pub const PRICE_BELOW_MINIMUM: &str = "price below minimum";
    pub const DURATION_MISSING: &str = "either play time or levels must be provided";
    pub const CODE_EMPTY: &str = "code not provided";
    pub const CODE_INVALID_CHARS: &str = "code contains invalid characters (allowed: A, B, O, S, X, Y)";
}

/// A request that failed pre-checks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrecheckError {
    #[error("{}", errmsg::GAME_ID_INVALID)]
    InvalidGameId,

    #[error("{}", errmsg::PAYMENT_REFERENCE_EMPTY)]
    MissingPaymentReference,

    #[error("{} (minimum: {minimum}, got: {price})", errmsg::PRICE_BELOW_MINIMUM)]
    PriceBelowMinimum { price: u16, minimum: u16 },

    #[error("{}", errmsg::DURATION_MISSING)]
    MissingTimeAndLevels,

    #[error("{}", errmsg::CODE_EMPTY)]
    EmptyCode,

    #[error("{}: {}", errmsg::CODE_INVALID_CHARS, .0)]
    InvalidCode(String),
}

pub fn validate_game_id(game_id: u16) -> Result<(), PrecheckError> {
    if game_id == 0 {
        return Err(PrecheckError::InvalidGameId);
    }
    Ok(())
}

pub fn validate_payment_reference(reference: &str) -> Result<(), PrecheckError> {
    if reference.trim().is_empty() {
        return Err(PrecheckError::MissingPaymentReference);
    }
    Ok(())
}

pub fn validate_price(price: u16, minimum: u16) -> Result<(), PrecheckError> {
    if price < minimum {
        return Err(PrecheckError::PriceBelowMinimum { price, minimum });
    }
    Ok(())
}

/// At least one of play time or level count must be present.
pub fn validate_duration(play_time: Option<u16>, levels: Option<u16>) -> Result<(), PrecheckError> {
    if play_time.is_none() && levels.is_none() {
        return Err(PrecheckError::MissingTimeAndLevels);
    }
    Ok(())
}

/// Run every registration pre-check. First failure wins, in this order:
/// game id, payment reference, price, duration.
///
/// `session.code` is not checked; registration assigns it.
pub fn validate_session(session: &GameSession, min_price: u16) -> Result<(), PrecheckError> {
    validate_game_id(session.game_id)?;
    validate_payment_reference(&session.payment_reference)?;
    validate_price(session.price, min_price)?;
    validate_duration(session.play_time, session.levels)?;
    Ok(())
}

/// Validate a code entered at a console or by an operator.
pub fn validate_code(code: &str) -> Result<(), PrecheckError> {
    if code.is_empty() {
        return Err(PrecheckError::EmptyCode);
    }
    if !code::is_valid_code(code) {
        return Err(PrecheckError::InvalidCode(code.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        GameSession::timed(7, "Tekken", 50, 30, "pay_001")
    }

    mod session_validation {
        use super::*;

        #[test]
        fn test_valid_sessions() {
            assert!(validate_session(&session(), 10).is_ok());
            assert!(
                validate_session(&GameSession::levelled(3, "Pacman", 20, 5, "pay_002"), 10).is_ok()
            );
        }

        #[test]
        fn test_zero_game_id() {
            let mut s = session();
            s.game_id = 0;
            assert_eq!(validate_session(&s, 10), Err(PrecheckError::InvalidGameId));
        }

        #[test]
        fn test_blank_payment_reference() {
            let mut s = session();
            s.payment_reference = "   ".to_string();
            assert_eq!(
                validate_session(&s, 10),
                Err(PrecheckError::MissingPaymentReference)
            );
        }

        #[test]
        fn test_price_at_minimum_is_accepted() {
            let mut s = session();
            s.price = 10;
            assert!(validate_session(&s, 10).is_ok());

            s.price = 9;
            let err = validate_session(&s, 10).unwrap_err();
            assert_eq!(err, PrecheckError::PriceBelowMinimum { price: 9, minimum: 10 });
            assert!(err.to_string().contains("minimum: 10"));
        }

        #[test]
        fn test_missing_time_and_levels() {
            let mut s = session();
            s.play_time = None;
            assert_eq!(
                validate_session(&s, 10),
                Err(PrecheckError::MissingTimeAndLevels)
            );
        }

        #[test]
        fn test_first_failure_wins() {
            let mut s = session();
            s.game_id = 0;
            s.payment_reference.clear();
            s.price = 1;
            s.play_time = None;
            assert_eq!(validate_session(&s, 10), Err(PrecheckError::InvalidGameId));

            s.game_id = 7;
            assert_eq!(
                validate_session(&s, 10),
                Err(PrecheckError::MissingPaymentReference)
            );
        }

        #[test]
        fn test_code_is_not_required() {
            let s = session();
            assert!(s.code.is_empty());
            assert!(validate_session(&s, 10).is_ok());
        }
    }

    mod code_validation {
        use super::*;

        #[test]
        fn test_valid_code() {
            assert!(validate_code("ABXYSO").is_ok());
        }

        #[test]
        fn test_empty_code() {
            let result = validate_code("");
            assert_eq!(result, Err(PrecheckError::EmptyCode));
            assert!(result.unwrap_err().to_string().contains("not provided"));
        }

        #[test]
        fn test_code_outside_alphabet() {
            let err = validate_code("ABC123").unwrap_err();
            assert_eq!(err, PrecheckError::InvalidCode("ABC123".to_string()));
            assert_eq!(
                err.to_string(),
                format!("{}: ABC123", errmsg::CODE_INVALID_CHARS)
            );
        }
    }
}
