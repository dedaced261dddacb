//! Error types for the Head to Head engine.
//!
//! All errors use the `H2H_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Game ledger errors
//! - 2xx: Asset / registry errors
//! - 3xx: Result oracle errors
//! - 4xx: Access guard errors
//! - 9xx: General / internal errors

use thiserror::Error;

use crate::{Address, GameId, GameState, TokenId};

/// Central error enum for all Head to Head operations.
#[derive(Debug, Error)]
pub enum HeadToHeadError {
    // =================================================================
    // Game Errors (1xx)
    // =================================================================
    /// The game does not exist or has already left the OPEN state.
    #[error("H2H_ERR_100: Game not setup: {0} is not open")]
    GameNotOpen(GameId),

    /// No game was ever created under this id.
    #[error("H2H_ERR_101: Game not found: {0}")]
    GameNotFound(GameId),

    /// Rematch requested for a game that did not end in a draw.
    #[error("H2H_ERR_102: Game not in drawn state: {0}")]
    GameNotDrawn(GameId),

    /// A state change the game state machine does not allow.
    #[error("H2H_ERR_103: Invalid transition for {game_id}: {from} -> {to}")]
    InvalidTransition {
        game_id: GameId,
        from: GameState,
        to: GameState,
    },

    // =================================================================
    // Asset Errors (2xx)
    // =================================================================
    /// The caller does not hold the referenced card (or is not the game's owner).
    #[error("H2H_ERR_200: You cannot enter if you dont own the card: {token_id} not owned by {caller}")]
    NotOwner { token_id: TokenId, caller: Address },

    /// The owner has not approved the engine operator in the registry.
    #[error("H2H_ERR_201: NFT not approved to play: {owner} has not approved {operator}")]
    NotApproved { owner: Address, operator: Address },

    /// The card is already committed to an unresolved game.
    #[error("H2H_ERR_202: Token already playing a game: {token_id} in {game_id}")]
    AlreadyPlaying { token_id: TokenId, game_id: GameId },

    /// The registry has no record of this card.
    #[error("H2H_ERR_203: Token not found: {0}")]
    TokenNotFound(TokenId),

    /// The registry refused or failed a transfer.
    #[error("H2H_ERR_204: Transfer failed: {reason}")]
    TransferFailed { reason: String },

    // =================================================================
    // Oracle Errors (3xx)
    // =================================================================
    /// The result oracle could not produce a verdict.
    #[error("H2H_ERR_300: Result oracle failed: {reason}")]
    OracleFailure { reason: String },

    /// The oracle returned a code outside the outcome table.
    #[error("H2H_ERR_301: Unknown outcome code from oracle: {0}")]
    UnknownOutcomeCode(u8),

    // =================================================================
    // Access Errors (4xx)
    // =================================================================
    /// The engine is paused; no mutating call is accepted.
    #[error("H2H_ERR_400: Engine is paused")]
    Paused,

    /// Unpause requested while the engine is running.
    #[error("H2H_ERR_401: Engine is not paused")]
    NotPaused,

    /// The caller lacks the administrator role.
    #[error("H2H_ERR_402: Unauthorized: {0} is not the administrator")]
    Unauthorized(Address),

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("H2H_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("H2H_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (invalid config file, missing fields, etc.).
    #[error("H2H_ERR_902: Configuration error: {0}")]
    Configuration(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, HeadToHeadError>;

impl From<serde_json::Error> for HeadToHeadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let err = HeadToHeadError::GameNotOpen(GameId(1));
        let msg = format!("{err}");
        assert!(msg.starts_with("H2H_ERR_100"), "Got: {msg}");
        assert!(msg.contains("Game not setup"));
    }

    #[test]
    fn already_playing_display() {
        let err = HeadToHeadError::AlreadyPlaying {
            token_id: TokenId(7),
            game_id: GameId(2),
        };
        let msg = format!("{err}");
        assert!(msg.contains("H2H_ERR_202"));
        assert!(msg.contains("Token already playing a game"));
        assert!(msg.contains("token:7"));
        assert!(msg.contains("game:2"));
    }

    #[test]
    fn invalid_transition_display() {
        let err = HeadToHeadError::InvalidTransition {
            game_id: GameId(1),
            from: GameState::Draw,
            to: GameState::Closed,
        };
        let msg = format!("{err}");
        assert!(msg.contains("DRAW"));
        assert!(msg.contains("CLOSED"));
    }

    #[test]
    fn all_errors_have_h2h_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(HeadToHeadError::Paused),
            Box::new(HeadToHeadError::NotPaused),
            Box::new(HeadToHeadError::GameNotDrawn(GameId(1))),
            Box::new(HeadToHeadError::UnknownOutcomeCode(9)),
            Box::new(HeadToHeadError::NotApproved {
                owner: Address::ZERO,
                operator: Address::ZERO,
            }),
            Box::new(HeadToHeadError::Internal("test".into())),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("H2H_ERR_"),
                "Error missing H2H_ERR_ prefix: {msg}"
            );
        }
    }

    #[test]
    fn serde_json_error_converts() {
        let err: HeadToHeadError = serde_json::from_str::<u64>("nope").unwrap_err().into();
        assert!(matches!(err, HeadToHeadError::Serialization(_)));
    }
}
