//! Events published by the engine.
//!
//! Events are observable output only: the engine appends them to its log
//! after a call has fully committed and never reads them back.

use serde::{Deserialize, Serialize};

use crate::{Address, Disposition, GameId, TokenId};

/// Everything the engine announces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum GameEvent {
    /// A home card opened a new game (directly or through a rematch).
    GameCreated {
        game_id: GameId,
        home: Address,
        home_token_id: TokenId,
    },
    /// A joined game ended with a winner. `result` is published as the
    /// disposition's index.
    GameResulted {
        home: Address,
        away: Address,
        game_id: GameId,
        home_value: u64,
        away_value: u64,
        result: Disposition,
    },
    /// A joined game ended level.
    GameDraw {
        home: Address,
        away: Address,
        game_id: GameId,
        home_value: u64,
        away_value: u64,
        result: Disposition,
    },
    /// The home side withdrew an unjoined game.
    GameWithdrawn {
        game_id: GameId,
        home: Address,
        home_token_id: TokenId,
    },
    Paused {
        account: Address,
    },
    Unpaused {
        account: Address,
    },
}

impl GameEvent {
    /// The game this event concerns, if any.
    #[must_use]
    pub fn game_id(&self) -> Option<GameId> {
        match self {
            Self::GameCreated { game_id, .. }
            | Self::GameResulted { game_id, .. }
            | Self::GameDraw { game_id, .. }
            | Self::GameWithdrawn { game_id, .. } => Some(*game_id),
            Self::Paused { .. } | Self::Unpaused { .. } => None,
        }
    }

    /// Short event name, as used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::GameCreated { .. } => "GameCreated",
            Self::GameResulted { .. } => "GameResulted",
            Self::GameDraw { .. } => "GameDraw",
            Self::GameWithdrawn { .. } => "GameWithdrawn",
            Self::Paused { .. } => "Paused",
            Self::Unpaused { .. } => "Unpaused",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_id_extraction() {
        let ev = GameEvent::GameCreated {
            game_id: GameId(3),
            home: Address::from_low_u64(1),
            home_token_id: TokenId(0),
        };
        assert_eq!(ev.game_id(), Some(GameId(3)));
        assert_eq!(ev.name(), "GameCreated");

        let ev = GameEvent::Paused {
            account: Address::from_low_u64(9),
        };
        assert_eq!(ev.game_id(), None);
    }

    #[test]
    fn serializes_with_event_tag() {
        let ev = GameEvent::GameDraw {
            home: Address::from_low_u64(1),
            away: Address::from_low_u64(2),
            game_id: GameId(1),
            home_value: 10,
            away_value: 10,
            result: Disposition::Draw,
        };
        let value = serde_json::to_value(&ev).unwrap();
        assert_eq!(value["event"], "GameDraw");
        assert_eq!(value["result"], 1);
        assert_eq!(value["home_value"], 10);
    }
}
