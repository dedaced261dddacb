//! # Game: the record a head-to-head match lives in
//!
//! ## State Machine
//!
//! ```text
//!                 join + result
//!   ┌──────┐ ─────────────────────▶ HOME_WIN | AWAY_WIN | DRAW
//!   │ OPEN │
//!   └──┬───┘
//!      │ home withdraws
//!      ▼
//!   ┌────────┐
//!   │ CLOSED │
//!   └────────┘
//! ```
//!
//! Every state except `OPEN` is terminal. A `DRAW` can seed a rematch, but
//! the rematch is a new game; the drawn record itself never changes again.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Address, Disposition, GameId, HeadToHeadError, TokenId};

/// Lifecycle state of a game.
///
/// Numeric order matches the public wire encoding (`OPEN = 0` … `CLOSED = 4`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum GameState {
    /// Created by the home side, waiting for an away side.
    Open = 0,
    /// Resolved in favour of the home card.
    HomeWin = 1,
    /// Resolved in favour of the away card.
    AwayWin = 2,
    /// Resolved as equal. Ownership unchanged.
    Draw = 3,
    /// Withdrawn by the home side before anyone joined.
    Closed = 4,
}

impl GameState {
    /// Can a game move from this state to `target`?
    #[must_use]
    pub fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (
                Self::Open,
                Self::HomeWin | Self::AwayWin | Self::Draw | Self::Closed
            )
        )
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Open)
    }

    /// `true` for the three states a joined game can end in.
    #[must_use]
    pub fn is_result(&self) -> bool {
        matches!(self, Self::HomeWin | Self::AwayWin | Self::Draw)
    }
}

impl From<Disposition> for GameState {
    fn from(disposition: Disposition) -> Self {
        match disposition {
            Disposition::HomeWin => Self::HomeWin,
            Disposition::AwayWin => Self::AwayWin,
            Disposition::Draw => Self::Draw,
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "OPEN"),
            Self::HomeWin => write!(f, "HOME_WIN"),
            Self::AwayWin => write!(f, "AWAY_WIN"),
            Self::Draw => write!(f, "DRAW"),
            Self::Closed => write!(f, "CLOSED"),
        }
    }
}

/// A single head-to-head match.
///
/// The away fields stay `None` until a second card joins; they are `Some`
/// for exactly the three result states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub home_token_id: TokenId,
    pub home_owner: Address,
    pub away_token_id: Option<TokenId>,
    pub away_owner: Option<Address>,
    pub state: GameState,
    /// The drawn game this one was spawned from, if it is a rematch.
    pub rematch_of: Option<GameId>,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Game {
    /// A fresh open game with only the home side filled in.
    #[must_use]
    pub fn open(id: GameId, home_token_id: TokenId, home_owner: Address) -> Self {
        Self {
            id,
            home_token_id,
            home_owner,
            away_token_id: None,
            away_owner: None,
            state: GameState::Open,
            rematch_of: None,
            created_at: Utc::now(),
            resolved_at: None,
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state == GameState::Open
    }

    /// Both token ids this game references (away only once joined).
    #[must_use]
    pub fn tokens(&self) -> Vec<TokenId> {
        std::iter::once(self.home_token_id)
            .chain(self.away_token_id)
            .collect()
    }

    /// Is `who` one of the two sides of this game?
    #[must_use]
    pub fn is_participant(&self, who: Address) -> bool {
        self.home_owner == who || self.away_owner == Some(who)
    }

    /// Seat the away side and record the result in one step.
    ///
    /// # Errors
    /// Returns [`HeadToHeadError::InvalidTransition`] unless the game is open.
    pub fn resolve(
        &mut self,
        away_token_id: TokenId,
        away_owner: Address,
        disposition: Disposition,
    ) -> crate::Result<()> {
        let target = GameState::from(disposition);
        self.transition(target)?;
        self.away_token_id = Some(away_token_id);
        self.away_owner = Some(away_owner);
        self.resolved_at = Some(Utc::now());
        Ok(())
    }

    /// Withdraw an unjoined game.
    ///
    /// # Errors
    /// Returns [`HeadToHeadError::InvalidTransition`] unless the game is open.
    pub fn close(&mut self) -> crate::Result<()> {
        self.transition(GameState::Closed)?;
        self.resolved_at = Some(Utc::now());
        Ok(())
    }

    fn transition(&mut self, target: GameState) -> crate::Result<()> {
        if !self.state.can_transition_to(target) {
            return Err(HeadToHeadError::InvalidTransition {
                game_id: self.id,
                from: self.state,
                to: target,
            });
        }
        self.state = target;
        Ok(())
    }
}
