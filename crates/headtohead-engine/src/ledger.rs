//! Game ledger: the authoritative store of games and card commitments.
//!
//! The ledger owns every [`Game`] record and the in-play map
//! (`TokenId → GameId`) that keeps a card in at most one unresolved game.
//! Callers get shared references or clones; nothing outside the ledger
//! mutates a record.
//!
//! Game ids come from a single counter that starts at
//! [`constants::FIRST_GAME_ID`] and only moves forward when a game is
//! committed, so ids are never reused.

use std::collections::{BTreeMap, HashMap};

use headtohead_types::{
    Address, Game, GameId, GameState, HeadToHeadError, Result, TokenId, constants,
};

/// Snapshot of everything one settlement touches, for undoing ledger
/// effects when a later registry interaction fails.
#[derive(Debug, Clone)]
pub struct Checkpoint {
    last_game_id: GameId,
    game_id: GameId,
    previous: Option<Game>,
    commitments: Vec<(TokenId, Option<GameId>)>,
}

/// Authoritative mapping of game ids to match state.
pub struct GameLedger {
    games: BTreeMap<GameId, Game>,
    /// Cards committed to an unresolved game.
    in_play: HashMap<TokenId, GameId>,
    last_game_id: GameId,
}

impl GameLedger {
    #[must_use]
    pub fn new() -> Self {
        Self {
            games: BTreeMap::new(),
            in_play: HashMap::new(),
            last_game_id: GameId(constants::FIRST_GAME_ID - 1),
        }
    }

    /// The id the next committed game will receive.
    #[must_use]
    pub fn peek_next_id(&self) -> GameId {
        self.last_game_id.next()
    }

    /// The most recently assigned id (`GameId(0)` before the first game).
    #[must_use]
    pub fn last_game_id(&self) -> GameId {
        self.last_game_id
    }

    /// Look up a game.
    ///
    /// # Errors
    /// Returns `GameNotFound` if the id was never assigned.
    pub fn get(&self, game_id: GameId) -> Result<&Game> {
        self.games
            .get(&game_id)
            .ok_or(HeadToHeadError::GameNotFound(game_id))
    }

    /// The unresolved game `token_id` is committed to, if any.
    #[must_use]
    pub fn commitment_of(&self, token_id: TokenId) -> Option<GameId> {
        self.in_play.get(&token_id).copied()
    }

    /// # Errors
    /// Returns `AlreadyPlaying` if the card is committed to a game.
    pub fn ensure_available(&self, token_id: TokenId) -> Result<()> {
        match self.commitment_of(token_id) {
            Some(game_id) => Err(HeadToHeadError::AlreadyPlaying { token_id, game_id }),
            None => Ok(()),
        }
    }

    /// Open a new game for `home_token_id` and commit the card.
    ///
    /// # Errors
    /// Returns `AlreadyPlaying` if the card is already committed.
    pub fn open_game(&mut self, home_token_id: TokenId, home_owner: Address) -> Result<GameId> {
        self.ensure_available(home_token_id)?;

        let game_id = self.peek_next_id();
        self.last_game_id = game_id;
        self.games
            .insert(game_id, Game::open(game_id, home_token_id, home_owner));
        self.in_play.insert(home_token_id, game_id);

        tracing::debug!(game_id = %game_id, token = %home_token_id, "Card committed");
        Ok(game_id)
    }

    /// Withdraw an unjoined game and release its card.
    ///
    /// # Errors
    /// - `GameNotOpen` if the game does not exist or is not OPEN
    /// - `NotOwner` if `caller` is not the home owner
    pub fn close_game(&mut self, game_id: GameId, caller: Address) -> Result<&Game> {
        let game = self
            .games
            .get_mut(&game_id)
            .filter(|g| g.is_open())
            .ok_or(HeadToHeadError::GameNotOpen(game_id))?;
        if game.home_owner != caller {
            return Err(HeadToHeadError::NotOwner {
                token_id: game.home_token_id,
                caller,
            });
        }

        game.close()?;
        self.in_play.remove(&game.home_token_id);
        tracing::debug!(game_id = %game_id, token = %game.home_token_id, "Card released");
        Ok(game)
    }

    /// Snapshot the records a settlement of `game_id` over `tokens` touches.
    #[must_use]
    pub fn checkpoint(&self, game_id: GameId, tokens: &[TokenId]) -> Checkpoint {
        Checkpoint {
            last_game_id: self.last_game_id,
            game_id,
            previous: self.games.get(&game_id).cloned(),
            commitments: tokens
                .iter()
                .map(|t| (*t, self.commitment_of(*t)))
                .collect(),
        }
    }

    /// Store a resolved game and release every card it references.
    ///
    /// `resolved` either replaces an OPEN record with the same id, or is a
    /// brand-new game carrying [`Self::peek_next_id`].
    ///
    /// # Errors
    /// - `GameNotOpen` if the stored record has already left OPEN
    /// - `InvalidTransition` if `resolved` is not in a result state
    /// - `Internal` if a new game does not carry the next id
    pub fn record_result(&mut self, resolved: Game) -> Result<()> {
        if !resolved.state.is_result() {
            return Err(HeadToHeadError::InvalidTransition {
                game_id: resolved.id,
                from: GameState::Open,
                to: resolved.state,
            });
        }
        match self.games.get(&resolved.id) {
            Some(existing) if !existing.is_open() => {
                return Err(HeadToHeadError::GameNotOpen(resolved.id));
            }
            Some(_) => {}
            None if resolved.id == self.peek_next_id() => {
                self.last_game_id = resolved.id;
            }
            None => {
                return Err(HeadToHeadError::Internal(format!(
                    "new game {} out of sequence, expected {}",
                    resolved.id,
                    self.peek_next_id()
                )));
            }
        }

        for token_id in resolved.tokens() {
            self.in_play.remove(&token_id);
        }
        tracing::debug!(
            game_id = %resolved.id,
            state = %resolved.state,
            "Game result recorded, cards released"
        );
        self.games.insert(resolved.id, resolved);
        Ok(())
    }

    /// Restore the ledger to `checkpoint`.
    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        let Checkpoint {
            last_game_id,
            game_id,
            previous,
            commitments,
        } = checkpoint;

        self.last_game_id = last_game_id;
        match previous {
            Some(game) => {
                self.games.insert(game_id, game);
            }
            None => {
                self.games.remove(&game_id);
            }
        }
        for (token_id, commitment) in commitments {
            match commitment {
                Some(g) => {
                    self.in_play.insert(token_id, g);
                }
                None => {
                    self.in_play.remove(&token_id);
                }
            }
        }
        tracing::debug!(game_id = %game_id, "Ledger rolled back to checkpoint");
    }

    /// Games still waiting for an away side, in id order.
    pub fn open_games(&self) -> impl Iterator<Item = &Game> {
        self.games.values().filter(|g| g.is_open())
    }

    /// Every game ever created, in id order.
    pub fn games(&self) -> impl Iterator<Item = &Game> {
        self.games.values()
    }

    #[must_use]
    pub fn game_count(&self) -> usize {
        self.games.len()
    }

    /// Number of cards currently committed.
    #[must_use]
    pub fn in_play_count(&self) -> usize {
        self.in_play.len()
    }
}

impl Default for GameLedger {
    fn default() -> Self {
        Self::new()
    }
}
