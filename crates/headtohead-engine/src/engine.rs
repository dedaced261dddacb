//! The Head to Head engine: entry points and settlement.
//!
//! Every mutating call follows the same shape:
//! 1. Pause gate
//! 2. Re-validate approval, ownership and commitment against the registry
//!    and ledger (nothing is cached between calls)
//! 3. Consult the oracle and interpret its code (no state touched yet)
//! 4. Apply ledger effects behind a checkpoint
//! 5. Interact with the registry (card transfer); roll back on failure
//! 6. Publish events
//!
//! Mutating calls take `&mut self`, so an oracle or registry cannot call
//! back into the engine while a settlement is in flight.

use headtohead_registry::{AssetRegistry, ResultOracle};
use headtohead_types::{
    Address, Disposition, EngineConfig, Game, GameEvent, GameId, GameState, HeadToHeadError,
    Result, TokenId, constants,
};
use serde::Serialize;

use crate::access_guard::AccessGuard;
use crate::ledger::GameLedger;

/// Outcome of a settled game, returned to the caller that triggered it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settlement {
    pub game_id: GameId,
    pub disposition: Disposition,
    /// Raw oracle code the disposition was looked up from.
    pub oracle_code: u8,
    pub home_value: u64,
    pub away_value: u64,
    /// Owner of both cards after a decisive result; `None` on a draw.
    pub winner: Option<Address>,
    /// The losing card that changed hands; `None` on a draw.
    pub transferred_token: Option<TokenId>,
}

/// Game ledger plus settlement engine, wired to its two collaborators.
pub struct HeadToHead<R, O> {
    operator: Address,
    guard: AccessGuard,
    ledger: GameLedger,
    registry: R,
    oracle: O,
    events: Vec<GameEvent>,
}

impl<R: AssetRegistry, O: ResultOracle> HeadToHead<R, O> {
    /// Build an engine from a validated configuration.
    pub fn new(config: &EngineConfig, registry: R, oracle: O) -> Result<Self> {
        config.validate()?;
        let mut guard = AccessGuard::new(config.admin);
        if config.start_paused {
            guard.pause(config.admin)?;
        }
        tracing::info!(
            engine = constants::ENGINE_NAME,
            version = constants::VERSION,
            operator = %config.operator,
            admin = %config.admin,
            paused = config.start_paused,
            "Head to Head engine started"
        );
        Ok(Self {
            operator: config.operator,
            guard,
            ledger: GameLedger::new(),
            registry,
            oracle,
            events: Vec::new(),
        })
    }

    // -----------------------------------------------------------------
    // Administration
    // -----------------------------------------------------------------

    pub fn pause(&mut self, caller: Address) -> Result<()> {
        self.guard.pause(caller)?;
        self.emit(GameEvent::Paused { account: caller });
        Ok(())
    }

    pub fn unpause(&mut self, caller: Address) -> Result<()> {
        self.guard.unpause(caller)?;
        self.emit(GameEvent::Unpaused { account: caller });
        Ok(())
    }

    #[must_use]
    pub fn paused(&self) -> bool {
        self.guard.is_paused()
    }

    // -----------------------------------------------------------------
    // Game ledger entry points
    // -----------------------------------------------------------------

    /// Open a game with `token_id` as the home card.
    ///
    /// # Errors
    /// `Paused`, `NotApproved`, `NotOwner`, `AlreadyPlaying`.
    pub fn create_game(&mut self, token_id: TokenId, caller: Address) -> Result<GameId> {
        self.guard
            .ensure_not_paused()
            .and_then(|()| self.ensure_can_play(token_id, caller))
            .and_then(|()| self.ledger.open_game(token_id, caller))
            .inspect(|game_id| {
                tracing::info!(game_id = %game_id, home = %caller, token = %token_id, "Game created");
            })
            .inspect_err(|err| {
                tracing::warn!(token = %token_id, caller = %caller, error = %err, "create_game rejected");
            })
            .map(|game_id| {
                self.emit(GameEvent::GameCreated {
                    game_id,
                    home: caller,
                    home_token_id: token_id,
                });
                game_id
            })
    }

    /// Read a game record.
    ///
    /// # Errors
    /// `GameNotFound` if the id was never assigned.
    pub fn get_game(&self, game_id: GameId) -> Result<&Game> {
        self.ledger.get(game_id)
    }

    /// Withdraw an unjoined game and release the home card.
    ///
    /// # Errors
    /// `Paused`, `GameNotOpen` (also for unknown ids), `NotOwner`.
    pub fn withdraw_from_game(&mut self, game_id: GameId, caller: Address) -> Result<()> {
        self.guard.ensure_not_paused()?;
        let game = self
            .ledger
            .close_game(game_id, caller)
            .inspect_err(|err| {
                tracing::warn!(game_id = %game_id, caller = %caller, error = %err, "withdraw rejected");
            })?;
        let event = GameEvent::GameWithdrawn {
            game_id,
            home: game.home_owner,
            home_token_id: game.home_token_id,
        };
        tracing::info!(game_id = %game_id, home = %caller, "Game withdrawn");
        self.emit(event);
        Ok(())
    }

    /// Spawn and settle a new game between the two cards of a drawn game.
    ///
    /// The drawn game is left untouched. Both sides are re-validated as if
    /// the home side re-created the game and the away side re-joined it.
    ///
    /// Only the two players of the draw may ask for the rematch; a third
    /// party cannot put either card back at stake.
    ///
    /// # Errors
    /// `Paused`, `GameNotDrawn` (also for unknown ids), `NotOwner` if the
    /// caller took no part in the draw (a consent rule on top of the drawn
    /// state check), plus every `result_game` error.
    pub fn re_match(&mut self, game_id: GameId, caller: Address) -> Result<Settlement> {
        self.guard.ensure_not_paused()?;
        let drawn = self
            .ledger
            .get(game_id)
            .ok()
            .filter(|g| g.state == GameState::Draw)
            .ok_or(HeadToHeadError::GameNotDrawn(game_id))?;
        let (Some(away_token_id), Some(away_owner)) = (drawn.away_token_id, drawn.away_owner)
        else {
            return Err(HeadToHeadError::Internal(format!(
                "drawn game {game_id} has no away side"
            )));
        };
        if !drawn.is_participant(caller) {
            return Err(HeadToHeadError::NotOwner {
                token_id: drawn.home_token_id,
                caller,
            });
        }

        let mut rematch = Game::open(self.ledger.peek_next_id(), drawn.home_token_id, drawn.home_owner);
        rematch.rematch_of = Some(game_id);

        self.ensure_can_play(rematch.home_token_id, rematch.home_owner)
            .and_then(|()| self.ensure_can_play(away_token_id, away_owner))
            .and_then(|()| self.settle(rematch, away_token_id, away_owner))
            .inspect(|s| {
                tracing::info!(original = %game_id, rematch = %s.game_id, "Rematch settled");
            })
            .inspect_err(|err| {
                tracing::warn!(game_id = %game_id, caller = %caller, error = %err, "re_match rejected");
            })
    }

    // -----------------------------------------------------------------
    // Settlement entry point
    // -----------------------------------------------------------------

    /// Join an open game with `away_token_id` and settle it.
    ///
    /// Both sides are checked against the registry: the joining card first,
    /// then the home card still waiting in the game.
    ///
    /// # Errors
    /// `Paused`, `NotApproved`, `NotOwner`, `AlreadyPlaying`, `GameNotOpen`
    /// (also for unknown ids), oracle errors, registry transfer errors.
    /// `NotApproved`/`NotOwner` name the home owner if they revoked approval
    /// or no longer hold the home card. On any error nothing changes.
    pub fn result_game(
        &mut self,
        game_id: GameId,
        away_token_id: TokenId,
        caller: Address,
    ) -> Result<Settlement> {
        self.guard
            .ensure_not_paused()
            .and_then(|()| self.ensure_can_play(away_token_id, caller))
            .and_then(|()| {
                self.ledger
                    .get(game_id)
                    .ok()
                    .filter(|g| g.is_open())
                    .cloned()
                    .ok_or(HeadToHeadError::GameNotOpen(game_id))
            })
            .and_then(|game| {
                // The home card is committed to this game, so only approval
                // and ownership are rechecked for the home side.
                self.ensure_approved_and_owned(game.home_token_id, game.home_owner)
                    .map(|()| game)
            })
            .and_then(|game| self.settle(game, away_token_id, caller))
            .inspect_err(|err| {
                tracing::warn!(
                    game_id = %game_id,
                    token = %away_token_id,
                    caller = %caller,
                    error = %err,
                    "result_game rejected"
                );
            })
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    /// The address players approve so the engine can move their cards.
    #[must_use]
    pub fn operator(&self) -> Address {
        self.operator
    }

    #[must_use]
    pub fn ledger(&self) -> &GameLedger {
        &self.ledger
    }

    #[must_use]
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Mutable access to the registry, for actions players take there
    /// directly (approvals, transfers outside the game).
    pub fn registry_mut(&mut self) -> &mut R {
        &mut self.registry
    }

    #[must_use]
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn oracle_mut(&mut self) -> &mut O {
        &mut self.oracle
    }

    /// Every event published so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take the published events, leaving the log empty.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// The event log as a JSON array.
    pub fn events_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.events)?)
    }

    // -----------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------

    /// Approval, ownership and commitment checks, in that order.
    fn ensure_can_play(&self, token_id: TokenId, player: Address) -> Result<()> {
        self.ensure_approved_and_owned(token_id, player)?;
        self.ledger.ensure_available(token_id)
    }

    /// Approval and ownership checks, without the commitment check.
    fn ensure_approved_and_owned(&self, token_id: TokenId, player: Address) -> Result<()> {
        if !self.registry.is_approved_for_all(player, self.operator) {
            return Err(HeadToHeadError::NotApproved {
                owner: player,
                operator: self.operator,
            });
        }
        if self.registry.owner_of(token_id)? != player {
            return Err(HeadToHeadError::NotOwner {
                token_id,
                caller: player,
            });
        }
        Ok(())
    }

    /// Resolve `game` (OPEN, stored or about to be) against the away card.
    ///
    /// All preconditions must already hold.
    fn settle(
        &mut self,
        game: Game,
        away_token_id: TokenId,
        away_owner: Address,
    ) -> Result<Settlement> {
        let is_new = self.ledger.get(game.id).is_err();

        // Interpretation: read-only until the disposition is known.
        let home_attrs = self.registry.attributes(game.home_token_id)?;
        let away_attrs = self.registry.attributes(away_token_id)?;
        let verdict = self.oracle.get_result(game.id, &home_attrs, &away_attrs)?;
        let disposition = verdict.disposition()?;

        let mut resolved = game;
        resolved.resolve(away_token_id, away_owner, disposition)?;

        // Effects.
        let checkpoint = self.ledger.checkpoint(resolved.id, &resolved.tokens());
        self.ledger.record_result(resolved.clone())?;

        // Interactions.
        let transferred_token = match self.transfer_losing_card(&resolved, disposition) {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!(
                    game_id = %resolved.id,
                    error = %err,
                    "Card transfer failed, rolling back settlement"
                );
                self.ledger.rollback(checkpoint);
                return Err(err);
            }
        };

        let winner = match disposition {
            Disposition::HomeWin => Some(resolved.home_owner),
            Disposition::AwayWin => Some(away_owner),
            Disposition::Draw => None,
        };

        if is_new {
            self.emit(GameEvent::GameCreated {
                game_id: resolved.id,
                home: resolved.home_owner,
                home_token_id: resolved.home_token_id,
            });
        }
        let (home, away, game_id) = (resolved.home_owner, away_owner, resolved.id);
        let (home_value, away_value) = (verdict.home_value, verdict.away_value);
        self.emit(if disposition.is_draw() {
            GameEvent::GameDraw {
                home,
                away,
                game_id,
                home_value,
                away_value,
                result: disposition,
            }
        } else {
            GameEvent::GameResulted {
                home,
                away,
                game_id,
                home_value,
                away_value,
                result: disposition,
            }
        });

        tracing::info!(
            game_id = %game_id,
            home = %home,
            away = %away,
            home_value,
            away_value,
            code = verdict.code,
            result = %disposition,
            "Game settled"
        );

        Ok(Settlement {
            game_id,
            disposition,
            oracle_code: verdict.code,
            home_value,
            away_value,
            winner,
            transferred_token,
        })
    }

    /// Move the losing card to the winner. Nothing moves on a draw.
    fn transfer_losing_card(
        &mut self,
        game: &Game,
        disposition: Disposition,
    ) -> Result<Option<TokenId>> {
        let (Some(away_token_id), Some(away_owner)) = (game.away_token_id, game.away_owner) else {
            return Err(HeadToHeadError::Internal(format!(
                "settling {} without an away side",
                game.id
            )));
        };
        let (from, to, token_id) = match disposition {
            Disposition::HomeWin => (away_owner, game.home_owner, away_token_id),
            Disposition::AwayWin => (game.home_owner, away_owner, game.home_token_id),
            Disposition::Draw => return Ok(None),
        };
        self.registry
            .transfer_from(self.operator, from, to, token_id)?;
        Ok(Some(token_id))
    }

    fn emit(&mut self, event: GameEvent) {
        tracing::debug!(event = event.name(), game_id = ?event.game_id(), "Event published");
        self.events.push(event);
    }
}
