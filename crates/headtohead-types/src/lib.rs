//! # headtohead-types
//!
//! Shared types, errors, and configuration for the **Head to Head** game engine.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`Address`], [`TokenId`], [`GameId`]
//! - **Cards**: [`CardAttributes`]
//! - **Game model**: [`Game`], [`GameState`]
//! - **Outcomes**: [`OracleVerdict`], [`Disposition`], [`OUTCOME_TABLE`]
//! - **Events**: [`GameEvent`]
//! - **Configuration**: [`EngineConfig`]
//! - **Errors**: [`HeadToHeadError`] with `H2H_ERR_` prefix codes
//! - **Constants**: system-wide limits and defaults

pub mod card;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod game;
pub mod ids;
pub mod outcome;

pub use card::*;
pub use config::*;
pub use error::*;
pub use event::*;
pub use game::*;
pub use ids::*;
pub use outcome::*;

// Constants are accessed via `headtohead_types::constants::FOO`.
