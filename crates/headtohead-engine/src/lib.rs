//! # headtohead-engine
//!
//! **Game ledger and settlement engine** for Head to Head: two cards are
//! wagered against each other and the loser's card goes to the winner.
//!
//! ## Architecture
//!
//! - **[`AccessGuard`]**: administrator pause gate checked first by every
//!   mutating call
//! - **[`GameLedger`]**: game records, sequential ids, per-card commitments,
//!   checkpoints for rollback
//! - **[`HeadToHead`]**: the entry points; drives the ledger, the
//!   [`AssetRegistry`](headtohead_registry::AssetRegistry) and the
//!   [`ResultOracle`](headtohead_registry::ResultOracle)
//!
//! ## Game Flow
//!
//! ```text
//! create_game ─▶ OPEN ─▶ result_game ─▶ oracle ─▶ outcome table
//!                  │                                 │
//!                  │ withdraw_from_game              ├─ HOME_WIN: away card → home owner
//!                  ▼                                 ├─ AWAY_WIN: home card → away owner
//!               CLOSED                               └─ DRAW: no transfer ─▶ re_match
//! ```
//!
//! Each call is all-or-nothing: a rejected call leaves ownership,
//! commitments, game records and the event log exactly as they were.

pub mod access_guard;
pub mod engine;
pub mod ledger;

pub use access_guard::AccessGuard;
pub use engine::{HeadToHead, Settlement};
pub use ledger::{Checkpoint, GameLedger};
