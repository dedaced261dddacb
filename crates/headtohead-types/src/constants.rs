//! System-wide constants for the Head to Head engine.

/// Number of attribute slots on every card.
pub const ATTRIBUTE_SLOTS: usize = 4;

/// The first game id handed out by a fresh ledger.
pub const FIRST_GAME_ID: u64 = 1;

/// Domain separator for the deterministic resulter's slot selection.
pub const RESULTER_DOMAIN: &[u8] = b"headtohead:resulter:v1:";

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "HeadToHead";
