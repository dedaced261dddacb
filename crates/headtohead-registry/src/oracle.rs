//! Result oracle seam.
//!
//! An oracle looks at both cards' attributes and returns a raw
//! [`OracleVerdict`]. It does not decide who wins: the engine maps the
//! verdict's code through its own outcome table.

use sha2::{Digest, Sha256};

use headtohead_types::{CardAttributes, GameId, OracleVerdict, Result, constants};

/// The narrow interface the engine consumes from a result oracle.
///
/// Implementations must be deterministic for a given input. Any `Err`
/// aborts the calling entry point with no effects.
pub trait ResultOracle {
    fn get_result(
        &self,
        game_id: GameId,
        home: &CardAttributes,
        away: &CardAttributes,
    ) -> Result<OracleVerdict>;
}

/// Deterministic resulter.
///
/// Picks one attribute slot from a SHA-256 digest over the game id and
/// both attribute sets, then compares the two values on that slot:
/// home greater → code 0, equal → code 2, away greater → code 3.
#[derive(Debug, Clone, Default)]
pub struct HashResulter {
    salt: Vec<u8>,
}

impl HashResulter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mix a deployment-specific salt into slot selection.
    #[must_use]
    pub fn with_salt(salt: impl Into<Vec<u8>>) -> Self {
        Self { salt: salt.into() }
    }

    /// The attribute slot this resulter scores a given match on.
    #[must_use]
    pub fn select_slot(
        &self,
        game_id: GameId,
        home: &CardAttributes,
        away: &CardAttributes,
    ) -> usize {
        let mut hasher = Sha256::new();
        hasher.update(constants::RESULTER_DOMAIN);
        hasher.update(&self.salt);
        hasher.update(game_id.0.to_le_bytes());
        for value in home.as_array().into_iter().chain(away.as_array()) {
            hasher.update(value.to_le_bytes());
        }
        let digest = hasher.finalize();
        usize::from(digest[0]) % constants::ATTRIBUTE_SLOTS
    }
}

impl ResultOracle for HashResulter {
    fn get_result(
        &self,
        game_id: GameId,
        home: &CardAttributes,
        away: &CardAttributes,
    ) -> Result<OracleVerdict> {
        let slot = self.select_slot(game_id, home, away);
        let home_value = home.as_array()[slot];
        let away_value = away.as_array()[slot];
        let code = match home_value.cmp(&away_value) {
            std::cmp::Ordering::Greater => 0,
            std::cmp::Ordering::Equal => 2,
            std::cmp::Ordering::Less => 3,
        };
        tracing::debug!(
            game_id = %game_id,
            slot,
            home_value,
            away_value,
            code,
            "Resulter scored match"
        );
        Ok(OracleVerdict::new(code, home_value, away_value))
    }
}

#[cfg(any(test, feature = "test-helpers"))]
pub use mock::MockResulter;

#[cfg(any(test, feature = "test-helpers"))]
mod mock {
    use std::cell::Cell;

    use headtohead_types::{
        CardAttributes, GameId, HeadToHeadError, OracleVerdict, Result, constants,
    };

    use super::ResultOracle;

    /// Attribute slot reported for each forced code. Scenario tests rely on
    /// the slot's values agreeing with the code.
    pub const ATTRIBUTE_FOR_CODE: [usize; constants::ATTRIBUTE_SLOTS] = [0, 2, 1, 3];

    /// Test double with a caller-controlled result code. **Never use in production.**
    ///
    /// Reported values come from the attribute slot [`ATTRIBUTE_FOR_CODE`]
    /// assigns to the forced code (slot 0 for codes outside it).
    #[derive(Debug, Default)]
    pub struct MockResulter {
        code: u8,
        failure: Option<String>,
        calls: Cell<usize>,
    }

    impl MockResulter {
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Force the code returned by every following call.
        pub fn set_result(&mut self, code: u8) {
            self.code = code;
        }

        /// Make every following call fail with `reason`.
        pub fn fail_with(&mut self, reason: impl Into<String>) {
            self.failure = Some(reason.into());
        }

        pub fn clear_failure(&mut self) {
            self.failure = None;
        }

        /// How many verdicts have been requested so far.
        #[must_use]
        pub fn calls(&self) -> usize {
            self.calls.get()
        }
    }

    impl ResultOracle for MockResulter {
        fn get_result(
            &self,
            _game_id: GameId,
            home: &CardAttributes,
            away: &CardAttributes,
        ) -> Result<OracleVerdict> {
            self.calls.set(self.calls.get() + 1);
            if let Some(reason) = &self.failure {
                return Err(HeadToHeadError::OracleFailure {
                    reason: reason.clone(),
                });
            }
            let slot = ATTRIBUTE_FOR_CODE
                .get(usize::from(self.code))
                .copied()
                .unwrap_or(0);
            Ok(OracleVerdict::new(
                self.code,
                home.as_array()[slot],
                away.as_array()[slot],
            ))
        }
    }
}
