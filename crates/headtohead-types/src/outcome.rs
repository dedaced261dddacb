//! Match outcomes: the oracle's raw verdict and the engine's disposition.
//!
//! The oracle reports a numeric code from a result space larger than the
//! three dispositions. The engine owns the mapping from code to disposition
//! and keeps it as an explicit table:
//!
//! | code | disposition |
//! |------|-------------|
//! | 0    | `HomeWin`   |
//! | 1    | `AwayWin`   |
//! | 2    | `Draw`      |
//! | 3    | `AwayWin`   |
//!
//! Codes outside the table are rejected, never clamped.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{HeadToHeadError, Result};

/// The three ways a joined game can end.
///
/// Discriminants are the index published in result events
/// (`HomeWin = 0`, `Draw = 1`, `AwayWin = 2`), and serde encodes a
/// disposition as that index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum Disposition {
    HomeWin = 0,
    Draw = 1,
    AwayWin = 2,
}

/// Oracle code → disposition.
pub const OUTCOME_TABLE: [(u8, Disposition); 4] = [
    (0, Disposition::HomeWin),
    (1, Disposition::AwayWin),
    (2, Disposition::Draw),
    (3, Disposition::AwayWin),
];

impl Disposition {
    /// Look an oracle code up in [`OUTCOME_TABLE`].
    ///
    /// # Errors
    /// Returns [`HeadToHeadError::UnknownOutcomeCode`] for codes not in the table.
    pub fn from_oracle_code(code: u8) -> Result<Self> {
        OUTCOME_TABLE
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, disposition)| *disposition)
            .ok_or(HeadToHeadError::UnknownOutcomeCode(code))
    }

    /// Index published in result events.
    #[must_use]
    pub fn event_index(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn is_draw(self) -> bool {
        self == Self::Draw
    }
}

impl From<Disposition> for u8 {
    fn from(disposition: Disposition) -> Self {
        disposition.event_index()
    }
}

impl TryFrom<u8> for Disposition {
    type Error = HeadToHeadError;

    fn try_from(index: u8) -> Result<Self> {
        match index {
            0 => Ok(Self::HomeWin),
            1 => Ok(Self::Draw),
            2 => Ok(Self::AwayWin),
            other => Err(HeadToHeadError::Serialization(format!(
                "invalid result index {other}"
            ))),
        }
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HomeWin => write!(f, "HOME_WIN"),
            Self::Draw => write!(f, "DRAW"),
            Self::AwayWin => write!(f, "AWAY_WIN"),
        }
    }
}

/// What the result oracle returns for one match.
///
/// `home_value`/`away_value` are the raw attribute values the oracle scored
/// on; they are published in the result event for transparency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleVerdict {
    pub code: u8,
    pub home_value: u64,
    pub away_value: u64,
}

impl OracleVerdict {
    #[must_use]
    pub fn new(code: u8, home_value: u64, away_value: u64) -> Self {
        Self {
            code,
            home_value,
            away_value,
        }
    }

    /// Interpret this verdict through the engine's outcome table.
    pub fn disposition(&self) -> Result<Disposition> {
        Disposition::from_oracle_code(self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_exact() {
        assert_eq!(Disposition::from_oracle_code(0).unwrap(), Disposition::HomeWin);
        assert_eq!(Disposition::from_oracle_code(1).unwrap(), Disposition::AwayWin);
        assert_eq!(Disposition::from_oracle_code(2).unwrap(), Disposition::Draw);
        assert_eq!(Disposition::from_oracle_code(3).unwrap(), Disposition::AwayWin);
    }

    #[test]
    fn codes_outside_table_rejected() {
        for code in [4u8, 5, 42, u8::MAX] {
            let err = Disposition::from_oracle_code(code).unwrap_err();
            assert!(
                matches!(err, HeadToHeadError::UnknownOutcomeCode(c) if c == code),
                "code {code}: {err:?}"
            );
        }
    }

    #[test]
    fn table_covers_every_disposition() {
        for d in [Disposition::HomeWin, Disposition::Draw, Disposition::AwayWin] {
            assert!(OUTCOME_TABLE.iter().any(|(_, x)| *x == d), "{d} unreachable");
        }
    }

    #[test]
    fn event_index_is_zero_indexed() {
        assert_eq!(Disposition::HomeWin.event_index(), 0);
        assert_eq!(Disposition::Draw.event_index(), 1);
        assert_eq!(Disposition::AwayWin.event_index(), 2);
    }

    #[test]
    fn serializes_as_event_index() {
        assert_eq!(serde_json::to_string(&Disposition::HomeWin).unwrap(), "0");
        assert_eq!(serde_json::to_string(&Disposition::Draw).unwrap(), "1");
        assert_eq!(serde_json::to_string(&Disposition::AwayWin).unwrap(), "2");
        let back: Disposition = serde_json::from_str("2").unwrap();
        assert_eq!(back, Disposition::AwayWin);
        assert!(serde_json::from_str::<Disposition>("3").is_err());
    }

    #[test]
    fn verdict_disposition() {
        let verdict = OracleVerdict::new(3, 10, 20);
        assert_eq!(verdict.disposition().unwrap(), Disposition::AwayWin);
        assert!(OracleVerdict::new(9, 0, 0).disposition().is_err());
    }
}
