//! Identifiers used throughout Head to Head.
//!
//! Games and tokens use plain sequential integers. Accounts use a 20-byte
//! address rendered as `0x`-prefixed hex.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::HeadToHeadError;

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// An account identity: a player, the engine operator, or the administrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Default)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The unset address.
    pub const ZERO: Self = Self([0u8; 20]);

    #[must_use]
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Build an address whose low 8 bytes hold `value` (big-endian).
    ///
    /// Handy for well-known fixtures (`Address::from_low_u64(1)`).
    #[must_use]
    pub fn from_low_u64(value: u64) -> Self {
        let mut bytes = [0u8; 20];
        bytes[12..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }

    /// Parse a 40-digit hex string, with or without the `0x` prefix.
    pub fn from_hex(s: &str) -> crate::Result<Self> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let raw = hex::decode(digits).map_err(|e| {
            HeadToHeadError::Configuration(format!("invalid address {s:?}: {e}"))
        })?;
        let bytes: [u8; 20] = raw.try_into().map_err(|raw: Vec<u8>| {
            HeadToHeadError::Configuration(format!(
                "invalid address {s:?}: expected 20 bytes, got {}",
                raw.len()
            ))
        })?;
        Ok(Self(bytes))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// First four bytes as hex, for compact log fields.
    #[must_use]
    pub fn short(&self) -> String {
        format!("0x{}", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = HeadToHeadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Random addresses for tests. **Never use in production.**
#[cfg(any(test, feature = "test-helpers"))]
impl Address {
    pub fn random() -> Self {
        Self(rand::random::<[u8; 20]>())
    }
}

// ---------------------------------------------------------------------------
// TokenId
// ---------------------------------------------------------------------------

/// Identity of a card in the asset registry. Assigned sequentially from 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TokenId(pub u64);

impl TokenId {
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "token:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// GameId
// ---------------------------------------------------------------------------

/// Monotonically increasing game identifier. The first game is `GameId(1)`;
/// `GameId(0)` is never assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct GameId(pub u64);

impl GameId {
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "game:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_display_is_prefixed_hex() {
        let addr = Address::from_low_u64(0xabcd);
        assert_eq!(
            addr.to_string(),
            "0x000000000000000000000000000000000000abcd"
        );
        assert_eq!(addr.short(), "0x00000000");
    }

    #[test]
    fn address_parses_with_and_without_prefix() {
        let addr = Address::from_low_u64(42);
        let with = Address::from_hex(&addr.to_string()).unwrap();
        let without: Address = addr.to_string()[2..].parse().unwrap();
        assert_eq!(with, addr);
        assert_eq!(without, addr);
    }

    #[test]
    fn address_rejects_wrong_length() {
        let err = Address::from_hex("0xdeadbeef").unwrap_err();
        assert!(matches!(err, HeadToHeadError::Configuration(_)), "{err}");
        assert!(Address::from_hex("0xzz").is_err());
    }

    #[test]
    fn zero_address() {
        assert!(Address::ZERO.is_zero());
        assert!(Address::default().is_zero());
        assert!(!Address::random().is_zero());
    }

    #[test]
    fn address_serializes_as_string() {
        let addr = Address::from_low_u64(7);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"{addr}\""));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    fn game_id_next() {
        assert_eq!(GameId(0).next(), GameId(1));
        assert_eq!(TokenId(4).next(), TokenId(5));
        assert!(GameId(1) < GameId(2));
    }
}
