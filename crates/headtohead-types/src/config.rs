//! Configuration for a Head to Head engine instance.

use serde::{Deserialize, Serialize};

use crate::{Address, HeadToHeadError, Result};

/// Engine configuration.
///
/// ```json
/// {
///   "operator": "0x00000000000000000000000000000000000000aa",
///   "admin":    "0x00000000000000000000000000000000000000bb",
///   "start_paused": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// The engine's own registry identity. Players approve this address
    /// so the engine can move their cards at settlement.
    pub operator: Address,
    /// The account allowed to pause and unpause the engine.
    pub admin: Address,
    /// Start with the pause gate closed.
    #[serde(default)]
    pub start_paused: bool,
}

impl EngineConfig {
    #[must_use]
    pub fn new(operator: Address, admin: Address) -> Self {
        Self {
            operator,
            admin,
            start_paused: false,
        }
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| HeadToHeadError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.operator.is_zero() {
            return Err(HeadToHeadError::Configuration(
                "operator must not be the zero address".into(),
            ));
        }
        if self.admin.is_zero() {
            return Err(HeadToHeadError::Configuration(
                "admin must not be the zero address".into(),
            ));
        }
        if self.operator == self.admin {
            return Err(HeadToHeadError::Configuration(
                "operator and admin must be distinct accounts".into(),
            ));
        }
        Ok(())
    }
}
