//! Card attribute values read from the asset registry.

use serde::{Deserialize, Serialize};

use crate::constants::ATTRIBUTE_SLOTS;

/// The four numeric attributes every card carries.
///
/// The engine never interprets these; it hands both sides' attributes to
/// the result oracle, which decides which slot(s) to score on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CardAttributes {
    pub strength: u64,
    pub speed: u64,
    pub intelligence: u64,
    pub skill: u64,
}

impl CardAttributes {
    #[must_use]
    pub fn new(strength: u64, speed: u64, intelligence: u64, skill: u64) -> Self {
        Self {
            strength,
            speed,
            intelligence,
            skill,
        }
    }

    /// Attributes in slot order: strength, speed, intelligence, skill.
    #[must_use]
    pub fn as_array(&self) -> [u64; ATTRIBUTE_SLOTS] {
        [self.strength, self.speed, self.intelligence, self.skill]
    }

    /// Value at `slot` (0..=3), or `None` when out of range.
    #[must_use]
    pub fn slot(&self, slot: usize) -> Option<u64> {
        self.as_array().get(slot).copied()
    }
}

impl From<[u64; ATTRIBUTE_SLOTS]> for CardAttributes {
    fn from([strength, speed, intelligence, skill]: [u64; ATTRIBUTE_SLOTS]) -> Self {
        Self::new(strength, speed, intelligence, skill)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_follow_declaration_order() {
        let attrs = CardAttributes::new(5, 10, 20, 30);
        assert_eq!(attrs.as_array(), [5, 10, 20, 30]);
        assert_eq!(attrs.slot(0), Some(5));
        assert_eq!(attrs.slot(3), Some(30));
        assert_eq!(attrs.slot(4), None);
    }

    #[test]
    fn from_array() {
        let attrs = CardAttributes::from([1, 2, 3, 4]);
        assert_eq!(attrs.intelligence, 3);
        assert_eq!(attrs.skill, 4);
    }
}
