//! Achievement rarity thresholds.
//!
//! Thresholds are percentages of players holding an achievement; an
//! achievement's rarity is the first band its share falls under. The ordering
//! `common > rare > epic > legendary` is required - a violation is rejected
//! with a validation error and no partial effect.

use serde::{Deserialize, Serialize};

use crate::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaritySettings {
    pub common: u32,
    pub rare: u32,
    pub epic: u32,
    pub legendary: u32,
}

impl RaritySettings {
    pub fn new(common: u32, rare: u32, epic: u32, legendary: u32) -> Result<Self, DomainError> {
        let settings = Self {
            common,
            rare,
            epic,
            legendary,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.common > self.rare && self.rare > self.epic && self.epic > self.legendary {
            Ok(())
        } else {
            Err(DomainError::validation(
                "Rarity thresholds must be strictly descending: common > rare > epic > legendary",
            ))
        }
    }
}

impl Default for RaritySettings {
    fn default() -> Self {
        Self {
            common: 50,
            rare: 25,
            epic: 10,
            legendary: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_thresholds_are_valid() {
        assert!(RaritySettings::default().validate().is_ok());
    }

    #[test]
    fn equal_thresholds_are_rejected() {
        assert!(RaritySettings::new(50, 50, 10, 1).is_err());
    }

    #[test]
    fn inverted_thresholds_are_rejected() {
        assert!(RaritySettings::new(1, 10, 25, 50).is_err());
    }
}
