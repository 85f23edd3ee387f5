//! Character status value object - the character lifecycle state machine.
//!
//! `Active` and `Inactive` are interchangeable flags; `Retired` is terminal
//! and blocks every further economy mutation and event RSVP.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::DomainError;

/// Lifecycle state of a persisted character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CharacterStatus {
    Active,
    Inactive,
    Retired { reason: String },
}

impl CharacterStatus {
    pub fn is_retired(&self) -> bool {
        matches!(self, Self::Retired { .. })
    }

    /// Whether this character may still purchase skills/attributes or RSVP
    pub fn can_participate(&self) -> bool {
        !self.is_retired()
    }

    /// Transition to `Active`. Fails for retired characters.
    pub fn activate(&self) -> Result<Self, DomainError> {
        match self {
            Self::Retired { .. } => Err(DomainError::invalid_state_transition(
                "Retired characters cannot be reactivated",
            )),
            _ => Ok(Self::Active),
        }
    }

    /// Transition to `Inactive`. Fails for retired characters.
    pub fn deactivate(&self) -> Result<Self, DomainError> {
        match self {
            Self::Retired { .. } => Err(DomainError::invalid_state_transition(
                "Retired characters cannot be deactivated",
            )),
            _ => Ok(Self::Inactive),
        }
    }

    /// Transition to `Retired`. Requires a non-empty reason; terminal.
    pub fn retire(&self, reason: impl Into<String>) -> Result<Self, DomainError> {
        if self.is_retired() {
            return Err(DomainError::invalid_state_transition(
                "Character is already retired",
            ));
        }
        let reason = reason.into();
        if reason.trim().is_empty() {
            return Err(DomainError::validation(
                "Retirement requires a reason",
            ));
        }
        Ok(Self::Retired { reason })
    }

    /// Storage label for the status (the reason is stored separately)
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Retired { .. } => "retired",
        }
    }

    /// Rebuild a status from its storage label and optional retirement reason
    pub fn from_label(label: &str, reason: Option<String>) -> Result<Self, DomainError> {
        match label {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "retired" => Ok(Self::Retired {
                reason: reason.unwrap_or_default(),
            }),
            other => Err(DomainError::parse(format!(
                "Unknown character status: {other}"
            ))),
        }
    }
}

impl fmt::Display for CharacterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_and_inactive_are_interchangeable() {
        let status = CharacterStatus::Active;
        let inactive = status.deactivate().unwrap();
        assert_eq!(inactive, CharacterStatus::Inactive);
        assert_eq!(inactive.activate().unwrap(), CharacterStatus::Active);
    }

    #[test]
    fn retirement_is_terminal() {
        let retired = CharacterStatus::Active.retire("moved away").unwrap();
        assert!(retired.is_retired());
        assert!(retired.activate().is_err());
        assert!(retired.deactivate().is_err());
        assert!(retired.retire("again").is_err());
    }

    #[test]
    fn retirement_requires_reason() {
        assert!(CharacterStatus::Active.retire("  ").is_err());
    }

    #[test]
    fn label_round_trip() {
        let retired = CharacterStatus::Retired {
            reason: "left the chapter".to_string(),
        };
        let rebuilt =
            CharacterStatus::from_label(retired.label(), Some("left the chapter".to_string()))
                .unwrap();
        assert_eq!(rebuilt, retired);
    }
}
