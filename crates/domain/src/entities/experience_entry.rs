//! Experience ledger entries
//!
//! Every change to a character's experience balance is recorded here. Total
//! XP spent is always derived by summing the ledger - there is no cached
//! column a client could patch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ids::{CharacterId, ExperienceEntryId};
use crate::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub id: ExperienceEntryId,
    pub character_id: CharacterId,
    /// Signed change to the balance: spends are negative, awards positive
    pub delta: i64,
    pub kind: ExperienceEntryKind,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ExperienceEntry {
    /// Record a spend of `amount` experience.
    pub fn spend(
        character_id: CharacterId,
        kind: ExperienceEntryKind,
        amount: u32,
        note: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ExperienceEntryId::new(),
            character_id,
            delta: -i64::from(amount),
            kind,
            note: Some(note.into()),
            created_at: now,
        }
    }

    /// Record an award of `amount` experience.
    pub fn award(
        character_id: CharacterId,
        kind: ExperienceEntryKind,
        amount: u32,
        note: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ExperienceEntryId::new(),
            character_id,
            delta: i64::from(amount),
            kind,
            note: Some(note.into()),
            created_at: now,
        }
    }

    pub fn is_spend(&self) -> bool {
        self.delta < 0
    }
}

/// Sum the XP spent (absolute value of negative deltas) across ledger entries.
pub fn total_spent(entries: &[ExperienceEntry]) -> u64 {
    entries
        .iter()
        .filter(|e| e.is_spend())
        .map(|e| e.delta.unsigned_abs())
        .sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceEntryKind {
    SkillPurchase,
    AttributePurchase,
    ArchetypePurchase,
    Award,
    EventAttendance,
}

impl ExperienceEntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SkillPurchase => "skill_purchase",
            Self::AttributePurchase => "attribute_purchase",
            Self::ArchetypePurchase => "archetype_purchase",
            Self::Award => "award",
            Self::EventAttendance => "event_attendance",
        }
    }
}

impl fmt::Display for ExperienceEntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExperienceEntryKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skill_purchase" => Ok(Self::SkillPurchase),
            "attribute_purchase" => Ok(Self::AttributePurchase),
            "archetype_purchase" => Ok(Self::ArchetypePurchase),
            "award" => Ok(Self::Award),
            "event_attendance" => Ok(Self::EventAttendance),
            other => Err(DomainError::parse(format!(
                "Unknown experience entry kind: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spends_are_negative_awards_positive() {
        let character_id = CharacterId::new();
        let spend = ExperienceEntry::spend(
            character_id,
            ExperienceEntryKind::SkillPurchase,
            5,
            "Bard",
            Utc::now(),
        );
        let award = ExperienceEntry::award(
            character_id,
            ExperienceEntryKind::Award,
            3,
            "event cleanup",
            Utc::now(),
        );
        assert_eq!(spend.delta, -5);
        assert!(spend.is_spend());
        assert_eq!(award.delta, 3);
        assert!(!award.is_spend());
    }

    #[test]
    fn total_spent_ignores_awards() {
        let character_id = CharacterId::new();
        let entries = vec![
            ExperienceEntry::spend(
                character_id,
                ExperienceEntryKind::SkillPurchase,
                5,
                "Bard",
                Utc::now(),
            ),
            ExperienceEntry::spend(
                character_id,
                ExperienceEntryKind::AttributePurchase,
                3,
                "Body 10 -> 13",
                Utc::now(),
            ),
            ExperienceEntry::award(
                character_id,
                ExperienceEntryKind::EventAttendance,
                4,
                "Spring Gathering",
                Utc::now(),
            ),
        ];
        assert_eq!(total_spent(&entries), 8);
    }
}
