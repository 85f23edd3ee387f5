//! Character entity - a player's persisted character
//!
//! Heritage, culture, and archetype are fixed at creation. Body and Stamina
//! start at the heritage base values and only increase through paid purchases.
//! Experience starts at the creation budget and is spent on skills, attribute
//! points, and a second archetype; it must never go negative.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::economy::CREATION_XP_BUDGET;
use crate::entities::Heritage;
use crate::ids::{ArchetypeId, CharacterId, CultureId, HeritageId, UserId};
use crate::value_objects::CharacterStatus;
use crate::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub user_id: UserId,
    pub name: String,
    pub heritage_id: HeritageId,
    pub culture_id: CultureId,
    pub archetype_id: ArchetypeId,
    /// Second archetype, purchasable once for a flat XP cost
    pub second_archetype_id: Option<ArchetypeId>,
    pub body: u32,
    pub stamina: u32,
    /// Spendable experience balance
    pub experience: u32,
    /// Learned skill names, in purchase order
    pub skills: Vec<String>,
    pub status: CharacterStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Character {
    /// Create a new character at the heritage's base attribute values with the
    /// full creation experience budget.
    pub fn new(
        user_id: UserId,
        name: impl Into<String>,
        heritage: &Heritage,
        culture_id: CultureId,
        archetype_id: ArchetypeId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: CharacterId::new(),
            user_id,
            name: name.into(),
            heritage_id: heritage.id,
            culture_id,
            archetype_id,
            second_archetype_id: None,
            body: heritage.base_body,
            stamina: heritage.base_stamina,
            experience: CREATION_XP_BUDGET,
            skills: Vec::new(),
            status: CharacterStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_skill(&self, skill_name: &str) -> bool {
        self.skills.iter().any(|s| s == skill_name)
    }

    /// Guard shared by all economy mutations: retired characters are frozen.
    pub fn ensure_can_spend(&self) -> Result<(), DomainError> {
        if self.status.is_retired() {
            return Err(DomainError::invalid_state_transition(
                "Retired characters cannot make purchases",
            ));
        }
        Ok(())
    }

    /// Record a learned skill. The caller is responsible for pricing and for
    /// the prerequisite check against reference data.
    pub fn learn_skill(
        &mut self,
        skill_name: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        self.ensure_can_spend()?;
        let skill_name = skill_name.into();
        if self.has_skill(&skill_name) {
            return Err(DomainError::constraint(format!(
                "Skill already learned: {skill_name}"
            )));
        }
        self.skills.push(skill_name);
        self.updated_at = now;
        Ok(())
    }

    /// Add purchased Body points. Points only add; there is no path back down.
    pub fn increase_body(&mut self, points: u32, now: DateTime<Utc>) -> Result<(), DomainError> {
        self.ensure_can_spend()?;
        if points == 0 {
            return Err(DomainError::validation("Must purchase at least one point"));
        }
        self.body += points;
        self.updated_at = now;
        Ok(())
    }

    /// Add purchased Stamina points.
    pub fn increase_stamina(&mut self, points: u32, now: DateTime<Utc>) -> Result<(), DomainError> {
        self.ensure_can_spend()?;
        if points == 0 {
            return Err(DomainError::validation("Must purchase at least one point"));
        }
        self.stamina += points;
        self.updated_at = now;
        Ok(())
    }

    /// Attach the purchased second archetype. One-time only.
    pub fn add_second_archetype(
        &mut self,
        archetype_id: ArchetypeId,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        self.ensure_can_spend()?;
        if self.second_archetype_id.is_some() {
            return Err(DomainError::constraint(
                "Character already has a second archetype",
            ));
        }
        if archetype_id == self.archetype_id {
            return Err(DomainError::validation(
                "Second archetype must differ from the first",
            ));
        }
        self.second_archetype_id = Some(archetype_id);
        self.updated_at = now;
        Ok(())
    }

    /// Flip between `Active` and `Inactive`.
    pub fn set_active(&mut self, active: bool, now: DateTime<Utc>) -> Result<(), DomainError> {
        self.status = if active {
            self.status.activate()?
        } else {
            self.status.deactivate()?
        };
        self.updated_at = now;
        Ok(())
    }

    /// Retire the character. Terminal; requires a reason.
    pub fn retire(
        &mut self,
        reason: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        self.status = self.status.retire(reason)?;
        self.updated_at = now;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("Character name cannot be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_heritage() -> Heritage {
        Heritage::new("Human", 10, 10)
    }

    fn test_character() -> Character {
        Character::new(
            UserId::new(),
            "Maeve",
            &test_heritage(),
            CultureId::new(),
            ArchetypeId::new(),
            Utc::now(),
        )
    }

    #[test]
    fn new_character_starts_at_heritage_base_with_full_budget() {
        let character = test_character();
        assert_eq!(character.body, 10);
        assert_eq!(character.stamina, 10);
        assert_eq!(character.experience, CREATION_XP_BUDGET);
        assert!(character.skills.is_empty());
        assert_eq!(character.status, CharacterStatus::Active);
    }

    #[test]
    fn duplicate_skill_is_rejected() {
        let mut character = test_character();
        character.learn_skill("Bard", Utc::now()).unwrap();
        assert!(character.learn_skill("Bard", Utc::now()).is_err());
    }

    #[test]
    fn retired_character_is_frozen() {
        let mut character = test_character();
        character.retire("left the game", Utc::now()).unwrap();
        assert!(character.learn_skill("Bard", Utc::now()).is_err());
        assert!(character.increase_body(1, Utc::now()).is_err());
        assert!(character.set_active(true, Utc::now()).is_err());
    }

    #[test]
    fn second_archetype_is_one_time() {
        let mut character = test_character();
        let second = ArchetypeId::new();
        character.add_second_archetype(second, Utc::now()).unwrap();
        assert!(character
            .add_second_archetype(ArchetypeId::new(), Utc::now())
            .is_err());
    }

    #[test]
    fn second_archetype_must_differ() {
        let mut character = test_character();
        let first = character.archetype_id;
        assert!(character.add_second_archetype(first, Utc::now()).is_err());
    }
}
