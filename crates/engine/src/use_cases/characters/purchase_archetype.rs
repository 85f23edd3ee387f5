//! Second-archetype purchase use case.
//!
//! A flat 50-XP, one-time purchase. Afterwards the classifier considers both
//! archetypes, so any not-yet-learned skill prices at the better of the two
//! classifications.

use std::sync::Arc;

use emberfall_domain::{
    can_afford, economy::SECOND_ARCHETYPE_COST, ArchetypeId, Character, CharacterId,
    ExperienceEntry, ExperienceEntryKind,
};

use crate::infrastructure::ports::{CharacterRepo, ClockPort};
use crate::use_cases::reference::ReferenceDataService;

use super::error::CharacterError;

pub struct PurchaseSecondArchetype {
    character_repo: Arc<dyn CharacterRepo>,
    reference: Arc<ReferenceDataService>,
    clock: Arc<dyn ClockPort>,
}

impl PurchaseSecondArchetype {
    pub fn new(
        character_repo: Arc<dyn CharacterRepo>,
        reference: Arc<ReferenceDataService>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            character_repo,
            reference,
            clock,
        }
    }

    pub async fn execute(
        &self,
        character_id: CharacterId,
        archetype_id: ArchetypeId,
    ) -> Result<Character, CharacterError> {
        let mut character = self
            .character_repo
            .get(character_id)
            .await?
            .ok_or(CharacterError::CharacterNotFound(character_id))?;

        // Unlike pricing fallbacks, attaching an unknown archetype id would
        // corrupt the character row - this lookup must succeed.
        if self.reference.archetype(archetype_id).is_none() {
            return Err(CharacterError::ArchetypeNotFound(archetype_id));
        }

        if !can_afford(character.experience, SECOND_ARCHETYPE_COST) {
            return Err(CharacterError::InsufficientExperience {
                needed: SECOND_ARCHETYPE_COST,
                available: character.experience,
            });
        }

        let now = self.clock.now();
        let available_before = character.experience;
        character.add_second_archetype(archetype_id, now)?;

        let entry = ExperienceEntry::spend(
            character.id,
            ExperienceEntryKind::ArchetypePurchase,
            SECOND_ARCHETYPE_COST,
            "Second archetype",
            now,
        );
        let accepted = self
            .character_repo
            .commit_spend(&character, SECOND_ARCHETYPE_COST, &entry)
            .await?;
        if !accepted {
            return Err(CharacterError::InsufficientExperience {
                needed: SECOND_ARCHETYPE_COST,
                available: available_before,
            });
        }

        character.experience = available_before - SECOND_ARCHETYPE_COST;
        tracing::info!(
            character_id = %character.id,
            archetype_id = %archetype_id,
            "Purchased second archetype"
        );

        Ok(character)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{
        MockArchetypeRepo, MockCharacterRepo, MockClockPort, MockCultureRepo, MockHeritageRepo,
        MockSkillRepo,
    };
    use chrono::{TimeZone, Utc};
    use emberfall_domain::{Archetype, CultureId, Heritage, UserId};

    fn fixed_now() -> chrono::DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn test_character() -> Character {
        let heritage = Heritage::new("Human", 10, 10);
        Character::new(
            UserId::new(),
            "Maeve",
            &heritage,
            CultureId::new(),
            ArchetypeId::new(),
            fixed_now(),
        )
    }

    async fn reference_with(archetype: Archetype) -> Arc<ReferenceDataService> {
        let mut heritage_repo = MockHeritageRepo::new();
        heritage_repo.expect_list().returning(|| Ok(vec![]));
        let mut culture_repo = MockCultureRepo::new();
        culture_repo.expect_list().returning(|| Ok(vec![]));
        let mut archetype_repo = MockArchetypeRepo::new();
        archetype_repo
            .expect_list()
            .returning(move || Ok(vec![archetype.clone()]));
        let mut skill_repo = MockSkillRepo::new();
        skill_repo.expect_list().returning(|| Ok(vec![]));

        let reference = Arc::new(ReferenceDataService::new(
            Arc::new(heritage_repo),
            Arc::new(culture_repo),
            Arc::new(archetype_repo),
            Arc::new(skill_repo),
        ));
        reference.reload().await.unwrap();
        reference
    }

    fn clock() -> Arc<MockClockPort> {
        let mut clock = MockClockPort::new();
        clock.expect_now().returning(fixed_now);
        Arc::new(clock)
    }

    #[tokio::test]
    async fn when_balance_is_twenty_the_fifty_point_purchase_is_rejected() {
        let warden = Archetype::new("Warden");
        let warden_id = warden.id;
        let mut character = test_character();
        character.experience = 20;
        let character_id = character.id;

        let mut character_repo = MockCharacterRepo::new();
        let character_clone = character.clone();
        character_repo
            .expect_get()
            .returning(move |_| Ok(Some(character_clone.clone())));
        character_repo.expect_commit_spend().times(0);

        let use_case = PurchaseSecondArchetype::new(
            Arc::new(character_repo),
            reference_with(warden).await,
            clock(),
        );
        let result = use_case.execute(character_id, warden_id).await;

        assert!(matches!(
            result,
            Err(CharacterError::InsufficientExperience {
                needed: 50,
                available: 20
            })
        ));
    }

    #[tokio::test]
    async fn when_balance_covers_the_cost_the_archetype_is_attached() {
        let warden = Archetype::new("Warden");
        let warden_id = warden.id;
        let mut character = test_character();
        character.experience = 60;
        let character_id = character.id;

        let mut character_repo = MockCharacterRepo::new();
        let character_clone = character.clone();
        character_repo
            .expect_get()
            .returning(move |_| Ok(Some(character_clone.clone())));
        character_repo
            .expect_commit_spend()
            .withf(move |character, cost, entry| {
                character.second_archetype_id == Some(warden_id)
                    && *cost == 50
                    && entry.delta == -50
            })
            .times(1)
            .returning(|_, _, _| Ok(true));

        let use_case = PurchaseSecondArchetype::new(
            Arc::new(character_repo),
            reference_with(warden).await,
            clock(),
        );
        let character = use_case.execute(character_id, warden_id).await.unwrap();

        assert_eq!(character.second_archetype_id, Some(warden_id));
        assert_eq!(character.experience, 10);
    }

    #[tokio::test]
    async fn when_character_already_has_second_archetype_purchase_is_rejected() {
        let warden = Archetype::new("Warden");
        let warden_id = warden.id;
        let mut character = test_character();
        character.experience = 100;
        character
            .add_second_archetype(ArchetypeId::new(), fixed_now())
            .unwrap();
        let character_id = character.id;

        let mut character_repo = MockCharacterRepo::new();
        let character_clone = character.clone();
        character_repo
            .expect_get()
            .returning(move |_| Ok(Some(character_clone.clone())));
        character_repo.expect_commit_spend().times(0);

        let use_case = PurchaseSecondArchetype::new(
            Arc::new(character_repo),
            reference_with(warden).await,
            clock(),
        );
        let result = use_case.execute(character_id, warden_id).await;
        assert!(matches!(result, Err(CharacterError::Validation(_))));
    }

    #[tokio::test]
    async fn when_archetype_is_unknown_purchase_is_rejected() {
        let character = test_character();
        let character_id = character.id;

        let mut character_repo = MockCharacterRepo::new();
        let character_clone = character.clone();
        character_repo
            .expect_get()
            .returning(move |_| Ok(Some(character_clone.clone())));

        let use_case = PurchaseSecondArchetype::new(
            Arc::new(character_repo),
            reference_with(Archetype::new("Warden")).await,
            clock(),
        );
        let result = use_case.execute(character_id, ArchetypeId::new()).await;
        assert!(matches!(result, Err(CharacterError::ArchetypeNotFound(_))));
    }
}
