//! Character read models.
//!
//! Total XP spent is always derived by summing the experience ledger; there
//! is no cached column a client could patch.

use std::sync::Arc;

use emberfall_domain::{
    can_afford, total_spent, Character, CharacterId, ExperienceEntry, SkillPricing, UserId,
};

use crate::infrastructure::ports::CharacterRepo;
use crate::use_cases::reference::ReferenceDataService;

use super::error::CharacterError;

/// A character together with its ledger-derived spending total.
#[derive(Debug, Clone)]
pub struct CharacterDetails {
    pub character: Character,
    pub total_spent: u64,
}

pub struct GetCharacter {
    character_repo: Arc<dyn CharacterRepo>,
}

impl GetCharacter {
    pub fn new(character_repo: Arc<dyn CharacterRepo>) -> Self {
        Self { character_repo }
    }

    pub async fn execute(
        &self,
        character_id: CharacterId,
    ) -> Result<CharacterDetails, CharacterError> {
        let character = self
            .character_repo
            .get(character_id)
            .await?
            .ok_or(CharacterError::CharacterNotFound(character_id))?;
        let ledger = self.character_repo.ledger(character_id).await?;

        Ok(CharacterDetails {
            character,
            total_spent: total_spent(&ledger),
        })
    }
}

pub struct ListCharacters {
    character_repo: Arc<dyn CharacterRepo>,
}

impl ListCharacters {
    pub fn new(character_repo: Arc<dyn CharacterRepo>) -> Self {
        Self { character_repo }
    }

    pub async fn execute(&self, user_id: UserId) -> Result<Vec<CharacterDetails>, CharacterError> {
        let characters = self.character_repo.list_for_user(user_id).await?;
        let mut details = Vec::with_capacity(characters.len());
        for character in characters {
            let ledger = self.character_repo.ledger(character.id).await?;
            details.push(CharacterDetails {
                total_spent: total_spent(&ledger),
                character,
            });
        }
        Ok(details)
    }
}

pub struct GetLedger {
    character_repo: Arc<dyn CharacterRepo>,
}

impl GetLedger {
    pub fn new(character_repo: Arc<dyn CharacterRepo>) -> Self {
        Self { character_repo }
    }

    pub async fn execute(
        &self,
        character_id: CharacterId,
    ) -> Result<(Vec<ExperienceEntry>, u64), CharacterError> {
        if self.character_repo.get(character_id).await?.is_none() {
            return Err(CharacterError::CharacterNotFound(character_id));
        }
        let entries = self.character_repo.ledger(character_id).await?;
        let spent = total_spent(&entries);
        Ok((entries, spent))
    }
}

/// Live pricing feedback for a candidate skill purchase.
#[derive(Debug, Clone)]
pub struct SkillQuote {
    pub skill: String,
    pub pricing: SkillPricing,
    pub available: u32,
    pub affordable: bool,
}

pub struct QuoteSkill {
    character_repo: Arc<dyn CharacterRepo>,
    reference: Arc<ReferenceDataService>,
}

impl QuoteSkill {
    pub fn new(
        character_repo: Arc<dyn CharacterRepo>,
        reference: Arc<ReferenceDataService>,
    ) -> Self {
        Self {
            character_repo,
            reference,
        }
    }

    pub async fn execute(
        &self,
        character_id: CharacterId,
        skill_name: &str,
    ) -> Result<SkillQuote, CharacterError> {
        let character = self
            .character_repo
            .get(character_id)
            .await?
            .ok_or(CharacterError::CharacterNotFound(character_id))?;

        let pricing = super::pricing::price_skill(&self.reference, &character, skill_name);
        Ok(SkillQuote {
            skill: skill_name.to_string(),
            pricing,
            available: character.experience,
            affordable: character.status.can_participate()
                && can_afford(character.experience, pricing.cost),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{
        MockArchetypeRepo, MockCharacterRepo, MockCultureRepo, MockHeritageRepo, MockSkillRepo,
    };
    use chrono::{TimeZone, Utc};
    use emberfall_domain::{
        Archetype, ArchetypeId, CultureId, ExperienceEntryKind, Heritage, SkillTier,
    };

    fn fixed_now() -> chrono::DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn test_character(heritage: &Heritage, archetype_id: ArchetypeId) -> Character {
        Character::new(
            UserId::new(),
            "Maeve",
            heritage,
            CultureId::new(),
            archetype_id,
            fixed_now(),
        )
    }

    async fn reference_with(heritage: Heritage, archetype: Archetype) -> Arc<ReferenceDataService> {
        let mut heritage_repo = MockHeritageRepo::new();
        heritage_repo
            .expect_list()
            .returning(move || Ok(vec![heritage.clone()]));
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

    #[tokio::test]
    async fn when_fetched_total_spent_is_summed_from_the_ledger() {
        let heritage = Heritage::new("Human", 10, 10);
        let character = test_character(&heritage, ArchetypeId::new());
        let character_id = character.id;

        let mut character_repo = MockCharacterRepo::new();
        let character_clone = character.clone();
        character_repo
            .expect_get()
            .returning(move |_| Ok(Some(character_clone.clone())));
        character_repo.expect_ledger().returning(move |_| {
            Ok(vec![
                ExperienceEntry::spend(
                    character_id,
                    ExperienceEntryKind::SkillPurchase,
                    5,
                    "Bard",
                    fixed_now(),
                ),
                ExperienceEntry::award(
                    character_id,
                    ExperienceEntryKind::Award,
                    3,
                    "cleanup",
                    fixed_now(),
                ),
            ])
        });

        let use_case = GetCharacter::new(Arc::new(character_repo));
        let details = use_case.execute(character_id).await.unwrap();
        assert_eq!(details.total_spent, 5);
    }

    #[tokio::test]
    async fn when_quoted_skill_is_affordable_primary_tier_wins() {
        let heritage = Heritage::new("Human", 10, 10)
            .with_secondary_skills(vec!["Herbalism".to_string()]);
        let archetype =
            Archetype::new("Apothecary").with_primary_skills(vec!["Herbalism".to_string()]);
        let character = test_character(&heritage, archetype.id);
        let character_id = character.id;

        let mut character_repo = MockCharacterRepo::new();
        let character_clone = character.clone();
        character_repo
            .expect_get()
            .returning(move |_| Ok(Some(character_clone.clone())));

        let use_case = QuoteSkill::new(
            Arc::new(character_repo),
            reference_with(heritage, archetype).await,
        );
        let quote = use_case.execute(character_id, "Herbalism").await.unwrap();

        assert_eq!(quote.pricing.tier, SkillTier::Primary);
        assert_eq!(quote.pricing.cost, 5);
        assert!(quote.affordable);
    }

    #[tokio::test]
    async fn when_quoted_character_is_retired_nothing_is_affordable() {
        let heritage = Heritage::new("Human", 10, 10);
        let archetype = Archetype::new("Advisor");
        let mut character = test_character(&heritage, archetype.id);
        character.retire("left the game", fixed_now()).unwrap();
        let character_id = character.id;

        let mut character_repo = MockCharacterRepo::new();
        let character_clone = character.clone();
        character_repo
            .expect_get()
            .returning(move |_| Ok(Some(character_clone.clone())));

        let use_case = QuoteSkill::new(
            Arc::new(character_repo),
            reference_with(heritage, archetype).await,
        );
        let quote = use_case.execute(character_id, "Bard").await.unwrap();
        assert!(!quote.affordable);
    }
}
