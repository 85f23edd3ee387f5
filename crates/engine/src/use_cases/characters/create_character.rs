//! Create character use case.
//!
//! Validates the heritage/culture/archetype references, prices the creation
//! selections against the 25-XP budget, and persists the character together
//! with its opening ledger entries in one transaction.

use std::sync::Arc;

use emberfall_domain::{
    classify_skill, economy, summarize, ArchetypeId, Character, CultureId, ExperienceEntry,
    ExperienceEntryKind, HeritageId, SpendingSnapshot, UserId,
};

use crate::infrastructure::ports::{CharacterRepo, ClockPort, UserRepo};
use crate::use_cases::reference::ReferenceDataService;

use super::error::CharacterError;

#[derive(Debug, Clone)]
pub struct CreateCharacterInput {
    pub user_id: UserId,
    pub name: String,
    pub heritage_id: HeritageId,
    pub culture_id: CultureId,
    pub archetype_id: ArchetypeId,
    /// Skill names selected at creation, in purchase order
    pub skills: Vec<String>,
    /// Body points purchased above the heritage base
    pub body_points: u32,
    /// Stamina points purchased above the heritage base
    pub stamina_points: u32,
}

pub struct CreateCharacter {
    character_repo: Arc<dyn CharacterRepo>,
    user_repo: Arc<dyn UserRepo>,
    reference: Arc<ReferenceDataService>,
    clock: Arc<dyn ClockPort>,
}

impl CreateCharacter {
    pub fn new(
        character_repo: Arc<dyn CharacterRepo>,
        user_repo: Arc<dyn UserRepo>,
        reference: Arc<ReferenceDataService>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            character_repo,
            user_repo,
            reference,
            clock,
        }
    }

    pub async fn execute(&self, input: CreateCharacterInput) -> Result<Character, CharacterError> {
        self.user_repo
            .get(input.user_id)
            .await?
            .ok_or(CharacterError::UserNotFound(input.user_id))?;

        let heritage = self
            .reference
            .heritage(input.heritage_id)
            .ok_or(CharacterError::HeritageNotFound(input.heritage_id))?;
        let culture = self
            .reference
            .culture(input.culture_id)
            .ok_or(CharacterError::CultureNotFound(input.culture_id))?;
        let archetype = self
            .reference
            .archetype(input.archetype_id)
            .ok_or(CharacterError::ArchetypeNotFound(input.archetype_id))?;

        if culture.heritage_id != heritage.id {
            return Err(CharacterError::CultureMismatch {
                culture: culture.id,
                heritage: heritage.id,
            });
        }

        let now = self.clock.now();
        let mut character = Character::new(
            input.user_id,
            input.name,
            &heritage,
            input.culture_id,
            input.archetype_id,
            now,
        );
        character.validate()?;

        // Price every selected skill; prerequisites may be satisfied by
        // earlier selections in the same list.
        let mut skill_costs = Vec::with_capacity(input.skills.len());
        for skill_name in &input.skills {
            if let Some(prerequisite) = self
                .reference
                .skill_by_name(skill_name)
                .and_then(|s| s.prerequisite)
            {
                if !character.has_skill(&prerequisite) {
                    return Err(CharacterError::PrerequisiteNotMet {
                        skill: skill_name.clone(),
                        prerequisite,
                    });
                }
            }
            let pricing = classify_skill(skill_name, &heritage, &archetype, None);
            character.learn_skill(skill_name.clone(), now)?;
            skill_costs.push(pricing.cost);
        }

        if input.body_points > 0 {
            character.increase_body(input.body_points, now)?;
        }
        if input.stamina_points > 0 {
            character.increase_stamina(input.stamina_points, now)?;
        }

        let totals = summarize(&SpendingSnapshot {
            skill_costs: &skill_costs,
            base_body: heritage.base_body,
            base_stamina: heritage.base_stamina,
            current_body: character.body,
            current_stamina: character.stamina,
            second_archetype: false,
        });
        if totals.spent > economy::CREATION_XP_BUDGET {
            return Err(CharacterError::InsufficientExperience {
                needed: totals.spent,
                available: economy::CREATION_XP_BUDGET,
            });
        }
        character.experience = economy::CREATION_XP_BUDGET - totals.spent;

        let mut opening_entries = Vec::new();
        for (skill_name, cost) in input.skills.iter().zip(&skill_costs) {
            opening_entries.push(ExperienceEntry::spend(
                character.id,
                ExperienceEntryKind::SkillPurchase,
                *cost,
                skill_name.clone(),
                now,
            ));
        }
        if totals.attribute_cost > 0 {
            let note = format!(
                "Creation attributes: Body {} -> {}, Stamina {} -> {}",
                heritage.base_body, character.body, heritage.base_stamina, character.stamina
            );
            opening_entries.push(ExperienceEntry::spend(
                character.id,
                ExperienceEntryKind::AttributePurchase,
                totals.attribute_cost,
                note,
                now,
            ));
        }

        self.character_repo
            .create(&character, &opening_entries)
            .await?;

        tracing::info!(
            character_id = %character.id,
            user_id = %character.user_id,
            spent = totals.spent,
            remaining = character.experience,
            "Created character"
        );

        Ok(character)
    }
}
