//! Purchase skill use case.
//!
//! Prices the skill against the character's heritage and archetype(s), checks
//! the prerequisite one link back, and commits through the repository's
//! conditional spend so a concurrent purchase cannot overdraw the balance.

use std::sync::Arc;

use emberfall_domain::{
    can_afford, CharacterId, ExperienceEntry, ExperienceEntryKind, SkillPricing,
};

use crate::infrastructure::ports::{CharacterRepo, ClockPort};
use crate::use_cases::reference::ReferenceDataService;

use super::error::CharacterError;

#[derive(Debug, Clone)]
pub struct SkillPurchaseReceipt {
    pub character_id: CharacterId,
    pub skill: String,
    pub pricing: SkillPricing,
    pub remaining_experience: u32,
}

pub struct PurchaseSkill {
    character_repo: Arc<dyn CharacterRepo>,
    reference: Arc<ReferenceDataService>,
    clock: Arc<dyn ClockPort>,
}

impl PurchaseSkill {
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
        skill_name: &str,
    ) -> Result<SkillPurchaseReceipt, CharacterError> {
        let mut character = self
            .character_repo
            .get(character_id)
            .await?
            .ok_or(CharacterError::CharacterNotFound(character_id))?;

        character.ensure_can_spend()?;

        // A skill row may be absent from the table; it still prices (at the
        // default tier) and simply has no prerequisite to check.
        if let Some(prerequisite) = self
            .reference
            .skill_by_name(skill_name)
            .and_then(|s| s.prerequisite)
        {
            if !character.has_skill(&prerequisite) {
                return Err(CharacterError::PrerequisiteNotMet {
                    skill: skill_name.to_string(),
                    prerequisite,
                });
            }
        }

        let pricing = super::pricing::price_skill(&self.reference, &character, skill_name);
        if !can_afford(character.experience, pricing.cost) {
            return Err(CharacterError::InsufficientExperience {
                needed: pricing.cost,
                available: character.experience,
            });
        }

        let now = self.clock.now();
        let available_before = character.experience;
        character.learn_skill(skill_name.to_string(), now)?;

        let entry = ExperienceEntry::spend(
            character.id,
            ExperienceEntryKind::SkillPurchase,
            pricing.cost,
            skill_name.to_string(),
            now,
        );
        let accepted = self
            .character_repo
            .commit_spend(&character, pricing.cost, &entry)
            .await?;
        if !accepted {
            // The stored balance moved under us; report against the snapshot.
            return Err(CharacterError::InsufficientExperience {
                needed: pricing.cost,
                available: available_before,
            });
        }

        tracing::info!(
            character_id = %character.id,
            skill = skill_name,
            tier = %pricing.tier,
            cost = pricing.cost,
            "Purchased skill"
        );

        Ok(SkillPurchaseReceipt {
            character_id: character.id,
            skill: skill_name.to_string(),
            pricing,
            remaining_experience: available_before - pricing.cost,
        })
    }
}
