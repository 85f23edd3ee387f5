//! Admin tooling for the reference tables and rarity settings.

use std::sync::Arc;

use emberfall_domain::{
    Archetype, Culture, Heritage, HeritageId, RaritySettings, Skill,
};

use crate::infrastructure::ports::{
    ArchetypeRepo, CultureRepo, HeritageRepo, SettingsRepo, SkillRepo,
};

use super::error::ReferenceError;
use super::service::ReferenceDataService;

#[derive(Debug, Clone)]
pub struct NewHeritage {
    pub name: String,
    pub base_body: u32,
    pub base_stamina: u32,
    pub secondary_skills: Vec<String>,
    pub benefit: String,
    pub weakness: String,
    pub costume_requirement: String,
}

#[derive(Debug, Clone)]
pub struct NewCulture {
    pub heritage_id: HeritageId,
    pub name: String,
    pub primary_skills: Vec<String>,
    pub secondary_skills: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct NewArchetype {
    pub name: String,
    pub primary_skills: Vec<String>,
    pub secondary_skills: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct NewSkill {
    pub name: String,
    pub description: Option<String>,
    pub prerequisite: Option<String>,
}

/// Creates and updates reference rows, keeping the cache in step.
pub struct ReferenceAdmin {
    heritage_repo: Arc<dyn HeritageRepo>,
    culture_repo: Arc<dyn CultureRepo>,
    archetype_repo: Arc<dyn ArchetypeRepo>,
    skill_repo: Arc<dyn SkillRepo>,
    settings_repo: Arc<dyn SettingsRepo>,
    reference: Arc<ReferenceDataService>,
}

impl ReferenceAdmin {
    pub fn new(
        heritage_repo: Arc<dyn HeritageRepo>,
        culture_repo: Arc<dyn CultureRepo>,
        archetype_repo: Arc<dyn ArchetypeRepo>,
        skill_repo: Arc<dyn SkillRepo>,
        settings_repo: Arc<dyn SettingsRepo>,
        reference: Arc<ReferenceDataService>,
    ) -> Self {
        Self {
            heritage_repo,
            culture_repo,
            archetype_repo,
            skill_repo,
            settings_repo,
            reference,
        }
    }

    pub async fn create_heritage(&self, input: NewHeritage) -> Result<Heritage, ReferenceError> {
        let heritage = Heritage::new(input.name, input.base_body, input.base_stamina)
            .with_secondary_skills(input.secondary_skills)
            .with_benefit(input.benefit)
            .with_weakness(input.weakness)
            .with_costume_requirement(input.costume_requirement);
        heritage.validate()?;

        self.heritage_repo.save(&heritage).await?;
        self.reference.reload().await?;
        tracing::info!(heritage_id = %heritage.id, name = %heritage.name, "Created heritage");
        Ok(heritage)
    }

    pub async fn create_culture(&self, input: NewCulture) -> Result<Culture, ReferenceError> {
        if self.heritage_repo.get(input.heritage_id).await?.is_none() {
            return Err(ReferenceError::HeritageNotFound(input.heritage_id));
        }

        let culture = Culture::new(input.heritage_id, input.name)
            .with_primary_skills(input.primary_skills)
            .with_secondary_skills(input.secondary_skills)
            .with_description(input.description);
        culture.validate()?;

        self.culture_repo.save(&culture).await?;
        self.reference.reload().await?;
        tracing::info!(culture_id = %culture.id, name = %culture.name, "Created culture");
        Ok(culture)
    }

    pub async fn create_archetype(&self, input: NewArchetype) -> Result<Archetype, ReferenceError> {
        let archetype = Archetype::new(input.name)
            .with_primary_skills(input.primary_skills)
            .with_secondary_skills(input.secondary_skills)
            .with_description(input.description);
        archetype.validate()?;

        self.archetype_repo.save(&archetype).await?;
        self.reference.reload().await?;
        tracing::info!(archetype_id = %archetype.id, name = %archetype.name, "Created archetype");
        Ok(archetype)
    }

    pub async fn create_skill(&self, input: NewSkill) -> Result<Skill, ReferenceError> {
        let mut skill = Skill::new(input.name);
        if let Some(description) = input.description {
            skill = skill.with_description(description);
        }
        if let Some(prerequisite) = input.prerequisite {
            skill = skill.with_prerequisite(prerequisite);
        }
        skill.validate()?;

        self.skill_repo.save(&skill).await?;
        self.reference.reload().await?;
        tracing::info!(skill_id = %skill.id, name = %skill.name, "Created skill");
        Ok(skill)
    }

    /// Current rarity thresholds, falling back to the defaults.
    pub async fn get_rarity(&self) -> Result<RaritySettings, ReferenceError> {
        Ok(self
            .settings_repo
            .get_rarity()
            .await?
            .unwrap_or_default())
    }

    /// Replace the rarity thresholds. Rejected whole when the ordering rule
    /// is violated - nothing is written.
    pub async fn update_rarity(
        &self,
        settings: RaritySettings,
    ) -> Result<RaritySettings, ReferenceError> {
        settings.validate()?;
        self.settings_repo.save_rarity(&settings).await?;
        Ok(settings)
    }
}
