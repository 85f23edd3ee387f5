//! Heritage entity - a character's species/ancestry
//!
//! Fixes base Body/Stamina and the secondary-skill discount list. Immutable
//! reference data; a character's heritage is set at creation and never changes.

use serde::{Deserialize, Serialize};

use crate::ids::HeritageId;
use crate::DomainError;

/// A heritage (species/ancestry) that characters are created from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Heritage {
    pub id: HeritageId,
    pub name: String,
    /// Base Body value for characters of this heritage
    pub base_body: u32,
    /// Base Stamina value for characters of this heritage
    pub base_stamina: u32,
    /// Skill names priced at the secondary tier for this heritage
    pub secondary_skills: Vec<String>,
    pub benefit: String,
    pub weakness: String,
    pub costume_requirement: String,
}

impl Heritage {
    pub fn new(name: impl Into<String>, base_body: u32, base_stamina: u32) -> Self {
        Self {
            id: HeritageId::new(),
            name: name.into(),
            base_body,
            base_stamina,
            secondary_skills: Vec::new(),
            benefit: String::new(),
            weakness: String::new(),
            costume_requirement: String::new(),
        }
    }

    pub fn with_secondary_skills(mut self, skills: Vec<String>) -> Self {
        self.secondary_skills = skills;
        self
    }

    pub fn with_benefit(mut self, benefit: impl Into<String>) -> Self {
        self.benefit = benefit.into();
        self
    }

    pub fn with_weakness(mut self, weakness: impl Into<String>) -> Self {
        self.weakness = weakness.into();
        self
    }

    pub fn with_costume_requirement(mut self, requirement: impl Into<String>) -> Self {
        self.costume_requirement = requirement.into();
        self
    }

    /// Whether this heritage prices the named skill at the secondary tier
    pub fn has_secondary_skill(&self, skill_name: &str) -> bool {
        self.secondary_skills.iter().any(|s| s == skill_name)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("Heritage name cannot be empty"));
        }
        Ok(())
    }
}
