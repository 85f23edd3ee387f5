//! Archetype entity - a character's class/role
//!
//! Fixes the primary- and secondary-skill discount lists. A character picks one
//! archetype at creation and may buy a second one later for a flat XP cost.

use serde::{Deserialize, Serialize};

use crate::ids::ArchetypeId;
use crate::DomainError;

/// An archetype (class/role) that discounts its listed skills
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Archetype {
    pub id: ArchetypeId,
    pub name: String,
    /// Skill names priced at the primary tier
    pub primary_skills: Vec<String>,
    /// Skill names priced at the secondary tier
    pub secondary_skills: Vec<String>,
    pub description: String,
}

impl Archetype {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ArchetypeId::new(),
            name: name.into(),
            primary_skills: Vec::new(),
            secondary_skills: Vec::new(),
            description: String::new(),
        }
    }

    pub fn with_primary_skills(mut self, skills: Vec<String>) -> Self {
        self.primary_skills = skills;
        self
    }

    pub fn with_secondary_skills(mut self, skills: Vec<String>) -> Self {
        self.secondary_skills = skills;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_primary_skill(&self, skill_name: &str) -> bool {
        self.primary_skills.iter().any(|s| s == skill_name)
    }

    pub fn is_secondary_skill(&self, skill_name: &str) -> bool {
        self.secondary_skills.iter().any(|s| s == skill_name)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("Archetype name cannot be empty"));
        }
        Ok(())
    }
}
