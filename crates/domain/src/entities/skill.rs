//! Skill entity - purchasable character skills
//!
//! Reference data. A skill may name another skill as its prerequisite; the
//! prerequisite must already be learned before the skill can be purchased.
//! The prerequisite relation is expected to be acyclic - validated offline by
//! reference-data validation, not at purchase time.

use serde::{Deserialize, Serialize};

use crate::ids::SkillId;
use crate::DomainError;

/// A skill that characters can purchase with experience
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    pub description: Option<String>,
    /// Name of the skill that must be learned before this one
    pub prerequisite: Option<String>,
}

impl Skill {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: SkillId::new(),
            name: name.into(),
            description: None,
            prerequisite: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_prerequisite(mut self, prerequisite: impl Into<String>) -> Self {
        self.prerequisite = Some(prerequisite.into());
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("Skill name cannot be empty"));
        }
        if let Some(prereq) = &self.prerequisite {
            if prereq == &self.name {
                return Err(DomainError::validation(format!(
                    "Skill {} cannot be its own prerequisite",
                    self.name
                )));
            }
        }
        Ok(())
    }
}
