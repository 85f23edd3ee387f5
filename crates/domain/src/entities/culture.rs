//! Culture entity - a culture within a heritage
//!
//! Reference data. Each culture belongs to exactly one heritage and carries its
//! own skill lists for flavor/admin tooling; pricing is driven by heritage and
//! archetype lists only.

use serde::{Deserialize, Serialize};

use crate::ids::{CultureId, HeritageId};
use crate::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Culture {
    pub id: CultureId,
    pub heritage_id: HeritageId,
    pub name: String,
    pub primary_skills: Vec<String>,
    pub secondary_skills: Vec<String>,
    pub description: String,
}

impl Culture {
    pub fn new(heritage_id: HeritageId, name: impl Into<String>) -> Self {
        Self {
            id: CultureId::new(),
            heritage_id,
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

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("Culture name cannot be empty"));
        }
        Ok(())
    }
}
