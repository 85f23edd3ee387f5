//! Chapter entity - an organizational unit running its own events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::ChapterId;
use crate::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    pub id: ChapterId,
    pub name: String,
    /// Free-form location text ("Pacific Northwest", "Berlin", ...)
    pub region: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Chapter {
    pub fn new(name: impl Into<String>, region: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: ChapterId::new(),
            name: name.into(),
            region: region.into(),
            active: true,
            created_at: now,
        }
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("Chapter name cannot be empty"));
        }
        Ok(())
    }
}
