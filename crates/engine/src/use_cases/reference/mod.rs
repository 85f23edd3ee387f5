//! Reference-data use cases.
//!
//! Admin CRUD for the heritage/culture/archetype/skill tables, offline
//! validation of the skill-prerequisite graph, and the shared in-memory cache
//! every pricing surface reads from.

mod admin;
mod error;
mod service;
mod validate;

use std::sync::Arc;

pub use admin::{NewArchetype, NewCulture, NewHeritage, NewSkill, ReferenceAdmin};
pub use error::ReferenceError;
pub use service::ReferenceDataService;
pub use validate::{ValidateReferenceData, ValidationFinding, ValidationReport};

/// Container for reference-data use cases.
pub struct ReferenceUseCases {
    pub admin: Arc<ReferenceAdmin>,
    pub validate: Arc<ValidateReferenceData>,
}

impl ReferenceUseCases {
    pub fn new(admin: Arc<ReferenceAdmin>, validate: Arc<ValidateReferenceData>) -> Self {
        Self { admin, validate }
    }
}
