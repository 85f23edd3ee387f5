//! Reference-data operation errors.

use emberfall_domain::{DomainError, HeritageId};

use crate::infrastructure::ports::RepoError;

#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    #[error("Heritage not found: {0}")]
    HeritageNotFound(HeritageId),
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
