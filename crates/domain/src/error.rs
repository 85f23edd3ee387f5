//! Unified error types for the domain layer
//!
//! Provides a common error type that can be used across all domain operations,
//! enabling consistent error handling without forcing adapters to use String or anyhow.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Entity not found
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Business rule violation
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),

    /// State transition not allowed
    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    /// A purchase costs more than the character can pay
    #[error("Insufficient experience: need {needed}, have {available}")]
    InsufficientExperience { needed: u32, available: u32 },
}

impl DomainError {
    /// Creates a validation error for business rule violations.
    ///
    /// Use this when domain invariants or constraints are violated:
    /// - Required fields are empty or missing
    /// - Values are outside allowed ranges
    /// - Business rules are not satisfied
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Create a constraint violation error
    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::Constraint(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an invalid state transition error
    pub fn invalid_state_transition(msg: impl Into<String>) -> Self {
        Self::InvalidStateTransition(msg.into())
    }

    /// Create an insufficient experience error
    pub fn insufficient_experience(needed: u32, available: u32) -> Self {
        Self::InsufficientExperience { needed, available }
    }
}
