//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete
//! types. Ports exist for:
//! - Database access (could swap SQLite -> Postgres)
//! - Clock (for testing)

mod error;
mod repos;
mod testing;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::*;

// =============================================================================
// Test-Only Mock Repositories (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use repos::{
    MockArchetypeRepo, MockCandleRepo, MockChapterRepo, MockCharacterRepo, MockCultureRepo,
    MockEventRepo, MockHeritageRepo, MockSettingsRepo, MockSkillRepo, MockUserRepo,
};

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::ClockPort;

#[cfg(test)]
pub use testing::MockClockPort;

// =============================================================================
// Error Types
// =============================================================================
pub use error::RepoError;
