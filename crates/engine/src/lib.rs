//! Emberfall Engine library.
//!
//! This crate contains all server-side code for the Emberfall campaign
//! manager.
//!
//! ## Structure
//!
//! - `use_cases/` - User story orchestration over repository ports
//! - `infrastructure/` - Ports and their SQLite adapters
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
