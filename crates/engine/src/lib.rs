//! Tutorbook Engine library.
//!
//! Orchestrates the appointment domain against storage, notification and
//! user-directory adapters.
//!
//! ## Structure
//!
//! - `use_cases/` - User story orchestration over the appointment aggregate
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `config` / `telemetry` - Environment and logging bootstrap
//! - `app` - Application composition

pub mod app;
pub mod config;
pub mod infrastructure;
pub mod telemetry;
pub mod use_cases;

/// Shared helpers for unit tests.
#[cfg(test)]
pub mod test_fixtures;

pub use app::App;
pub use config::EngineConfig;
