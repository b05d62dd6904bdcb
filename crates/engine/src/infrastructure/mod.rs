//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod clock;
pub mod memory_repo;
pub mod notifications;
pub mod ports;
pub mod user_directory;
