//! Domain Events
//!
//! Coarse-grained events describing what changed between two snapshots of an
//! appointment. The engine uses them to pick notifications and to log state
//! changes; the core itself never dispatches them.

pub mod appointment_events;

pub use appointment_events::*;
