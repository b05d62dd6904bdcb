//! Aggregate roots - domain objects that own their related data
//!
//! Each aggregate:
//! - Has a unique identity
//! - Owns all its constituent parts
//! - Exposes behavior through methods, not public fields
//! - Describes its own changes as domain events

pub mod appointment;

pub use appointment::{
    AppointmentAggregate, AppointmentPatch, AppointmentRecord, AppointmentView,
    ChecklistItemRecord, NewAppointment,
};
