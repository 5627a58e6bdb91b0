//! Contact directory domain model.
//!
//! # Responsibility
//! - Define validated field values, bookings, persons and the directory.
//! - Keep every record immutable once shared; edits produce new records.
//!
//! # Invariants
//! - A `Person` is identified by its case-sensitive `Name`.
//! - No person holds two bookings at the same instant.

pub mod booking;
pub mod directory;
pub mod fields;
pub mod person;
