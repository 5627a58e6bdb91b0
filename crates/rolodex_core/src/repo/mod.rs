//! Directory persistence.
//!
//! # Responsibility
//! - Define the persisted record shape and the repository contract.
//! - Keep SQLite details out of the engine.
//!
//! # Invariants
//! - Loaded data passes the same validators as typed commands.

pub mod directory_repo;
pub mod records;
