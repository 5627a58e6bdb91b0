//! Core domain logic for the rolodex contact directory.
//! This crate owns every directory invariant; the CLI only moves text around.

pub mod command;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use command::error::{CommandError, NotFoundError, ValidationError};
pub use command::parser::parse_command;
pub use command::request::CommandRequest;
pub use config::{ConfigError, EngineConfig, LogConfig, LogLevel, PartialMatchPolicy};
pub use db::{open_db, open_db_in_memory, DbError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::booking::{Booking, BookingId};
pub use model::directory::Directory;
pub use model::person::Person;
pub use repo::directory_repo::{
    DirectoryRepository, RepoError, RepoResult, SqliteDirectoryRepository,
};
pub use repo::records::{BookingRecord, DirectoryRecord, PersonRecord};
pub use service::clock::{Clock, FixedClock, SystemClock};
pub use service::engine::{CommandEngine, CommandOutcome};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
