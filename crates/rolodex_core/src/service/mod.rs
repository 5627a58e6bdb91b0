//! Command use-case services.
//!
//! # Responsibility
//! - Resolve names, execute commands and hold the live directory snapshot.
//! - Keep the CLI decoupled from parsing and storage details.

pub mod clock;
pub mod commands;
pub mod engine;
pub mod resolver;
