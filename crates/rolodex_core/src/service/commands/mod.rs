//! Command executors.
//!
//! # Responsibility
//! - Apply one typed request to a directory snapshot.
//!
//! # Invariants
//! - Executors never mutate the input directory; they return a new snapshot.
//! - Every validation happens before the new snapshot is assembled, so an
//!   error leaves the caller's directory untouched.

pub mod add;
pub mod book;
pub mod clear;
pub mod delete;
pub mod edit;
pub mod find;
pub mod list;

use crate::model::directory::Directory;
use crate::model::fields::Tag;
use crate::service::resolver::NameResolver;
use chrono::NaiveDateTime;

/// Collaborators an executor may consult.
#[derive(Debug, Clone, Copy)]
pub struct ExecutionContext<'a> {
    pub resolver: &'a NameResolver,
    /// Splits future from past bookings.
    pub now: NaiveDateTime,
}

/// Result of one successful command.
#[derive(Debug, Clone)]
pub struct Execution {
    pub directory: Directory,
    pub feedback: String,
    /// True when persisted data changed (filter-only changes do not count).
    pub changed: bool,
}

impl Execution {
    pub fn changed(directory: Directory, feedback: impl Into<String>) -> Self {
        Self {
            directory,
            feedback: feedback.into(),
            changed: true,
        }
    }

    pub fn unchanged(directory: Directory, feedback: impl Into<String>) -> Self {
        Self {
            directory,
            feedback: feedback.into(),
            changed: false,
        }
    }
}

/// Renders tags as `[a][b]`.
pub(crate) fn render_tags<'a>(tags: impl IntoIterator<Item = &'a Tag>) -> String {
    tags.into_iter().map(ToString::to_string).collect()
}
