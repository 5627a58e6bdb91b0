//! Command-boundary error taxonomy.
//!
//! # Responsibility
//! - Classify every recoverable failure a command can report.
//! - Render user-facing messages; format errors always carry usage.
//!
//! # Invariants
//! - A command that returns an error has not changed the directory.

use crate::command::usage::CommandUsage;
use crate::model::booking::Booking;
use crate::model::directory::DirectoryError;
use crate::model::fields::{FieldError, Name, Tag};
use crate::model::person::PersonError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// A field or record failed a domain constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Field(FieldError),
    Person(PersonError),
    /// `add` for an existing name with no tags to merge.
    DuplicateContact(Name),
    /// An edit would give the record the name of another person.
    DuplicatePerson(Name),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Field(err) => write!(f, "{err}"),
            Self::Person(err) => write!(f, "{err}"),
            Self::DuplicateContact(name) => write!(
                f,
                "'{name}' already exists in the directory.\n\
                 To add tags to this contact, use: add n/{name} t/TAG\n\
                 To change other details, use: edit n/{name} ..."
            ),
            Self::DuplicatePerson(name) => {
                write!(f, "This person already exists in the directory: {name}")
            }
        }
    }
}

impl Error for ValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Field(err) => Some(err),
            Self::Person(err) => Some(err),
            _ => None,
        }
    }
}

/// A referenced record does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFoundError {
    Person { query: String },
    /// Strict resolution found exactly one partial match and asks for the full name.
    PersonSuggestion { query: String, candidate: Name },
    Booking { person: Name, ordinal: usize },
    Tags { person: Name, tags: Vec<Tag> },
}

impl Display for NotFoundError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Person { query } => write!(f, "No such person found: {query}"),
            Self::PersonSuggestion { query, candidate } => write!(
                f,
                "No person named exactly '{query}'. Did you mean '{candidate}'? \
                 Please retype the full name."
            ),
            Self::Booking { person, ordinal } => {
                write!(f, "'{person}' does not have a booking with id {ordinal}")
            }
            Self::Tags { person, tags } => {
                write!(f, "'{person}' does not have the tag(s) ")?;
                for tag in tags {
                    write!(f, "{tag}")?;
                }
                Ok(())
            }
        }
    }
}

impl Error for NotFoundError {}

/// Error returned by parsing or executing one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    UnknownCommand(String),
    /// Malformed or missing arguments.
    Format {
        usage: CommandUsage,
        detail: Option<String>,
    },
    Validation(ValidationError),
    NotFound(NotFoundError),
    /// A name matched several persons; every candidate is listed.
    Ambiguous {
        query: String,
        candidates: Vec<String>,
    },
    /// A new booking collides with one already held by the same person.
    Conflict { person: Name, existing: Booking },
}

impl CommandError {
    pub fn format(usage: CommandUsage) -> Self {
        Self::Format {
            usage,
            detail: None,
        }
    }

    pub fn format_with(usage: CommandUsage, detail: impl Into<String>) -> Self {
        Self::Format {
            usage,
            detail: Some(detail.into()),
        }
    }

    /// Stable category label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownCommand(_) => "unknown_command",
            Self::Format { .. } => "format",
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "not_found",
            Self::Ambiguous { .. } => "ambiguous",
            Self::Conflict { .. } => "conflict",
        }
    }
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCommand(word) if word.is_empty() => write!(
                f,
                "Please enter a command.\nType 'help' to see the list of available commands."
            ),
            Self::UnknownCommand(word) => write!(
                f,
                "Sorry, I don't recognize the command '{word}'.\n\
                 Type 'help' to see the list of available commands."
            ),
            Self::Format { usage, detail } => {
                writeln!(f, "Invalid command format!")?;
                if let Some(detail) = detail {
                    writeln!(f, "{detail}")?;
                }
                write!(f, "{usage}")
            }
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(err) => write!(f, "{err}"),
            Self::Ambiguous { query, candidates } => write!(
                f,
                "Multiple matches for {query}:\n{}\nPlease retype the full name.",
                candidates.join("\n")
            ),
            Self::Conflict { person, existing } => write!(
                f,
                "{person} is already booked at {} with client '{}' for [{}].",
                existing.datetime_string(),
                existing.client_name(),
                existing.description()
            ),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FieldError> for CommandError {
    fn from(value: FieldError) -> Self {
        Self::Validation(ValidationError::Field(value))
    }
}

impl From<PersonError> for CommandError {
    fn from(value: PersonError) -> Self {
        Self::Validation(ValidationError::Person(value))
    }
}

impl From<DirectoryError> for CommandError {
    fn from(value: DirectoryError) -> Self {
        match value {
            DirectoryError::DuplicatePerson(name) => {
                Self::Validation(ValidationError::DuplicatePerson(name))
            }
            DirectoryError::PersonNotFound(name) => Self::NotFound(NotFoundError::Person {
                query: name.to_string(),
            }),
        }
    }
}
