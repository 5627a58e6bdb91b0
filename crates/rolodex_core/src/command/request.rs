//! Typed command requests produced by the parser.

use crate::model::fields::{ClientName, Description, Email, Name, Phone, Tag};
use crate::model::person::{Person, PersonError};
use crate::search::predicate::SearchCriteria;
use chrono::NaiveDateTime;
use std::collections::BTreeSet;
use std::num::NonZeroUsize;

/// One parsed command, consumed by the engine dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandRequest {
    Add(AddRequest),
    Delete(DeleteRequest),
    Book(BookRequest),
    Find(FindRequest),
    Clear { force: bool },
    Edit(EditRequest),
    List,
}

impl CommandRequest {
    pub fn command_word(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Delete(_) => "delete",
            Self::Book(_) => "book",
            Self::Find(_) => "find",
            Self::Clear { .. } => "clear",
            Self::Edit(_) => "edit",
            Self::List => "list",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddRequest {
    pub person: Person,
}

/// What a delete request removes from the resolved person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    Person,
    Tags(BTreeSet<Tag>),
    /// 1-based position in the person's displayed booking list.
    Booking(NonZeroUsize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    pub name: Name,
    pub target: DeleteTarget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRequest {
    pub person_name: Name,
    pub client_name: ClientName,
    pub datetime: NaiveDateTime,
    pub description: Description,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindRequest {
    pub criteria: SearchCriteria,
}

/// Field replacements for an edit. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonChanges {
    pub name: Option<Name>,
    /// `Some(None)` clears the phone.
    pub phone: Option<Option<Phone>>,
    /// `Some(None)` clears the email.
    pub email: Option<Option<Email>>,
    /// Replaces the whole tag set.
    pub tags: Option<BTreeSet<Tag>>,
}

impl PersonChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none() && self.email.is_none() && self.tags.is_none()
    }

    /// Builds the edited record; bookings carry over unchanged.
    pub fn apply_to(&self, person: &Person) -> Result<Person, PersonError> {
        Person::new(
            self.name.clone().unwrap_or_else(|| person.name().clone()),
            match &self.phone {
                Some(phone) => phone.clone(),
                None => person.phone().cloned(),
            },
            match &self.email {
                Some(email) => email.clone(),
                None => person.email().cloned(),
            },
            self.tags
                .clone()
                .unwrap_or_else(|| person.tags().clone()),
            person.bookings().to_vec(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    pub target: Name,
    pub changes: PersonChanges,
}
