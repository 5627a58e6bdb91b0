//! Persisted record shapes for directories.
//!
//! # Responsibility
//! - Define the serde wire shape shared by SQLite loading and JSON export.
//! - Convert records to domain values through the same field validators the
//!   command parser uses.
//!
//! # Invariants
//! - Converting a record never bypasses validation; invalid data is an error.
//! - Booking ids are decimal strings on the wire.
//! - A rebuilt directory allocates booking ids above every loaded id.

use crate::model::booking::{Booking, BookingId};
use crate::model::directory::{Directory, DirectoryError};
use crate::model::fields::{
    parse_booking_datetime, ClientName, Description, Email, FieldError, Name, Phone, Tag,
};
use crate::model::person::{Person, PersonError};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// A record could not be turned into a domain value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    Field {
        context: String,
        source: FieldError,
    },
    BookingId {
        context: String,
        value: String,
    },
    Person {
        name: String,
        source: PersonError,
    },
    Directory(DirectoryError),
}

impl Display for RecordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Field { context, source } => write!(f, "{context}: {source}"),
            Self::BookingId { context, value } => {
                write!(f, "{context}: invalid booking id `{value}`")
            }
            Self::Person { name, source } => write!(f, "person `{name}`: {source}"),
            Self::Directory(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RecordError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Field { source, .. } => Some(source),
            Self::Person { source, .. } => Some(source),
            Self::Directory(err) => Some(err),
            Self::BookingId { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub id: String,
    pub client_name: String,
    /// `YYYY-MM-DD HH:MM`.
    pub datetime: String,
    pub description: String,
}

impl BookingRecord {
    pub fn from_booking(booking: &Booking) -> Self {
        Self {
            id: booking.id().to_string(),
            client_name: booking.client_name().to_string(),
            datetime: booking.datetime_string(),
            description: booking.description().to_string(),
        }
    }

    pub fn to_booking(&self, owner: &str) -> Result<Booking, RecordError> {
        let context = format!("booking `{}` of `{owner}`", self.id);
        let id = self
            .id
            .parse::<BookingId>()
            .map_err(|_| RecordError::BookingId {
                context: format!("person `{owner}`"),
                value: self.id.clone(),
            })?;
        let field = |source: FieldError| RecordError::Field {
            context: context.clone(),
            source,
        };

        Ok(Booking::new(
            id,
            ClientName::parse(&self.client_name).map_err(field)?,
            parse_booking_datetime(&self.datetime).map_err(field)?,
            Description::parse(&self.description).map_err(field)?,
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub bookings: Vec<BookingRecord>,
}

impl PersonRecord {
    pub fn from_person(person: &Person) -> Self {
        Self {
            name: person.name().to_string(),
            phone: person.phone().map(ToString::to_string),
            email: person.email().map(ToString::to_string),
            tags: person.tags().iter().map(|tag| tag.as_str().to_string()).collect(),
            bookings: person
                .bookings()
                .iter()
                .map(BookingRecord::from_booking)
                .collect(),
        }
    }

    pub fn to_person(&self) -> Result<Person, RecordError> {
        let field = |source: FieldError| RecordError::Field {
            context: format!("person `{}`", self.name),
            source,
        };

        let name = Name::parse(&self.name).map_err(field)?;
        let phone = self
            .phone
            .as_deref()
            .map(Phone::parse)
            .transpose()
            .map_err(field)?;
        let email = self
            .email
            .as_deref()
            .map(Email::parse)
            .transpose()
            .map_err(field)?;
        let tags = self
            .tags
            .iter()
            .map(|tag| Tag::parse(tag))
            .collect::<Result<Vec<_>, _>>()
            .map_err(field)?;
        let bookings = self
            .bookings
            .iter()
            .map(|booking| booking.to_booking(&self.name))
            .collect::<Result<Vec<_>, _>>()?;

        Person::new(name, phone, email, tags, bookings).map_err(|source| RecordError::Person {
            name: self.name.clone(),
            source,
        })
    }
}

/// Whole-directory record, in directory order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryRecord {
    pub persons: Vec<PersonRecord>,
    /// Allocator position at save time; survives a `clear`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_booking_id: Option<u64>,
}

impl DirectoryRecord {
    pub fn from_directory(directory: &Directory) -> Self {
        Self {
            persons: directory
                .persons()
                .iter()
                .map(|person| PersonRecord::from_person(person))
                .collect(),
            next_booking_id: Some(directory.booking_ids().peek().get()),
        }
    }

    pub fn to_directory(&self) -> Result<Directory, RecordError> {
        let persons = self
            .persons
            .iter()
            .map(PersonRecord::to_person)
            .collect::<Result<Vec<_>, _>>()?;
        let mut directory = Directory::from_persons(persons).map_err(RecordError::Directory)?;
        if let Some(next) = self.next_booking_id {
            directory.reserve_booking_ids(BookingId::new(next));
        }
        Ok(directory)
    }
}

#[cfg(test)]
mod tests {
    use super::{BookingRecord, DirectoryRecord, PersonRecord, RecordError};
    use crate::model::booking::BookingId;
    use crate::model::fields::FieldError;

    fn alice() -> PersonRecord {
        PersonRecord {
            name: "Alice Tan".to_string(),
            phone: Some("98765432".to_string()),
            email: None,
            tags: vec!["vip".to_string()],
            bookings: vec![BookingRecord {
                id: "41".to_string(),
                client_name: "Mr Lim".to_string(),
                datetime: "2025-12-25 14:00".to_string(),
                description: "No description provided".to_string(),
            }],
        }
    }

    #[test]
    fn loaded_ids_seed_the_allocator() {
        let record = DirectoryRecord {
            persons: vec![alice()],
            next_booking_id: None,
        };
        let mut directory = record.to_directory().unwrap();
        assert_eq!(directory.allocate_booking_id(), BookingId::new(42));
    }

    #[test]
    fn persisted_counter_wins_when_larger() {
        let record = DirectoryRecord {
            persons: Vec::new(),
            next_booking_id: Some(90),
        };
        let mut directory = record.to_directory().unwrap();
        assert_eq!(directory.allocate_booking_id(), BookingId::new(90));
    }

    #[test]
    fn impossible_dates_are_rejected_on_load() {
        let mut person = alice();
        person.bookings[0].datetime = "2025-02-31 10:00".to_string();
        match person.to_person().unwrap_err() {
            RecordError::Field { source, .. } => assert!(matches!(
                source,
                FieldError::DateNotInCalendar {
                    year: 2025,
                    month: 2,
                    day: 31
                }
            )),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn non_numeric_booking_id_is_rejected() {
        let mut person = alice();
        person.bookings[0].id = "b-1".to_string();
        assert!(matches!(
            person.to_person(),
            Err(RecordError::BookingId { .. })
        ));
    }
}
