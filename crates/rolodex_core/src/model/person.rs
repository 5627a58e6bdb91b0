//! Person record.
//!
//! # Responsibility
//! - Hold one contact with optional phone/email, a tag set and a booking list.
//! - Derive edited copies (tags, bookings) without mutating the original.
//!
//! # Invariants
//! - Identity is the case-sensitive `Name`; it never changes on an instance.
//! - Tag count never exceeds `MAX_TAGS_PER_PERSON`.
//! - No two bookings held by one person conflict.

use crate::model::booking::{display_order, find_conflict, Booking, BookingConflict, BookingId};
use crate::model::fields::{Email, Name, Phone, Tag};
use chrono::NaiveDateTime;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum number of tags one person may carry.
pub const MAX_TAGS_PER_PERSON: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonError {
    /// `current` existing tags plus `attempted` new ones would pass `max`.
    TooManyTags {
        current: usize,
        attempted: usize,
        max: usize,
    },
    /// Two bookings in the same list share a date-time.
    ConflictingBookings(BookingConflict),
}

impl Display for PersonError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooManyTags {
                current,
                attempted,
                max,
            } => write!(
                f,
                "Tag limit exceeded: contact has {current} tag(s) and {attempted} more were \
                 requested, but a contact can have at most {max} tags."
            ),
            Self::ConflictingBookings(conflict) => {
                write!(f, "conflicting bookings: {conflict}")
            }
        }
    }
}

impl Error for PersonError {}

/// Outcome of removing a set of tags from a person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRemoval {
    pub person: Person,
    pub removed: Vec<Tag>,
    pub missing: Vec<Tag>,
}

/// Named contact with tags and bookings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    name: Name,
    phone: Option<Phone>,
    email: Option<Email>,
    tags: BTreeSet<Tag>,
    bookings: Vec<Booking>,
}

impl Person {
    /// Builds a person, enforcing the tag cap and booking conflict rule.
    pub fn new(
        name: Name,
        phone: Option<Phone>,
        email: Option<Email>,
        tags: impl IntoIterator<Item = Tag>,
        bookings: Vec<Booking>,
    ) -> Result<Self, PersonError> {
        let tags: BTreeSet<Tag> = tags.into_iter().collect();
        if tags.len() > MAX_TAGS_PER_PERSON {
            return Err(PersonError::TooManyTags {
                current: 0,
                attempted: tags.len(),
                max: MAX_TAGS_PER_PERSON,
            });
        }
        for (idx, booking) in bookings.iter().enumerate() {
            if let Some(existing) = find_conflict(&bookings[..idx], booking) {
                return Err(PersonError::ConflictingBookings(BookingConflict {
                    existing: existing.clone(),
                }));
            }
        }

        Ok(Self {
            name,
            phone,
            email,
            tags,
            bookings,
        })
    }

    /// Person with only a name.
    pub fn named(name: Name) -> Self {
        Self {
            name,
            phone: None,
            email: None,
            tags: BTreeSet::new(),
            bookings: Vec::new(),
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phone(&self) -> Option<&Phone> {
        self.phone.as_ref()
    }

    pub fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }

    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    /// Bookings in storage (insertion) order.
    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn is_same_person(&self, other: &Person) -> bool {
        self.name == other.name
    }

    /// Bookings in the order shown to users.
    pub fn bookings_in_display_order(&self, now: NaiveDateTime) -> Vec<&Booking> {
        display_order(&self.bookings, now)
    }

    /// Returns a copy with `tags` merged in and the tags that were actually new.
    pub fn with_tags_added<'a>(
        &self,
        tags: impl IntoIterator<Item = &'a Tag>,
    ) -> Result<(Person, Vec<Tag>), PersonError> {
        let added: Vec<Tag> = tags
            .into_iter()
            .filter(|tag| !self.tags.contains(*tag))
            .cloned()
            .collect::<BTreeSet<Tag>>()
            .into_iter()
            .collect();
        if self.tags.len() + added.len() > MAX_TAGS_PER_PERSON {
            return Err(PersonError::TooManyTags {
                current: self.tags.len(),
                attempted: added.len(),
                max: MAX_TAGS_PER_PERSON,
            });
        }

        let mut next = self.clone();
        next.tags.extend(added.iter().cloned());
        Ok((next, added))
    }

    /// Returns a copy without the requested tags, reporting which were absent.
    pub fn with_tags_removed<'a>(&self, tags: impl IntoIterator<Item = &'a Tag>) -> TagRemoval {
        let mut next = self.clone();
        let mut removed = Vec::new();
        let mut missing = Vec::new();
        for tag in tags {
            if next.tags.remove(tag) {
                removed.push(tag.clone());
            } else if !removed.contains(tag) && !missing.contains(tag) {
                missing.push(tag.clone());
            }
        }
        TagRemoval {
            person: next,
            removed,
            missing,
        }
    }

    /// Returns a copy with `booking` appended, unless it conflicts.
    pub fn with_booking(&self, booking: Booking) -> Result<Person, BookingConflict> {
        if let Some(existing) = find_conflict(&self.bookings, &booking) {
            return Err(BookingConflict {
                existing: existing.clone(),
            });
        }
        let mut next = self.clone();
        next.bookings.push(booking);
        Ok(next)
    }

    /// Returns a copy without the booking carrying `id`.
    pub fn without_booking(&self, id: BookingId) -> Person {
        let mut next = self.clone();
        next.bookings.retain(|booking| booking.id() != id);
        next
    }
}

impl Display for Person {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(phone) = &self.phone {
            write!(f, "; Phone: {phone}")?;
        }
        if let Some(email) = &self.email {
            write!(f, "; Email: {email}")?;
        }
        write!(f, "; Tags: ")?;
        for tag in &self.tags {
            write!(f, "{tag}")?;
        }
        Ok(())
    }
}
