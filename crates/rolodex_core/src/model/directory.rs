//! In-memory person directory.
//!
//! # Responsibility
//! - Hold every person keyed by name identity, in directory order.
//! - Track the active display filter and the booking identifier allocator.
//!
//! # Invariants
//! - At most one person per `Name`.
//! - Persons are shared as `Arc<Person>` and only ever swapped whole; callers
//!   holding an older `Arc` keep seeing the record they were given.
//! - Cloning a directory yields an independent snapshot.

use crate::model::booking::{BookingId, BookingIdAllocator};
use crate::model::fields::Name;
use crate::model::person::Person;
use crate::search::predicate::PersonFilter;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    DuplicatePerson(Name),
    PersonNotFound(Name),
}

impl Display for DirectoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicatePerson(name) => write!(f, "person already exists: {name}"),
            Self::PersonNotFound(name) => write!(f, "person not found: {name}"),
        }
    }
}

impl Error for DirectoryError {}

#[derive(Debug, Clone, Default)]
pub struct Directory {
    persons: Vec<Arc<Person>>,
    filter: PersonFilter,
    booking_ids: BookingIdAllocator,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a directory from loaded persons.
    ///
    /// The booking allocator is seeded past the largest loaded booking id.
    pub fn from_persons(
        persons: impl IntoIterator<Item = Person>,
    ) -> Result<Self, DirectoryError> {
        let mut directory = Self::new();
        for person in persons {
            for booking in person.bookings() {
                directory.booking_ids.observe(booking.id());
            }
            directory.add(person)?;
        }
        Ok(directory)
    }

    pub fn has(&self, name: &Name) -> bool {
        self.position(name).is_some()
    }

    pub fn has_person(&self, person: &Person) -> bool {
        self.has(person.name())
    }

    pub fn get(&self, name: &Name) -> Option<Arc<Person>> {
        self.position(name).map(|idx| Arc::clone(&self.persons[idx]))
    }

    pub fn add(&mut self, person: Person) -> Result<(), DirectoryError> {
        if self.has(person.name()) {
            return Err(DirectoryError::DuplicatePerson(person.name().clone()));
        }
        for booking in person.bookings() {
            self.booking_ids.observe(booking.id());
        }
        self.persons.push(Arc::new(person));
        Ok(())
    }

    pub fn remove(&mut self, name: &Name) -> Result<Arc<Person>, DirectoryError> {
        let idx = self
            .position(name)
            .ok_or_else(|| DirectoryError::PersonNotFound(name.clone()))?;
        Ok(self.persons.remove(idx))
    }

    /// Swaps the record named `old` for `replacement`, keeping its position.
    ///
    /// Renames are allowed as long as the new name is not held by someone else.
    pub fn replace(&mut self, old: &Name, replacement: Person) -> Result<(), DirectoryError> {
        let idx = self
            .position(old)
            .ok_or_else(|| DirectoryError::PersonNotFound(old.clone()))?;
        if replacement.name() != old && self.has(replacement.name()) {
            return Err(DirectoryError::DuplicatePerson(replacement.name().clone()));
        }
        for booking in replacement.bookings() {
            self.booking_ids.observe(booking.id());
        }
        self.persons[idx] = Arc::new(replacement);
        Ok(())
    }

    /// Every person in directory order.
    pub fn persons(&self) -> &[Arc<Person>] {
        &self.persons
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    pub fn set_filter(&mut self, filter: PersonFilter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> &PersonFilter {
        &self.filter
    }

    /// Persons passing the active filter, in directory order.
    pub fn displayed(&self) -> Vec<Arc<Person>> {
        self.persons
            .iter()
            .filter(|person| self.filter.matches(person))
            .cloned()
            .collect()
    }

    pub fn allocate_booking_id(&mut self) -> BookingId {
        self.booking_ids.allocate()
    }

    /// Raises the allocator to at least `next`, e.g. from a persisted counter.
    pub fn reserve_booking_ids(&mut self, next: BookingId) {
        self.booking_ids.reserve_from(next);
    }

    pub fn booking_ids(&self) -> &BookingIdAllocator {
        &self.booking_ids
    }

    /// Empty directory that keeps allocating ids after the ones already used.
    pub fn cleared(&self) -> Self {
        Self {
            persons: Vec::new(),
            filter: PersonFilter::All,
            booking_ids: self.booking_ids.clone(),
        }
    }

    fn position(&self, name: &Name) -> Option<usize> {
        self.persons.iter().position(|person| person.name() == name)
    }
}
