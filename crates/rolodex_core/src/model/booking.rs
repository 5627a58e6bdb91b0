//! Booking value objects, identifier allocation and the conflict rule.
//!
//! # Responsibility
//! - Define the immutable booking record owned by one person.
//! - Allocate booking identifiers without hidden process-wide state.
//! - Own the same-instant conflict rule and the display ordering of bookings.
//!
//! # Invariants
//! - Two bookings conflict iff their date-times are equal.
//! - An allocator never hands out an identifier it has already seen.
//! - Display order is future bookings ascending, then past bookings ascending.

use crate::model::fields::{format_booking_datetime, ClientName, Description};
use chrono::NaiveDateTime;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Stable booking identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BookingId(u64);

impl BookingId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl Display for BookingId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BookingId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(Self)
    }
}

/// Monotonic booking identifier source.
///
/// Seeded from the largest identifier seen at load time, so fresh bookings
/// never collide with reloaded ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingIdAllocator {
    next: u64,
}

impl Default for BookingIdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl BookingIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an allocator whose next identifier is `next`. Values below 1 clamp to 1.
    pub fn starting_at(next: u64) -> Self {
        Self { next: next.max(1) }
    }

    /// Records an externally assigned identifier.
    pub fn observe(&mut self, id: BookingId) {
        if id.0 >= self.next {
            self.next = id.0.saturating_add(1);
        }
    }

    /// Never hand out anything below `next`.
    pub fn reserve_from(&mut self, next: BookingId) {
        self.next = self.next.max(next.0);
    }

    pub fn allocate(&mut self) -> BookingId {
        let id = BookingId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }

    /// Identifier the next `allocate` call will return.
    pub fn peek(&self) -> BookingId {
        BookingId(self.next)
    }
}

/// Immutable scheduled appointment owned by one person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    id: BookingId,
    client_name: ClientName,
    datetime: NaiveDateTime,
    description: Description,
}

impl Booking {
    pub fn new(
        id: BookingId,
        client_name: ClientName,
        datetime: NaiveDateTime,
        description: Description,
    ) -> Self {
        Self {
            id,
            client_name,
            datetime,
            description,
        }
    }

    pub fn id(&self) -> BookingId {
        self.id
    }

    pub fn client_name(&self) -> &ClientName {
        &self.client_name
    }

    pub fn datetime(&self) -> NaiveDateTime {
        self.datetime
    }

    pub fn description(&self) -> &Description {
        &self.description
    }

    /// `YYYY-MM-DD HH:MM` form used in messages and storage.
    pub fn datetime_string(&self) -> String {
        format_booking_datetime(&self.datetime)
    }

    /// Calendar date in ISO form (`YYYY-MM-DD`).
    pub fn date_string(&self) -> String {
        self.datetime.date().to_string()
    }

    pub fn conflicts_with(&self, other: &Booking) -> bool {
        self.datetime == other.datetime
    }

    pub fn is_future(&self, now: NaiveDateTime) -> bool {
        self.datetime > now
    }
}

impl Display for Booking {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Client: {} at {} - {}",
            self.client_name,
            self.datetime_string(),
            self.description
        )
    }
}

/// A candidate booking collides with one already held by the same person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingConflict {
    pub existing: Booking,
}

impl Display for BookingConflict {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "already booked at {} with client '{}' for [{}]",
            self.existing.datetime_string(),
            self.existing.client_name,
            self.existing.description
        )
    }
}

impl Error for BookingConflict {}

/// Returns the first booking in `existing` that conflicts with `candidate`.
pub fn find_conflict<'a>(existing: &'a [Booking], candidate: &Booking) -> Option<&'a Booking> {
    existing
        .iter()
        .find(|booking| booking.conflicts_with(candidate))
}

/// Orders bookings for display: future ascending, then past ascending.
///
/// Ties keep storage order. Booking ordinals entered by users index into this
/// ordering (1-based), so deletion must use it as well.
pub fn display_order(bookings: &[Booking], now: NaiveDateTime) -> Vec<&Booking> {
    let mut ordered: Vec<&Booking> = bookings.iter().collect();
    ordered.sort_by(|left, right| {
        right
            .is_future(now)
            .cmp(&left.is_future(now))
            .then_with(|| left.datetime.cmp(&right.datetime))
    });
    ordered
}

#[cfg(test)]
mod tests {
    use super::{BookingId, BookingIdAllocator};

    #[test]
    fn allocator_skips_past_observed_ids() {
        let mut allocator = BookingIdAllocator::new();
        assert_eq!(allocator.allocate(), BookingId::new(1));

        allocator.observe(BookingId::new(7));
        allocator.observe(BookingId::new(3));
        assert_eq!(allocator.allocate(), BookingId::new(8));
        assert_eq!(allocator.peek(), BookingId::new(9));
    }

    #[test]
    fn starting_at_clamps_to_one() {
        assert_eq!(BookingIdAllocator::starting_at(0).peek(), BookingId::new(1));
    }

    #[test]
    fn booking_id_parses_trimmed_decimal() {
        assert_eq!(" 42 ".parse::<BookingId>().unwrap(), BookingId::new(42));
        assert!("x1".parse::<BookingId>().is_err());
    }
}
