//! Time source for booking ordering.

use chrono::{Local, NaiveDateTime};

/// Supplies the instant that splits future from past bookings.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock in local time, matching how booking times are entered.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
