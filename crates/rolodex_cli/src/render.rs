//! Plain-text rendering of the displayed person list.

use rolodex_core::{Clock, Directory};
use std::io::{self, Write};

/// Writes every displayed person, numbering bookings in the order `delete b/` uses.
pub fn write_displayed(
    out: &mut impl Write,
    directory: &Directory,
    clock: &impl Clock,
) -> io::Result<()> {
    let now = clock.now();
    for (idx, person) in directory.displayed().iter().enumerate() {
        writeln!(out, "{}. {person}", idx + 1)?;
        for (slot, booking) in person.bookings_in_display_order(now).iter().enumerate() {
            let when = if booking.is_future(now) { "upcoming" } else { "past" };
            writeln!(out, "     b/{} {booking} ({when})", slot + 1)?;
        }
    }
    Ok(())
}
