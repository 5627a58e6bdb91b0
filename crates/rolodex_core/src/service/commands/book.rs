//! `book`: append a booking to a person after the conflict check.

use crate::command::error::{CommandError, NotFoundError};
use crate::command::request::BookRequest;
use crate::model::booking::Booking;
use crate::model::directory::Directory;
use crate::service::commands::Execution;
use log::{info, warn};

/// Books by exact name identity, ignoring the active display filter.
pub fn execute(directory: &Directory, request: &BookRequest) -> Result<Execution, CommandError> {
    let name = &request.person_name;
    let person = directory.get(name).ok_or_else(|| {
        CommandError::NotFound(NotFoundError::Person {
            query: name.to_string(),
        })
    })?;

    let mut next = directory.clone();
    let booking = Booking::new(
        next.allocate_booking_id(),
        request.client_name.clone(),
        request.datetime,
        request.description.clone(),
    );
    let updated = person.with_booking(booking.clone()).map_err(|conflict| {
        warn!("event=booking_add module=engine status=conflict");
        CommandError::Conflict {
            person: name.clone(),
            existing: conflict.existing,
        }
    })?;
    next.replace(name, updated)?;

    info!(
        "event=booking_add module=engine status=ok booking_id={}",
        booking.id()
    );
    Ok(Execution::changed(
        next,
        format!(
            "Booked: {name} with client '{}' at {} [{}]",
            booking.client_name(),
            booking.datetime_string(),
            booking.description()
        ),
    ))
}
