//! `delete`: remove a person, some of their tags, or one booking.

use crate::command::error::{CommandError, NotFoundError};
use crate::command::request::{DeleteRequest, DeleteTarget};
use crate::model::directory::Directory;
use crate::model::fields::Tag;
use crate::model::person::Person;
use crate::service::commands::{render_tags, Execution, ExecutionContext};
use log::info;
use std::collections::BTreeSet;
use std::num::NonZeroUsize;

pub fn execute(
    directory: &Directory,
    request: &DeleteRequest,
    ctx: ExecutionContext<'_>,
) -> Result<Execution, CommandError> {
    let person = ctx
        .resolver
        .resolve(request.name.as_str(), &directory.displayed())?;

    match &request.target {
        DeleteTarget::Person => {
            let mut next = directory.clone();
            next.remove(person.name())?;
            info!("event=person_delete module=engine status=ok");
            Ok(Execution::changed(next, format!("Deleted Person: {person}")))
        }
        DeleteTarget::Tags(tags) => delete_tags(directory, &person, tags),
        DeleteTarget::Booking(ordinal) => delete_booking(directory, &person, *ordinal, ctx),
    }
}

fn delete_tags(
    directory: &Directory,
    person: &Person,
    tags: &BTreeSet<Tag>,
) -> Result<Execution, CommandError> {
    let removal = person.with_tags_removed(tags);
    let name = person.name();
    if removal.removed.is_empty() {
        return Err(CommandError::NotFound(NotFoundError::Tags {
            person: name.clone(),
            tags: removal.missing,
        }));
    }

    let mut next = directory.clone();
    next.replace(name, removal.person)?;
    info!(
        "event=tag_delete module=engine status=ok removed={} missing={}",
        removal.removed.len(),
        removal.missing.len()
    );

    let feedback = if removal.missing.is_empty() {
        format!("Removed tags {} from {name}", render_tags(&removal.removed))
    } else {
        format!(
            "Removed {}. Not found: {} from {name}",
            render_tags(&removal.removed),
            render_tags(&removal.missing)
        )
    };
    Ok(Execution::changed(next, feedback))
}

/// Deletes the booking shown at `ordinal` in display order.
fn delete_booking(
    directory: &Directory,
    person: &Person,
    ordinal: NonZeroUsize,
    ctx: ExecutionContext<'_>,
) -> Result<Execution, CommandError> {
    let name = person.name();
    let ordered = person.bookings_in_display_order(ctx.now);
    let booking = ordered.get(ordinal.get() - 1).copied().ok_or_else(|| {
        CommandError::NotFound(NotFoundError::Booking {
            person: name.clone(),
            ordinal: ordinal.get(),
        })
    })?;

    let updated = person.without_booking(booking.id());
    let feedback = format!("Deleted booking {ordinal} from {name}: {booking}");
    let mut next = directory.clone();
    next.replace(name, updated)?;
    info!(
        "event=booking_delete module=engine status=ok booking_id={}",
        booking.id()
    );
    Ok(Execution::changed(next, feedback))
}
