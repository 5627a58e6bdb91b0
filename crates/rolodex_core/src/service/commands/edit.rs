//! `edit`: replace a person with a field-merged copy.

use crate::command::error::{CommandError, ValidationError};
use crate::command::request::EditRequest;
use crate::model::directory::Directory;
use crate::service::commands::{Execution, ExecutionContext};
use log::info;

pub fn execute(
    directory: &Directory,
    request: &EditRequest,
    ctx: ExecutionContext<'_>,
) -> Result<Execution, CommandError> {
    let person = ctx
        .resolver
        .resolve(request.target.as_str(), &directory.displayed())?;
    let edited = request.changes.apply_to(&person)?;

    if edited.name() != person.name() && directory.has(edited.name()) {
        return Err(CommandError::Validation(ValidationError::DuplicatePerson(
            edited.name().clone(),
        )));
    }

    let feedback = format!("Edited Person: {edited}");
    let mut next = directory.clone();
    next.replace(person.name(), edited)?;
    info!(
        "event=person_edit module=engine status=ok renamed={}",
        request.changes.name.is_some()
    );
    Ok(Execution::changed(next, feedback))
}
