//! `add`: insert a new person or merge tags into an existing one.

use crate::command::error::{CommandError, ValidationError};
use crate::command::request::AddRequest;
use crate::model::directory::Directory;
use crate::service::commands::{render_tags, Execution};
use log::info;

pub fn execute(directory: &Directory, request: &AddRequest) -> Result<Execution, CommandError> {
    let incoming = &request.person;
    let name = incoming.name();

    let Some(existing) = directory.get(name) else {
        let mut next = directory.clone();
        next.add(incoming.clone())?;
        info!("event=person_add module=engine status=ok mode=insert");
        return Ok(Execution::changed(
            next,
            format!("New person added: {incoming}"),
        ));
    };

    // Phone/email on a duplicate-name add are ignored; only tags merge.
    if incoming.tags().is_empty() {
        return Err(CommandError::Validation(ValidationError::DuplicateContact(
            name.clone(),
        )));
    }

    let (updated, added) = existing.with_tags_added(incoming.tags())?;
    if added.is_empty() {
        return Ok(Execution::unchanged(
            directory.clone(),
            format!(
                "{name} already has tag(s) {}; nothing changed.",
                render_tags(incoming.tags())
            ),
        ));
    }

    let mut next = directory.clone();
    next.replace(name, updated)?;
    info!(
        "event=person_add module=engine status=ok mode=merge_tags added={}",
        added.len()
    );
    Ok(Execution::changed(
        next,
        format!("Added tag(s) {} to {name}", render_tags(&added)),
    ))
}

#[cfg(test)]
mod tests {
    use super::execute;
    use crate::command::error::{CommandError, ValidationError};
    use crate::command::parser::parse_add;
    use crate::model::directory::Directory;

    #[test]
    fn duplicate_name_without_tags_is_rejected() {
        let first = parse_add(" n/Alice Tan p/98765432").unwrap();
        let directory = execute(&Directory::new(), &first).unwrap().directory;

        let again = parse_add(" n/Alice Tan e/alice@example.com").unwrap();
        let err = execute(&directory, &again).unwrap_err();
        assert!(matches!(
            err,
            CommandError::Validation(ValidationError::DuplicateContact(_))
        ));
    }

    #[test]
    fn merging_only_known_tags_changes_nothing() {
        let first = parse_add(" n/Alice Tan t/vip").unwrap();
        let directory = execute(&Directory::new(), &first).unwrap().directory;

        let outcome = execute(&directory, &parse_add(" n/Alice Tan t/vip").unwrap()).unwrap();
        assert!(!outcome.changed);
        assert_eq!(outcome.directory.len(), 1);
    }
}
