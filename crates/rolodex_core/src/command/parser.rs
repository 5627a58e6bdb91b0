//! Command-line parsing into typed requests.
//!
//! # Responsibility
//! - Route a raw line to its command parser by the first word.
//! - Validate every argument before a request reaches the engine.
//!
//! # Invariants
//! - Shape problems (missing/duplicate prefixes, preamble) are `Format` errors
//!   carrying the command usage.
//! - Field constraint failures are `Validation` errors.

use crate::command::error::CommandError;
use crate::command::request::{
    AddRequest, BookRequest, CommandRequest, DeleteRequest, DeleteTarget, EditRequest,
    FindRequest, PersonChanges,
};
use crate::command::tokenizer::{
    tokenize, ArgumentMultimap, Prefix, PREFIX_BOOKING, PREFIX_CLIENT, PREFIX_DATETIME,
    PREFIX_DESCRIPTION, PREFIX_EMAIL, PREFIX_FORCE, PREFIX_NAME, PREFIX_PHONE, PREFIX_TAG,
};
use crate::command::usage::{
    CommandUsage, ADD_USAGE, BOOK_USAGE, CLEAR_USAGE, DELETE_USAGE, EDIT_USAGE, FIND_USAGE,
    LIST_USAGE,
};
use crate::model::fields::{
    parse_booking_datetime, parse_date_keyword, ClientName, Description, Email, FieldError, Name,
    Phone, Tag,
};
use crate::model::person::Person;
use crate::search::predicate::{SearchCriteria, SearchField};
use std::collections::BTreeSet;
use std::num::NonZeroUsize;

const MESSAGE_DUPLICATE_FIELDS: &str =
    "You've specified multiple values for these fields that should only have one value: ";

/// Parses one full command line.
pub fn parse_command(line: &str) -> Result<CommandRequest, CommandError> {
    let trimmed = line.trim_start();
    let (word, args) = match trimmed.find(char::is_whitespace) {
        Some(idx) => trimmed.split_at(idx),
        None => (trimmed, ""),
    };

    match word {
        "add" => parse_add(args).map(CommandRequest::Add),
        "delete" => parse_delete(args).map(CommandRequest::Delete),
        "book" => parse_book(args).map(CommandRequest::Book),
        "find" => parse_find(args).map(CommandRequest::Find),
        "clear" => parse_clear(args),
        "edit" => parse_edit(args).map(CommandRequest::Edit),
        "list" => parse_list(args),
        other => Err(CommandError::UnknownCommand(other.to_string())),
    }
}

/// `add n/NAME [p/PHONE] [e/EMAIL] [t/TAG]...`
pub fn parse_add(args: &str) -> Result<AddRequest, CommandError> {
    let map = tokenize(args, &[PREFIX_NAME, PREFIX_PHONE, PREFIX_EMAIL, PREFIX_TAG]);
    require_shape(&map, &[PREFIX_NAME], ADD_USAGE)?;
    reject_duplicates(&map, &[PREFIX_NAME, PREFIX_PHONE, PREFIX_EMAIL], ADD_USAGE)?;

    let name = Name::parse(map.value(PREFIX_NAME).unwrap_or_default())?;
    let phone = map.value(PREFIX_PHONE).map(Phone::parse).transpose()?;
    let email = map.value(PREFIX_EMAIL).map(Email::parse).transpose()?;
    let tags = parse_tags(map.all_values(PREFIX_TAG))?;

    let person = Person::new(name, phone, email, tags, Vec::new())?;
    Ok(AddRequest { person })
}

/// `delete n/NAME ([t/TAG]... | b/BOOKING_ID)`
pub fn parse_delete(args: &str) -> Result<DeleteRequest, CommandError> {
    let map = tokenize(args, &[PREFIX_NAME, PREFIX_TAG, PREFIX_BOOKING]);
    require_shape(&map, &[PREFIX_NAME], DELETE_USAGE)?;
    reject_duplicates(&map, &[PREFIX_NAME, PREFIX_BOOKING], DELETE_USAGE)?;

    let name = Name::parse(map.value(PREFIX_NAME).unwrap_or_default())?;
    let has_tags = map.contains(PREFIX_TAG);
    let has_booking = map.contains(PREFIX_BOOKING);

    let target = match (has_tags, has_booking) {
        (true, true) => {
            return Err(CommandError::format_with(
                DELETE_USAGE,
                "Please specify either tags (t/) or one booking (b/), not both.",
            ));
        }
        (false, true) => DeleteTarget::Booking(parse_booking_ordinal(
            map.value(PREFIX_BOOKING).unwrap_or_default(),
        )?),
        (true, false) => {
            let mut tags = BTreeSet::new();
            for raw in map.all_values(PREFIX_TAG) {
                if raw.is_empty() {
                    return Err(CommandError::format_with(
                        DELETE_USAGE,
                        "Please provide a tag after 't/'!",
                    ));
                }
                if raw.contains(' ') {
                    return Err(CommandError::format_with(
                        DELETE_USAGE,
                        "Tags cannot contain spaces; use one t/ per tag.",
                    ));
                }
                tags.insert(Tag::parse(raw)?);
            }
            DeleteTarget::Tags(tags)
        }
        (false, false) => DeleteTarget::Person,
    };

    Ok(DeleteRequest { name, target })
}

/// `book d/DATETIME c/CLIENT_NAME n/PERSON_NAME [desc/DESCRIPTION]`
pub fn parse_book(args: &str) -> Result<BookRequest, CommandError> {
    let prefixes = [PREFIX_DATETIME, PREFIX_CLIENT, PREFIX_NAME, PREFIX_DESCRIPTION];
    let map = tokenize(args, &prefixes);
    require_shape(
        &map,
        &[PREFIX_DATETIME, PREFIX_CLIENT, PREFIX_NAME],
        BOOK_USAGE,
    )?;
    reject_duplicates(&map, &prefixes, BOOK_USAGE)?;

    let datetime = parse_booking_datetime(map.value(PREFIX_DATETIME).unwrap_or_default())?;
    let client_name = ClientName::parse(map.value(PREFIX_CLIENT).unwrap_or_default())?;
    let person_name = Name::parse(map.value(PREFIX_NAME).unwrap_or_default())?;
    let description = match map.value(PREFIX_DESCRIPTION) {
        Some(raw) if !raw.is_empty() => Description::parse(raw)?,
        _ => Description::placeholder(),
    };

    Ok(BookRequest {
        person_name,
        client_name,
        datetime,
        description,
    })
}

/// `find [n/NAME] [t/TAG] [d/DATE]`; at least one prefix is required.
pub fn parse_find(args: &str) -> Result<FindRequest, CommandError> {
    let fields = [
        (PREFIX_NAME, SearchField::Name),
        (PREFIX_TAG, SearchField::Tag),
        (PREFIX_DATETIME, SearchField::Date),
    ];
    let map = tokenize(args, &[PREFIX_NAME, PREFIX_TAG, PREFIX_DATETIME]);
    let any_prefix = fields.iter().any(|(prefix, _)| map.contains(*prefix));
    if !map.preamble().is_empty() || !any_prefix {
        return Err(CommandError::format(FIND_USAGE));
    }

    let mut criteria = SearchCriteria::new();
    for (prefix, field) in fields {
        if !map.contains(prefix) {
            continue;
        }
        let values = map.all_values(prefix);
        if values.iter().any(String::is_empty) {
            // An empty keyword is a wildcard, which absorbs the rest of the field.
            criteria.require_field(field);
            continue;
        }
        for raw in values {
            criteria.push_keyword(field, validate_keyword(field, raw)?);
        }
    }

    Ok(FindRequest { criteria })
}

/// `clear [f/]`
pub fn parse_clear(args: &str) -> Result<CommandRequest, CommandError> {
    let map = tokenize(args, &[PREFIX_FORCE]);
    if !map.preamble().is_empty() {
        return Err(CommandError::format(CLEAR_USAGE));
    }
    reject_duplicates(&map, &[PREFIX_FORCE], CLEAR_USAGE)?;
    if map.value(PREFIX_FORCE).is_some_and(|value| !value.is_empty()) {
        return Err(CommandError::format_with(
            CLEAR_USAGE,
            "f/ does not take a value.",
        ));
    }
    Ok(CommandRequest::Clear {
        force: map.contains(PREFIX_FORCE),
    })
}

/// `edit n/OLD_NAME [n/NEW_NAME] [p/PHONE] [e/EMAIL] [t/TAG]...`
pub fn parse_edit(args: &str) -> Result<EditRequest, CommandError> {
    let map = tokenize(args, &[PREFIX_NAME, PREFIX_PHONE, PREFIX_EMAIL, PREFIX_TAG]);
    require_shape(&map, &[PREFIX_NAME], EDIT_USAGE)?;
    reject_duplicates(&map, &[PREFIX_PHONE, PREFIX_EMAIL], EDIT_USAGE)?;

    let names = map.all_values(PREFIX_NAME);
    if names.len() > 2 {
        return Err(CommandError::format_with(
            EDIT_USAGE,
            "Provide at most two n/ values: the current name, then the new name.",
        ));
    }
    let target = Name::parse(&names[0])?;

    let mut changes = PersonChanges {
        name: names.get(1).map(|raw| Name::parse(raw)).transpose()?,
        ..PersonChanges::default()
    };
    if let Some(raw) = map.value(PREFIX_PHONE) {
        changes.phone = Some(optional_field(raw, Phone::parse)?);
    }
    if let Some(raw) = map.value(PREFIX_EMAIL) {
        changes.email = Some(optional_field(raw, Email::parse)?);
    }
    if map.contains(PREFIX_TAG) {
        let values = map.all_values(PREFIX_TAG);
        changes.tags = Some(if values.len() == 1 && values[0].is_empty() {
            BTreeSet::new()
        } else {
            parse_tags(values)?
        });
    }

    if changes.is_empty() {
        return Err(CommandError::format_with(
            EDIT_USAGE,
            "At least one field to edit must be provided.",
        ));
    }
    Ok(EditRequest { target, changes })
}

/// `list`
pub fn parse_list(args: &str) -> Result<CommandRequest, CommandError> {
    if !args.trim().is_empty() {
        return Err(CommandError::format(LIST_USAGE));
    }
    Ok(CommandRequest::List)
}

fn require_shape(
    map: &ArgumentMultimap,
    required: &[Prefix],
    usage: CommandUsage,
) -> Result<(), CommandError> {
    let missing = required.iter().any(|prefix| !map.contains(*prefix));
    if missing || !map.preamble().is_empty() {
        return Err(CommandError::format(usage));
    }
    Ok(())
}

fn reject_duplicates(
    map: &ArgumentMultimap,
    single_valued: &[Prefix],
    usage: CommandUsage,
) -> Result<(), CommandError> {
    let duplicated = map.duplicated(single_valued);
    if duplicated.is_empty() {
        return Ok(());
    }
    let fields = duplicated
        .iter()
        .map(|prefix| prefix.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    Err(CommandError::format_with(
        usage,
        format!("{MESSAGE_DUPLICATE_FIELDS}{fields}"),
    ))
}

fn parse_tags(values: &[String]) -> Result<BTreeSet<Tag>, FieldError> {
    values.iter().map(|raw| Tag::parse(raw)).collect()
}

fn optional_field<T>(
    raw: &str,
    parse: impl Fn(&str) -> Result<T, FieldError>,
) -> Result<Option<T>, FieldError> {
    if raw.is_empty() {
        return Ok(None);
    }
    parse(raw).map(Some)
}

fn parse_booking_ordinal(raw: &str) -> Result<NonZeroUsize, CommandError> {
    if raw.is_empty() {
        return Err(CommandError::format_with(
            DELETE_USAGE,
            "Please provide a booking id after 'b/'!",
        ));
    }
    raw.parse::<NonZeroUsize>().map_err(|_| {
        CommandError::format_with(DELETE_USAGE, "Booking id must be a positive integer.")
    })
}

fn validate_keyword(field: SearchField, raw: &str) -> Result<String, FieldError> {
    match field {
        SearchField::Name => Name::parse(raw).map(|name| name.as_str().to_string()),
        SearchField::Tag => Tag::parse(raw).map(|tag| tag.as_str().to_string()),
        SearchField::Date => parse_date_keyword(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_booking_ordinal, parse_command};
    use crate::command::error::CommandError;
    use crate::command::request::CommandRequest;

    #[test]
    fn unknown_word_is_reported() {
        let err = parse_command("launch n/x").unwrap_err();
        assert_eq!(err, CommandError::UnknownCommand("launch".to_string()));
    }

    #[test]
    fn list_takes_no_arguments() {
        assert_eq!(parse_command("list").unwrap(), CommandRequest::List);
        assert!(matches!(
            parse_command("list everyone"),
            Err(CommandError::Format { .. })
        ));
    }

    #[test]
    fn booking_ordinal_rejects_zero_and_text() {
        assert!(parse_booking_ordinal("0").is_err());
        assert!(parse_booking_ordinal("two").is_err());
        assert_eq!(parse_booking_ordinal("2").unwrap().get(), 2);
    }
}
