use rolodex_core::command::request::{CommandRequest, DeleteTarget};
use rolodex_core::command::usage::{BOOK_USAGE, DELETE_USAGE, EDIT_USAGE, FIND_USAGE};
use rolodex_core::model::fields::{Description, FieldError};
use rolodex_core::search::predicate::SearchField;
use rolodex_core::{parse_command, CommandError, ValidationError};

fn format_detail(line: &str) -> (&'static str, Option<String>) {
    match parse_command(line).unwrap_err() {
        CommandError::Format { usage, detail } => (usage.command_word, detail),
        other => panic!("expected format error for `{line}`, got {other:?}"),
    }
}

#[test]
fn add_collects_fields_and_tags() {
    let CommandRequest::Add(request) =
        parse_command("add n/ Alice   Tan  p/98765432 t/vip t/friends").unwrap()
    else {
        panic!("expected add request");
    };
    let person = request.person;
    assert_eq!(person.name().as_str(), "Alice Tan");
    assert_eq!(person.phone().map(|phone| phone.as_str()), Some("98765432"));
    assert!(person.email().is_none());
    assert_eq!(person.tags().len(), 2);
}

#[test]
fn duplicate_single_valued_prefix_names_the_field() {
    let (word, detail) = format_detail("add n/Alice p/1 p/2");
    assert_eq!(word, "add");
    assert!(detail.unwrap().ends_with("p/"));
}

#[test]
fn preamble_and_missing_prefixes_are_format_errors() {
    assert_eq!(format_detail("add Alice n/Alice").0, "add");
    assert_eq!(format_detail("book c/Mr Lim n/Alice").0, BOOK_USAGE.command_word);
    assert_eq!(format_detail("delete t/vip").0, DELETE_USAGE.command_word);
}

#[test]
fn format_error_message_carries_usage() {
    let message = parse_command("find").unwrap_err().to_string();
    assert!(message.starts_with("Invalid command format!"));
    assert!(message.contains(FIND_USAGE.parameters));
    assert!(message.contains(FIND_USAGE.example));
}

#[test]
fn unknown_and_empty_lines() {
    assert_eq!(
        parse_command("remove n/Alice").unwrap_err(),
        CommandError::UnknownCommand("remove".to_string())
    );
    assert!(parse_command("   ")
        .unwrap_err()
        .to_string()
        .starts_with("Please enter a command."));
}

#[test]
fn book_defaults_description_and_normalizes_client() {
    let CommandRequest::Book(request) =
        parse_command("book d/2025-12-25 14:00 c/Mr   Lim n/Alice Tan desc/  ").unwrap()
    else {
        panic!("expected book request");
    };
    assert_eq!(request.client_name.as_str(), "Mr Lim");
    assert_eq!(request.description, Description::placeholder());
    assert_eq!(request.person_name.as_str(), "Alice Tan");
}

#[test]
fn book_rejects_impossible_dates_by_name() {
    let err = parse_command("book d/2025-02-31 10:00 c/A n/B").unwrap_err();
    assert_eq!(
        err,
        CommandError::Validation(ValidationError::Field(FieldError::DateNotInCalendar {
            year: 2025,
            month: 2,
            day: 31,
        }))
    );
    let message = err.to_string();
    assert!(message.contains("February 31st"));
    assert!(message.contains("does not exist"));
}

#[test]
fn book_rejects_client_without_letters() {
    let err = parse_command("book d/2025-12-25 14:00 c/12345 n/Alice").unwrap_err();
    assert!(matches!(
        err,
        CommandError::Validation(ValidationError::Field(FieldError::ClientNameInvalid(_)))
    ));
}

#[test]
fn delete_variants_parse() {
    let CommandRequest::Delete(whole) = parse_command("delete n/Alex Yeoh").unwrap() else {
        panic!("expected delete request");
    };
    assert_eq!(whole.target, DeleteTarget::Person);

    let CommandRequest::Delete(tags) = parse_command("delete n/Alex t/vip t/friends").unwrap()
    else {
        panic!("expected delete request");
    };
    assert!(matches!(tags.target, DeleteTarget::Tags(ref set) if set.len() == 2));

    let CommandRequest::Delete(booking) = parse_command("delete n/Alex b/3").unwrap() else {
        panic!("expected delete request");
    };
    assert!(matches!(booking.target, DeleteTarget::Booking(ordinal) if ordinal.get() == 3));
}

#[test]
fn delete_rejects_bad_tag_and_booking_shapes() {
    let cases = [
        ("delete n/Alex t/", "Please provide a tag after 't/'!"),
        ("delete n/Alex t/best friend", "Tags cannot contain spaces"),
        ("delete n/Alex b/", "Please provide a booking id after 'b/'!"),
        ("delete n/Alex b/0", "positive integer"),
        ("delete n/Alex b/1 t/vip", "not both"),
    ];
    for (line, expected) in cases {
        let (word, detail) = format_detail(line);
        assert_eq!(word, "delete");
        assert!(
            detail.as_deref().unwrap_or_default().contains(expected),
            "`{line}` gave {detail:?}"
        );
    }
}

#[test]
fn find_builds_criteria_with_wildcards() {
    let CommandRequest::Find(request) =
        parse_command("find n/alex n/bernice t/ d/2025-09").unwrap()
    else {
        panic!("expected find request");
    };
    let criteria = request.criteria;
    assert_eq!(
        criteria.keywords(SearchField::Name),
        Some(&["alex".to_string(), "bernice".to_string()][..])
    );
    assert_eq!(criteria.keywords(SearchField::Tag), Some(&[][..]));
    assert_eq!(
        criteria.keywords(SearchField::Date),
        Some(&["2025-09".to_string()][..])
    );
}

#[test]
fn find_validates_date_keywords() {
    assert!(matches!(
        parse_command("find d/2025-13"),
        Err(CommandError::Validation(ValidationError::Field(
            FieldError::DateKeywordInvalid(_)
        )))
    ));
    assert!(parse_command("find d/2024-02-29").is_ok());
    assert!(parse_command("find d/2025-02-29").is_err());
}

#[test]
fn clear_requires_bare_force_flag() {
    assert_eq!(
        parse_command("clear").unwrap(),
        CommandRequest::Clear { force: false }
    );
    assert_eq!(
        parse_command("clear f/").unwrap(),
        CommandRequest::Clear { force: true }
    );
    assert_eq!(format_detail("clear f/yes").0, "clear");
    assert_eq!(format_detail("clear now").0, "clear");
}

#[test]
fn edit_reads_target_then_new_name() {
    let CommandRequest::Edit(request) =
        parse_command("edit n/Alex Yeoh n/Alexander Yeoh e/ t/").unwrap()
    else {
        panic!("expected edit request");
    };
    assert_eq!(request.target.as_str(), "Alex Yeoh");
    assert_eq!(
        request.changes.name.as_ref().map(|name| name.as_str()),
        Some("Alexander Yeoh")
    );
    assert_eq!(request.changes.email, Some(None));
    assert_eq!(request.changes.phone, None);
    assert_eq!(request.changes.tags.as_ref().map(|tags| tags.len()), Some(0));
}

#[test]
fn edit_needs_a_change_and_at_most_two_names() {
    let (word, detail) = format_detail("edit n/Alex");
    assert_eq!(word, EDIT_USAGE.command_word);
    assert!(detail.unwrap().contains("At least one field"));

    let (_, detail) = format_detail("edit n/A n/B n/C");
    assert!(detail.unwrap().contains("at most two n/"));
}
