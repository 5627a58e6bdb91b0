use chrono::NaiveDate;
use rolodex_core::model::booking::{find_conflict, Booking, BookingId};
use rolodex_core::model::fields::{
    parse_booking_datetime, ClientName, Description, Email, FieldError, Name, Phone, Tag,
    NAME_MAX_CHARS,
};

#[test]
fn valid_names_round_trip_through_display() {
    for raw in ["Alice Tan", "Mary-Jane O'Brien", "X", "Jean Luc  Picard"] {
        let name = Name::parse(raw).unwrap();
        let reparsed = Name::parse(&name.to_string()).unwrap();
        assert_eq!(name, reparsed);
        assert_eq!(name.as_str(), reparsed.as_str());
    }
}

#[test]
fn name_rules() {
    assert_eq!(Name::parse("   ").unwrap_err(), FieldError::NameEmpty);
    assert!(matches!(
        Name::parse("1Alice"),
        Err(FieldError::NameInvalid(_))
    ));
    assert!(matches!(
        Name::parse("Alice_Tan"),
        Err(FieldError::NameInvalid(_))
    ));
    let long = "A".repeat(NAME_MAX_CHARS + 1);
    assert_eq!(
        Name::parse(&long).unwrap_err(),
        FieldError::NameTooLong {
            length: NAME_MAX_CHARS + 1
        }
    );
    assert!(Name::parse(&"A".repeat(NAME_MAX_CHARS)).is_ok());
}

#[test]
fn names_are_case_sensitive_identities() {
    assert_ne!(Name::parse("alice").unwrap(), Name::parse("Alice").unwrap());
}

#[test]
fn phone_is_free_form_but_not_blank() {
    assert_eq!(
        Phone::parse(" +65 9876-5432 (hp) ").unwrap().as_str(),
        "+65 9876-5432 (hp)"
    );
    assert_eq!(Phone::parse("  ").unwrap_err(), FieldError::PhoneEmpty);
}

#[test]
fn email_shape() {
    assert!(Email::parse("alice.tan+work@example.com").is_ok());
    assert!(Email::parse("a@bc").is_ok());
    for bad in ["alice", "@example.com", ".alice@example.com", "alice@example.c"] {
        assert!(
            matches!(Email::parse(bad), Err(FieldError::EmailInvalid(_))),
            "{bad} should be rejected"
        );
    }
}

#[test]
fn tags_are_single_tokens() {
    assert_eq!(Tag::parse("owes_money-2").unwrap().to_string(), "[owes_money-2]");
    assert_eq!(Tag::parse("").unwrap_err(), FieldError::TagEmpty);
    assert!(matches!(
        Tag::parse("best friend"),
        Err(FieldError::TagInvalid(_))
    ));
    assert!(matches!(
        Tag::parse(&"t".repeat(31)),
        Err(FieldError::TagTooLong(_))
    ));
}

#[test]
fn client_names_need_a_letter_and_allowed_symbols() {
    assert_eq!(
        ClientName::parse("Ahmad  S/O Rahman").unwrap().as_str(),
        "Ahmad S/O Rahman"
    );
    assert!(ClientName::parse("Dr. Mary-Jane O'Brien").is_ok());
    let too_long = "a".repeat(101);
    for bad in ["1234", "Mr Lim!", "", "...", too_long.as_str()] {
        assert!(
            matches!(ClientName::parse(bad), Err(FieldError::ClientNameInvalid(_))),
            "{bad:?} should be rejected"
        );
    }
}

#[test]
fn description_length_bounds() {
    assert!(Description::parse("x").is_ok());
    assert!(Description::parse(&"x".repeat(500)).is_ok());
    assert_eq!(
        Description::parse(&"x".repeat(501)).unwrap_err(),
        FieldError::DescriptionInvalid { length: 501 }
    );
    assert_eq!(Description::placeholder().as_str(), "No description provided");
}

#[test]
fn datetime_parsing_is_strict() {
    let parsed = parse_booking_datetime("2024-02-29 23:59").unwrap();
    assert_eq!(
        parsed,
        NaiveDate::from_ymd_opt(2024, 2, 29)
            .unwrap()
            .and_hms_opt(23, 59, 0)
            .unwrap()
    );

    let err = parse_booking_datetime("2025-02-31 10:00").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid date \"February 31st 2025\", that date does not exist in the (Gregorian) calendar."
    );
    assert!(matches!(
        parse_booking_datetime("2025-04-31 10:00"),
        Err(FieldError::DateNotInCalendar { month: 4, day: 31, .. })
    ));

    for bad in [
        "2025-12-25",
        "2025-12-25 24:00",
        "2025-12-25 14:60",
        "25-12-25 14:00",
        "2025/12/25 14:00",
    ] {
        assert!(
            matches!(parse_booking_datetime(bad), Err(FieldError::DateTimeFormat(_))),
            "{bad} should be a format error"
        );
    }
}

#[test]
fn conflict_is_symmetric_and_exact_to_the_minute() {
    let booking = |id: u64, raw: &str| {
        Booking::new(
            BookingId::new(id),
            ClientName::parse("Mr Lim").unwrap(),
            parse_booking_datetime(raw).unwrap(),
            Description::placeholder(),
        )
    };
    let first = booking(1, "2025-12-25 14:00");
    let same = booking(2, "2025-12-25 14:00");
    let next_minute = booking(3, "2025-12-25 14:01");

    assert!(first.conflicts_with(&same));
    assert!(same.conflicts_with(&first));
    assert!(!first.conflicts_with(&next_minute));
    assert!(!next_minute.conflicts_with(&first));

    let existing = vec![first.clone(), next_minute.clone()];
    assert_eq!(find_conflict(&existing, &same), Some(&first));
    assert_eq!(find_conflict(&existing[..1], &next_minute), None);
}
