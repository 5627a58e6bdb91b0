use rolodex_core::model::booking::{Booking, BookingId};
use rolodex_core::model::fields::{parse_booking_datetime, ClientName, Description, Name, Tag};
use rolodex_core::model::person::Person;
use rolodex_core::search::predicate::{PersonFilter, SearchCriteria, SearchField, SearchPredicate};

fn person(name: &str, tags: &[&str], dates: &[&str]) -> Person {
    let bookings = dates
        .iter()
        .enumerate()
        .map(|(idx, raw)| {
            Booking::new(
                BookingId::new(idx as u64 + 1),
                ClientName::parse("Mr Lim").unwrap(),
                parse_booking_datetime(raw).unwrap(),
                Description::placeholder(),
            )
        })
        .collect();
    Person::new(
        Name::parse(name).unwrap(),
        None,
        None,
        tags.iter().map(|tag| Tag::parse(tag).unwrap()),
        bookings,
    )
    .unwrap()
}

fn people() -> Vec<Person> {
    vec![
        person("Alex Yeoh", &["friends"], &["2025-09-15 10:00"]),
        person("Bernice Yu", &["colleagues", "friends"], &["2025-10-01 09:00"]),
        person("Charlotte Oliveiro", &["neighbours"], &[]),
    ]
}

fn matching(criteria: SearchCriteria) -> Vec<String> {
    let predicate = SearchPredicate::compile(criteria);
    people()
        .iter()
        .filter(|person| predicate.matches(person))
        .map(|person| person.name().to_string())
        .collect()
}

#[test]
fn empty_criteria_match_everyone() {
    assert_eq!(matching(SearchCriteria::new()).len(), 3);
}

#[test]
fn keywords_within_a_field_are_alternatives() {
    let criteria = SearchCriteria::new().with_field(SearchField::Name, ["alex", "CHAR"]);
    assert_eq!(matching(criteria), ["Alex Yeoh", "Charlotte Oliveiro"]);
}

#[test]
fn fields_must_all_hold() {
    let criteria = SearchCriteria::new()
        .with_field(SearchField::Tag, ["friend"])
        .with_field(SearchField::Date, ["2025-10"]);
    assert_eq!(matching(criteria), ["Bernice Yu"]);
}

#[test]
fn emptied_field_behaves_as_if_it_passes_everyone() {
    let constrained = SearchCriteria::new()
        .with_field(SearchField::Name, ["yu"])
        .with_field(SearchField::Tag, ["neighbours"]);
    assert!(matching(constrained.clone()).is_empty());

    let mut widened = constrained;
    widened.set_keywords(SearchField::Tag, Vec::<String>::new());
    assert_eq!(matching(widened), ["Bernice Yu"]);
}

#[test]
fn wildcard_date_still_matches_people_without_bookings() {
    let criteria = SearchCriteria::new().with_field(SearchField::Date, Vec::<String>::new());
    assert_eq!(matching(criteria).len(), 3);
}

#[test]
fn dates_and_tags_match_by_substring() {
    let by_day = SearchCriteria::new().with_field(SearchField::Date, ["09-15"]);
    assert_eq!(matching(by_day), ["Alex Yeoh"]);

    let by_fragment = SearchCriteria::new().with_field(SearchField::Tag, ["LEAGUE"]);
    assert_eq!(matching(by_fragment), ["Bernice Yu"]);
}

#[test]
fn person_filter_all_passes_everyone() {
    let filter = PersonFilter::default();
    assert!(people().iter().all(|person| filter.matches(person)));

    let search = PersonFilter::Search(SearchPredicate::compile(
        SearchCriteria::new().with_field(SearchField::Name, ["nobody"]),
    ));
    assert!(!people().iter().any(|person| search.matches(person)));
}
