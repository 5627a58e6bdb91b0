//! Multi-criteria person predicates.
//!
//! # Responsibility
//! - Compile a field -> keyword-list map into a pure person filter.
//! - Describe the active criteria for user feedback.
//!
//! # Invariants
//! - Missing field: unconstrained. Present with no keywords: wildcard.
//! - Keywords within one field are OR-ed; fields are AND-ed.
//! - Matching is case-insensitive substring matching; dates compare against
//!   each booking's ISO calendar date.

use crate::model::person::Person;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Searchable person field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SearchField {
    Name,
    Tag,
    Date,
}

impl SearchField {
    /// Stable key used in criteria maps.
    pub fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Tag => "tag",
            Self::Date => "date",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "name" => Some(Self::Name),
            "tag" => Some(Self::Tag),
            "date" => Some(Self::Date),
            _ => None,
        }
    }

    fn summary_label(self) -> &'static str {
        match self {
            Self::Name => "Name containing",
            Self::Tag => "Tag containing",
            Self::Date => "Booking date",
        }
    }
}

impl Display for SearchField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Field -> keyword phrases. Ordered by field for deterministic summaries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    fields: BTreeMap<SearchField, Vec<String>>,
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`SearchCriteria::set_keywords`].
    pub fn with_field<I, S>(mut self, field: SearchField, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_keywords(field, keywords);
        self
    }

    /// Replaces the keyword list for `field`. An empty list makes it a wildcard.
    pub fn set_keywords<I, S>(&mut self, field: SearchField, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields
            .insert(field, keywords.into_iter().map(Into::into).collect());
    }

    /// Marks `field` present without adding a keyword.
    pub fn require_field(&mut self, field: SearchField) {
        self.fields.entry(field).or_default();
    }

    pub fn push_keyword(&mut self, field: SearchField, keyword: impl Into<String>) {
        self.fields.entry(field).or_default().push(keyword.into());
    }

    pub fn keywords(&self, field: SearchField) -> Option<&[String]> {
        self.fields.get(&field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SearchField, &[String])> {
        self.fields
            .iter()
            .map(|(field, keywords)| (*field, keywords.as_slice()))
    }
}

/// Compiled, pure person filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPredicate {
    criteria: SearchCriteria,
    lowered: Vec<(SearchField, Vec<String>)>,
}

impl SearchPredicate {
    pub fn compile(criteria: SearchCriteria) -> Self {
        let lowered: Vec<(SearchField, Vec<String>)> = criteria
            .iter()
            .map(|(field, keywords)| {
                (
                    field,
                    keywords.iter().map(|kw| kw.to_lowercase()).collect::<Vec<_>>(),
                )
            })
            .collect();
        Self { criteria, lowered }
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    /// True iff `person` satisfies every present field.
    pub fn matches(&self, person: &Person) -> bool {
        self.lowered
            .iter()
            .all(|(field, keywords)| keywords.is_empty() || field_matches(*field, keywords, person))
    }

    /// Human summary of what is being searched.
    pub fn summary(&self) -> String {
        if self.criteria.is_empty() {
            return "Searching for: all contacts".to_string();
        }

        let mut out = String::from("Searching for contacts with:");
        for (field, keywords) in self.criteria.iter() {
            out.push_str("\n  ");
            out.push_str(field.summary_label());
            out.push_str(": ");
            if keywords.is_empty() {
                out.push_str("any");
            } else {
                out.push_str(&keywords.join(", "));
            }
        }
        out
    }
}

fn field_matches(field: SearchField, keywords: &[String], person: &Person) -> bool {
    match field {
        SearchField::Name => {
            let name = person.name().as_str().to_lowercase();
            keywords.iter().any(|kw| name.contains(kw.as_str()))
        }
        SearchField::Tag => {
            let tags: Vec<String> = person
                .tags()
                .iter()
                .map(|tag| tag.as_str().to_lowercase())
                .collect();
            keywords
                .iter()
                .any(|kw| tags.iter().any(|tag| tag.contains(kw.as_str())))
        }
        SearchField::Date => {
            let dates: Vec<String> = person
                .bookings()
                .iter()
                .map(|booking| booking.date_string())
                .collect();
            keywords
                .iter()
                .any(|kw| dates.iter().any(|date| date.contains(kw.as_str())))
        }
    }
}

/// Filter applied to the displayed person list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PersonFilter {
    #[default]
    All,
    Search(SearchPredicate),
}

impl PersonFilter {
    pub fn matches(&self, person: &Person) -> bool {
        match self {
            Self::All => true,
            Self::Search(predicate) => predicate.matches(person),
        }
    }
}
