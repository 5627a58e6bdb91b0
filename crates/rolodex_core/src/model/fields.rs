//! Field value objects and validators.
//!
//! # Responsibility
//! - Validate and normalize every user-entered field before it reaches the model.
//! - Report one specific rejection reason per failure, never a generic error.
//!
//! # Invariants
//! - A constructed value object always satisfies its validator.
//! - Parsing an already-valid value yields an identical value.
//! - Booking date-times are resolved strictly: impossible calendar dates are
//!   rejected, never rolled over.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum person name length in characters.
pub const NAME_MAX_CHARS: usize = 50;
/// Maximum tag length in characters.
pub const TAG_MAX_CHARS: usize = 30;
/// Maximum booking client name length in characters.
pub const CLIENT_NAME_MAX_CHARS: usize = 100;
/// Maximum booking description length in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 500;
/// `chrono` pattern used to read and write booking date-times.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z' -]*$").expect("valid name regex"));
static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid tag regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9](?:[A-Za-z0-9+_.-]*[A-Za-z0-9])?@(?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?\.)*[A-Za-z0-9][A-Za-z0-9-]*[A-Za-z0-9]$",
    )
    .expect("valid email regex")
});
static CLIENT_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9 .'/-]+$").expect("valid client name regex"));
static DATETIME_SHAPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})-(\d{2})-(\d{2}) (\d{2}):(\d{2})$").expect("valid datetime regex")
});
static DATE_KEYWORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})(?:-(\d{2})(?:-(\d{2}))?)?$").expect("valid date keyword regex")
});
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Field-level rejection reasons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    NameEmpty,
    NameTooLong { length: usize },
    NameInvalid(String),
    PhoneEmpty,
    EmailInvalid(String),
    TagEmpty,
    TagTooLong(String),
    TagInvalid(String),
    ClientNameInvalid(String),
    DescriptionInvalid { length: usize },
    DateTimeFormat(String),
    /// Well-formed date that does not exist, e.g. `2025-02-31`.
    DateNotInCalendar { year: i32, month: u32, day: u32 },
    DateKeywordInvalid(String),
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NameEmpty => write!(f, "Name cannot be empty."),
            Self::NameTooLong { length } => write!(
                f,
                "Name too long ({length} chars, max {NAME_MAX_CHARS} chars)."
            ),
            Self::NameInvalid(value) => write!(
                f,
                "Invalid name `{value}`: names must start with a letter and may only contain \
                 alphabetic characters, spaces, apostrophes, and hyphens."
            ),
            Self::PhoneEmpty => write!(f, "Phone number cannot be blank."),
            Self::EmailInvalid(value) => write!(
                f,
                "Invalid email `{value}`: emails should be of the format local-part@domain, \
                 where the local part starts and ends with an alphanumeric character and \
                 the domain ends with a label of at least 2 characters."
            ),
            Self::TagEmpty => write!(f, "Tag cannot be empty."),
            Self::TagTooLong(value) => write!(
                f,
                "Tag `{value}` is too long (max {TAG_MAX_CHARS} chars)."
            ),
            Self::TagInvalid(value) => write!(
                f,
                "Invalid tag `{value}`: tags may only contain letters, digits, hyphens and \
                 underscores, with no spaces."
            ),
            Self::ClientNameInvalid(value) => write!(
                f,
                "Client name `{value}` is invalid!\n\
                 Requirements:\n\
                 • Must be 1-{CLIENT_NAME_MAX_CHARS} characters long\n\
                 • Must contain at least one letter\n\
                 • Can include letters, numbers, spaces, hyphens (-), apostrophes ('), \
                 periods (.), and slashes (/)\n\
                 Examples: 'John Doe', 'Mary-Jane O'Brien', 'Ahmad S/O Rahman'"
            ),
            Self::DescriptionInvalid { length } => write!(
                f,
                "Booking description must be between 1 and {DESCRIPTION_MAX_CHARS} characters \
                 long (got {length})."
            ),
            Self::DateTimeFormat(value) => write!(
                f,
                "Invalid date/time format or value `{value}`!\n\
                 Please use the format: YYYY-MM-DD HH:MM (e.g., 2024-12-25 14:30)"
            ),
            Self::DateNotInCalendar { year, month, day } => write!(
                f,
                "Invalid date \"{} {} {year}\", that date does not exist in the (Gregorian) \
                 calendar.",
                month_name(*month),
                day_ordinal(*day)
            ),
            Self::DateKeywordInvalid(value) => write!(
                f,
                "Invalid date `{value}`: use YYYY, YYYY-MM or YYYY-MM-DD with a real calendar date."
            ),
        }
    }
}

impl Error for FieldError {}

/// Trims the value and collapses internal whitespace runs to one space.
pub fn normalize_whitespace(value: &str) -> String {
    WHITESPACE_RE.replace_all(value.trim(), " ").into_owned()
}

/// Person identity. Case-sensitive, 1-50 chars.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name(String);

impl Name {
    pub fn parse(raw: &str) -> Result<Self, FieldError> {
        let normalized = normalize_whitespace(raw);
        if normalized.is_empty() {
            return Err(FieldError::NameEmpty);
        }
        if !NAME_RE.is_match(&normalized) {
            return Err(FieldError::NameInvalid(normalized));
        }
        let length = normalized.chars().count();
        if length > NAME_MAX_CHARS {
            return Err(FieldError::NameTooLong { length });
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-form phone value; only blank input is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Phone(String);

impl Phone {
    pub fn parse(raw: &str) -> Result<Self, FieldError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FieldError::PhoneEmpty);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Phone {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn parse(raw: &str) -> Result<Self, FieldError> {
        let trimmed = raw.trim();
        if !EMAIL_RE.is_match(trimmed) {
            return Err(FieldError::EmailInvalid(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Case-sensitive label; equality is plain value equality.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag(String);

impl Tag {
    pub fn parse(raw: &str) -> Result<Self, FieldError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FieldError::TagEmpty);
        }
        if !TAG_RE.is_match(trimmed) {
            return Err(FieldError::TagInvalid(trimmed.to_string()));
        }
        if trimmed.chars().count() > TAG_MAX_CHARS {
            return Err(FieldError::TagTooLong(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.0)
    }
}

/// Booking client name, whitespace-normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientName(String);

impl ClientName {
    pub fn parse(raw: &str) -> Result<Self, FieldError> {
        let normalized = normalize_whitespace(raw);
        let length = normalized.chars().count();
        let valid = (1..=CLIENT_NAME_MAX_CHARS).contains(&length)
            && CLIENT_NAME_RE.is_match(&normalized)
            && normalized.chars().any(|c| c.is_ascii_alphabetic());
        if !valid {
            return Err(FieldError::ClientNameInvalid(normalized));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ClientName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Description(String);

impl Description {
    /// Placeholder stored when a booking is created without a description.
    pub const PLACEHOLDER: &'static str = "No description provided";

    pub fn parse(raw: &str) -> Result<Self, FieldError> {
        let trimmed = raw.trim();
        let length = trimmed.chars().count();
        if !(1..=DESCRIPTION_MAX_CHARS).contains(&length) {
            return Err(FieldError::DescriptionInvalid { length });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn placeholder() -> Self {
        Self(Self::PLACEHOLDER.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Description {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parses `YYYY-MM-DD HH:MM` with strict calendar resolution.
///
/// # Errors
/// - `DateNotInCalendar` when the shape is right but the day does not exist.
/// - `DateTimeFormat` for every other malformed input, including impossible times.
pub fn parse_booking_datetime(raw: &str) -> Result<NaiveDateTime, FieldError> {
    let trimmed = raw.trim();
    let format_error = || FieldError::DateTimeFormat(trimmed.to_string());
    let caps = DATETIME_SHAPE_RE.captures(trimmed).ok_or_else(format_error)?;

    let number = |idx: usize| -> Result<u32, FieldError> {
        caps.get(idx)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .ok_or_else(format_error)
    };
    let year = i32::try_from(number(1)?).map_err(|_| format_error())?;
    let (month, day) = (number(2)?, number(3)?);
    let (hour, minute) = (number(4)?, number(5)?);

    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(FieldError::DateNotInCalendar { year, month, day })?;
    let time = NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(format_error)?;
    Ok(NaiveDateTime::new(date, time))
}

/// Formats a booking date-time the same way it is parsed.
pub fn format_booking_datetime(datetime: &NaiveDateTime) -> String {
    datetime.format(DATETIME_FORMAT).to_string()
}

/// Validates a search date keyword: `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
pub fn parse_date_keyword(raw: &str) -> Result<String, FieldError> {
    let trimmed = raw.trim();
    let invalid = || FieldError::DateKeywordInvalid(trimmed.to_string());
    let caps = DATE_KEYWORD_RE.captures(trimmed).ok_or_else(invalid)?;

    let part = |idx: usize| caps.get(idx).and_then(|m| m.as_str().parse::<u32>().ok());
    match (part(2), part(3)) {
        (None, _) => {}
        (Some(month), None) => {
            if !(1..=12).contains(&month) {
                return Err(invalid());
            }
        }
        (Some(month), Some(day)) => {
            let year = part(1).and_then(|y| i32::try_from(y).ok()).ok_or_else(invalid)?;
            if NaiveDate::from_ymd_opt(year, month, day).is_none() {
                return Err(invalid());
            }
        }
    }
    Ok(trimmed.to_string())
}

fn month_name(month: u32) -> String {
    match month {
        1..=12 => MONTH_NAMES[(month - 1) as usize].to_string(),
        other => format!("Month {other}"),
    }
}

fn day_ordinal(day: u32) -> String {
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{day}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::{day_ordinal, month_name, normalize_whitespace};

    #[test]
    fn normalize_whitespace_trims_and_collapses() {
        assert_eq!(normalize_whitespace("  Alice \t  Tan  "), "Alice Tan");
    }

    #[test]
    fn day_ordinal_handles_teens() {
        assert_eq!(day_ordinal(1), "1st");
        assert_eq!(day_ordinal(11), "11th");
        assert_eq!(day_ordinal(12), "12th");
        assert_eq!(day_ordinal(22), "22nd");
        assert_eq!(day_ordinal(31), "31st");
        assert_eq!(day_ordinal(33), "33rd");
    }

    #[test]
    fn month_name_falls_back_for_out_of_range() {
        assert_eq!(month_name(2), "February");
        assert_eq!(month_name(13), "Month 13");
    }
}
