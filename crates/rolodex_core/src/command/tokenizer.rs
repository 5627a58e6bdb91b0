//! Prefix tokenizer for command arguments.
//!
//! # Responsibility
//! - Split an argument string into prefix-delimited segments.
//! - Keep the text before the first prefix as the preamble.
//!
//! # Invariants
//! - A prefix only counts at the start of the string or after whitespace.
//! - Values are trimmed and internal whitespace runs collapse to one space.
//! - A prefix with nothing after it yields an empty value, not a missing one.

use crate::model::fields::normalize_whitespace;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Argument prefix such as `n/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Prefix(&'static str);

impl Prefix {
    pub const fn new(value: &'static str) -> Self {
        Self(value)
    }

    pub fn as_str(self) -> &'static str {
        self.0
    }
}

impl Display for Prefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

pub const PREFIX_NAME: Prefix = Prefix::new("n/");
pub const PREFIX_PHONE: Prefix = Prefix::new("p/");
pub const PREFIX_EMAIL: Prefix = Prefix::new("e/");
pub const PREFIX_TAG: Prefix = Prefix::new("t/");
pub const PREFIX_DATETIME: Prefix = Prefix::new("d/");
pub const PREFIX_CLIENT: Prefix = Prefix::new("c/");
pub const PREFIX_DESCRIPTION: Prefix = Prefix::new("desc/");
pub const PREFIX_BOOKING: Prefix = Prefix::new("b/");
pub const PREFIX_FORCE: Prefix = Prefix::new("f/");

/// Tokenized arguments: preamble plus every value per prefix, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentMultimap {
    preamble: String,
    values: BTreeMap<Prefix, Vec<String>>,
}

impl ArgumentMultimap {
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    pub fn contains(&self, prefix: Prefix) -> bool {
        self.values.contains_key(&prefix)
    }

    /// Last value given for `prefix`.
    pub fn value(&self, prefix: Prefix) -> Option<&str> {
        self.values
            .get(&prefix)
            .and_then(|values| values.last())
            .map(String::as_str)
    }

    pub fn all_values(&self, prefix: Prefix) -> &[String] {
        self.values.get(&prefix).map_or(&[], Vec::as_slice)
    }

    /// Returns the prefixes among `prefixes` that appear more than once.
    pub fn duplicated(&self, prefixes: &[Prefix]) -> Vec<Prefix> {
        prefixes
            .iter()
            .copied()
            .filter(|prefix| self.all_values(*prefix).len() > 1)
            .collect()
    }
}

/// Splits `args` on the recognized `prefixes`.
pub fn tokenize(args: &str, prefixes: &[Prefix]) -> ArgumentMultimap {
    let mut ordered: Vec<Prefix> = prefixes.to_vec();
    ordered.sort_by_key(|prefix| std::cmp::Reverse(prefix.as_str().len()));

    let mut positions: Vec<(usize, Prefix)> = Vec::new();
    let mut at_boundary = true;
    for (idx, ch) in args.char_indices() {
        if at_boundary {
            if let Some(prefix) = ordered
                .iter()
                .copied()
                .find(|prefix| args[idx..].starts_with(prefix.as_str()))
            {
                positions.push((idx, prefix));
            }
        }
        at_boundary = ch.is_whitespace();
    }

    let preamble_end = positions.first().map_or(args.len(), |(idx, _)| *idx);
    let mut multimap = ArgumentMultimap {
        preamble: normalize_whitespace(&args[..preamble_end]),
        values: BTreeMap::new(),
    };

    for (slot, (start, prefix)) in positions.iter().enumerate() {
        let value_start = start + prefix.as_str().len();
        let value_end = positions
            .get(slot + 1)
            .map_or(args.len(), |(next_start, _)| *next_start);
        multimap
            .values
            .entry(*prefix)
            .or_default()
            .push(normalize_whitespace(&args[value_start..value_end]));
    }

    multimap
}
