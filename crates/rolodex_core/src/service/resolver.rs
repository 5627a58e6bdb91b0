//! Human-entered name resolution against the displayed list.
//!
//! # Responsibility
//! - Turn a typed name into exactly one displayed person, or explain why not.
//!
//! # Invariants
//! - Matching is case-insensitive on whitespace-normalized text.
//! - Exact matches always win over partial (substring) matches.
//! - Several equal-quality matches are reported, never guessed between.
//! - A sole partial match is handled according to `PartialMatchPolicy`.

use crate::command::error::{CommandError, NotFoundError};
use crate::config::PartialMatchPolicy;
use crate::model::fields::{normalize_whitespace, Name};
use crate::model::person::Person;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    NotFound { query: String },
    /// Strict policy: one partial match exists but is not auto-picked.
    Suggestion { query: String, candidate: Name },
    Ambiguous { query: String, candidates: Vec<Name> },
}

impl Display for ResolveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { query } => write!(f, "no person matches `{query}`"),
            Self::Suggestion { query, candidate } => {
                write!(f, "`{query}` only partially matches `{candidate}`")
            }
            Self::Ambiguous { query, candidates } => {
                write!(f, "`{query}` matches {} persons", candidates.len())
            }
        }
    }
}

impl Error for ResolveError {}

impl From<ResolveError> for CommandError {
    fn from(value: ResolveError) -> Self {
        match value {
            ResolveError::NotFound { query } => Self::NotFound(NotFoundError::Person { query }),
            ResolveError::Suggestion { query, candidate } => {
                Self::NotFound(NotFoundError::PersonSuggestion { query, candidate })
            }
            ResolveError::Ambiguous { query, candidates } => Self::Ambiguous {
                query,
                candidates: candidates.iter().map(ToString::to_string).collect(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NameResolver {
    policy: PartialMatchPolicy,
}

impl NameResolver {
    pub fn new(policy: PartialMatchPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> PartialMatchPolicy {
        self.policy
    }

    /// Resolves `query` among `displayed`.
    pub fn resolve(
        &self,
        query: &str,
        displayed: &[Arc<Person>],
    ) -> Result<Arc<Person>, ResolveError> {
        let query = normalize_whitespace(query);
        let needle = query.to_lowercase();

        let exact = matching(displayed, |name| name == needle);
        match exact.len() {
            1 => return Ok(Arc::clone(exact[0])),
            0 => {}
            _ => {
                debug!(
                    "event=name_resolve module=resolver status=ambiguous match=exact count={}",
                    exact.len()
                );
                return Err(ResolveError::Ambiguous {
                    query,
                    candidates: names(&exact),
                });
            }
        }

        let partial = matching(displayed, |name| name.contains(needle.as_str()));
        match (partial.len(), self.policy) {
            (0, _) => Err(ResolveError::NotFound { query }),
            (1, PartialMatchPolicy::AutoResolve) => {
                debug!("event=name_resolve module=resolver status=ok match=partial");
                Ok(Arc::clone(partial[0]))
            }
            (1, PartialMatchPolicy::Suggest) => Err(ResolveError::Suggestion {
                query,
                candidate: partial[0].name().clone(),
            }),
            (count, _) => {
                debug!(
                    "event=name_resolve module=resolver status=ambiguous match=partial count={count}"
                );
                Err(ResolveError::Ambiguous {
                    query,
                    candidates: names(&partial),
                })
            }
        }
    }
}

fn matching<'a>(
    displayed: &'a [Arc<Person>],
    predicate: impl Fn(&str) -> bool,
) -> Vec<&'a Arc<Person>> {
    displayed
        .iter()
        .filter(|person| predicate(&person.name().as_str().to_lowercase()))
        .collect()
}

fn names(persons: &[&Arc<Person>]) -> Vec<Name> {
    persons.iter().map(|person| person.name().clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::{NameResolver, ResolveError};
    use crate::config::PartialMatchPolicy;
    use crate::model::fields::Name;
    use crate::model::person::Person;
    use std::sync::Arc;

    fn people(names: &[&str]) -> Vec<Arc<Person>> {
        names
            .iter()
            .map(|name| Arc::new(Person::named(Name::parse(name).unwrap())))
            .collect()
    }

    #[test]
    fn exact_match_beats_partial_matches() {
        let list = people(&["Alex", "Alex Yeoh", "Alexandra"]);
        let resolver = NameResolver::new(PartialMatchPolicy::Suggest);
        let found = resolver.resolve("  alex ", &list).unwrap();
        assert_eq!(found.name().as_str(), "Alex");
    }

    #[test]
    fn sole_partial_match_follows_policy() {
        let list = people(&["Bernice Yu", "Charlotte Oliveiro"]);

        let auto = NameResolver::new(PartialMatchPolicy::AutoResolve);
        assert_eq!(
            auto.resolve("bernice", &list).unwrap().name().as_str(),
            "Bernice Yu"
        );

        let strict = NameResolver::new(PartialMatchPolicy::Suggest);
        assert_eq!(
            strict.resolve("bernice", &list).unwrap_err(),
            ResolveError::Suggestion {
                query: "bernice".to_string(),
                candidate: Name::parse("Bernice Yu").unwrap(),
            }
        );
    }

    #[test]
    fn several_partial_matches_are_listed() {
        let list = people(&["Alex Yeoh", "Alex Tan", "Bob"]);
        let err = NameResolver::default().resolve("Alex", &list).unwrap_err();
        match err {
            ResolveError::Ambiguous { candidates, .. } => assert_eq!(candidates.len(), 2),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn missing_name_is_not_found() {
        let list = people(&["Alex Yeoh"]);
        assert_eq!(
            NameResolver::default().resolve("Zed", &list).unwrap_err(),
            ResolveError::NotFound {
                query: "Zed".to_string()
            }
        );
    }
}
