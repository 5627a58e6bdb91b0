//! `list`: drop the display filter.

use crate::model::directory::Directory;
use crate::search::predicate::PersonFilter;
use crate::service::commands::Execution;

pub fn execute(directory: &Directory) -> Execution {
    let mut next = directory.clone();
    next.set_filter(PersonFilter::All);
    Execution::unchanged(next, "Listed all persons")
}
