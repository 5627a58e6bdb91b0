//! `find`: install a search predicate as the display filter.

use crate::command::request::FindRequest;
use crate::model::directory::Directory;
use crate::search::predicate::{PersonFilter, SearchPredicate};
use crate::service::commands::Execution;
use log::debug;

pub fn execute(directory: &Directory, request: &FindRequest) -> Execution {
    let predicate = SearchPredicate::compile(request.criteria.clone());
    let summary = predicate.summary();

    let mut next = directory.clone();
    next.set_filter(PersonFilter::Search(predicate));
    let found = next.displayed().len();
    debug!("event=person_find module=engine status=ok found={found}");

    Execution::unchanged(
        next,
        format!("{summary}\nFound {found} person(s) matching your search!"),
    )
}
