//! `clear`: wipe the directory, but only when forced.

use crate::model::directory::Directory;
use crate::service::commands::Execution;
use log::{info, warn};

pub const MESSAGE_CLEARED: &str = "Address book has been cleared!";
pub const MESSAGE_CONFIRM: &str = "This will delete every contact and booking. \
     Re-run as `clear f/` to confirm.";

pub fn execute(directory: &Directory, force: bool) -> Execution {
    if !force {
        warn!(
            "event=directory_clear module=engine status=skipped persons={}",
            directory.len()
        );
        return Execution::unchanged(directory.clone(), MESSAGE_CONFIRM);
    }

    info!(
        "event=directory_clear module=engine status=ok persons={}",
        directory.len()
    );
    Execution::changed(directory.cleared(), MESSAGE_CLEARED)
}
