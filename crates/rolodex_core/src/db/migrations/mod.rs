//! Directory schema migrations.
//!
//! # Invariants
//! - Step versions are strictly increasing, starting at 1.
//! - One call runs every pending step inside a single transaction and stamps
//!   `PRAGMA user_version` after each step.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::Connection;

/// One schema step, identified by the version it produces.
#[derive(Debug, Clone, Copy)]
struct SchemaStep {
    version: u32,
    script: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[
    SchemaStep {
        version: 1,
        script: include_str!("0001_init.sql"),
    },
    SchemaStep {
        version: 2,
        script: include_str!("0002_directory_meta.sql"),
    },
];

/// Newest schema version this build can write.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Reads the schema version stamped on `conn`.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?)
}

/// Brings `conn` up to [`latest_version`].
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file is newer than this build.
/// - `Migration` naming the first step that failed.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = current_user_version(conn)?;
    let latest = latest_version();
    if found > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: found,
            latest_supported: latest,
        });
    }

    let plan: Vec<SchemaStep> = SCHEMA_STEPS
        .iter()
        .copied()
        .filter(|step| step.version > found)
        .collect();
    if plan.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in &plan {
        tx.execute_batch(step.script)
            .and_then(|()| tx.pragma_update(None, "user_version", step.version))
            .map_err(|source| DbError::Migration {
                version: step.version,
                source,
            })?;
        debug!("event=db_migrate module=db status=ok version={}", step.version);
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=done from={found} to={latest} steps={}",
        plan.len()
    );
    Ok(())
}
