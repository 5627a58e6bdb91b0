//! Directory repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Load a whole directory snapshot and save it back.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `save_directory` replaces every row in one immediate transaction.
//! - Read paths go through `PersonRecord::to_person`, so invalid persisted
//!   state is rejected instead of masked.
//! - Directory order and per-person booking storage order survive a round trip.

use crate::db::DbError;
use crate::model::directory::Directory;
use crate::repo::records::{BookingRecord, DirectoryRecord, PersonRecord, RecordError};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

const META_NEXT_BOOKING_ID: &str = "next_booking_id";

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Record(RecordError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Record(err) => write!(f, "invalid persisted directory data: {err}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted directory data: {message}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Record(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<RecordError> for RepoError {
    fn from(value: RecordError) -> Self {
        Self::Record(value)
    }
}

/// Whole-snapshot persistence for directories.
pub trait DirectoryRepository {
    fn load_directory(&self) -> RepoResult<Directory>;
    fn save_directory(&mut self, directory: &Directory) -> RepoResult<()>;
}

/// SQLite-backed directory repository.
pub struct SqliteDirectoryRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteDirectoryRepository<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }

    /// Reads every row into the persisted record shape.
    pub fn load_records(&self) -> RepoResult<DirectoryRecord> {
        let mut tags = load_tags(self.conn)?;
        let mut bookings = load_bookings(self.conn)?;

        let mut stmt = self
            .conn
            .prepare("SELECT name, phone, email FROM persons ORDER BY position ASC;")?;
        let mut rows = stmt.query([])?;
        let mut persons = Vec::new();
        while let Some(row) = rows.next()? {
            let name: String = row.get("name")?;
            persons.push(PersonRecord {
                tags: tags.remove(&name).unwrap_or_default(),
                bookings: bookings.remove(&name).unwrap_or_default(),
                phone: row.get("phone")?,
                email: row.get("email")?,
                name,
            });
        }

        if let Some(orphan) = tags.keys().chain(bookings.keys()).next() {
            return Err(RepoError::InvalidData(format!(
                "rows reference unknown person `{orphan}`"
            )));
        }

        Ok(DirectoryRecord {
            persons,
            next_booking_id: load_next_booking_id(self.conn)?,
        })
    }
}

impl DirectoryRepository for SqliteDirectoryRepository<'_> {
    fn load_directory(&self) -> RepoResult<Directory> {
        let started_at = Instant::now();
        let loaded = self
            .load_records()
            .and_then(|records| records.to_directory().map_err(RepoError::from));
        match &loaded {
            Ok(directory) => info!(
                "event=directory_load module=repo status=ok persons={} duration_ms={}",
                directory.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=directory_load module=repo status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        loaded
    }

    fn save_directory(&mut self, directory: &Directory) -> RepoResult<()> {
        let started_at = Instant::now();
        let records = DirectoryRecord::from_directory(directory);

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute_batch(
            "DELETE FROM bookings;
             DELETE FROM person_tags;
             DELETE FROM persons;",
        )?;

        for (position, person) in records.persons.iter().enumerate() {
            tx.execute(
                "INSERT INTO persons (name, position, phone, email) VALUES (?1, ?2, ?3, ?4);",
                params![
                    person.name.as_str(),
                    position as i64,
                    person.phone.as_deref(),
                    person.email.as_deref(),
                ],
            )?;
            for tag in &person.tags {
                tx.execute(
                    "INSERT INTO person_tags (person_name, tag) VALUES (?1, ?2);",
                    params![person.name.as_str(), tag.as_str()],
                )?;
            }
            for (slot, booking) in person.bookings.iter().enumerate() {
                let id = booking.id.parse::<i64>().map_err(|_| {
                    RepoError::InvalidData(format!("booking id `{}` is not numeric", booking.id))
                })?;
                tx.execute(
                    "INSERT INTO bookings (
                        id,
                        person_name,
                        position,
                        client_name,
                        datetime,
                        description
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
                    params![
                        id,
                        person.name.as_str(),
                        slot as i64,
                        booking.client_name.as_str(),
                        booking.datetime.as_str(),
                        booking.description.as_str(),
                    ],
                )?;
            }
        }

        if let Some(next) = records.next_booking_id {
            tx.execute(
                "INSERT INTO directory_meta (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
                params![META_NEXT_BOOKING_ID, next.to_string()],
            )?;
        }
        tx.commit()?;

        info!(
            "event=directory_save module=repo status=ok persons={} duration_ms={}",
            records.persons.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }
}

fn load_tags(conn: &Connection) -> RepoResult<HashMap<String, Vec<String>>> {
    let mut stmt =
        conn.prepare("SELECT person_name, tag FROM person_tags ORDER BY person_name, tag;")?;
    let mut rows = stmt.query([])?;
    let mut tags: HashMap<String, Vec<String>> = HashMap::new();
    while let Some(row) = rows.next()? {
        tags.entry(row.get("person_name")?)
            .or_default()
            .push(row.get("tag")?);
    }
    Ok(tags)
}

fn load_bookings(conn: &Connection) -> RepoResult<HashMap<String, Vec<BookingRecord>>> {
    let mut stmt = conn.prepare(
        "SELECT id, person_name, client_name, datetime, description
         FROM bookings
         ORDER BY person_name, position ASC;",
    )?;
    let mut rows = stmt.query([])?;
    let mut bookings: HashMap<String, Vec<BookingRecord>> = HashMap::new();
    while let Some(row) = rows.next()? {
        let id: i64 = row.get("id")?;
        if id < 1 {
            return Err(RepoError::InvalidData(format!(
                "non-positive booking id `{id}` in bookings.id"
            )));
        }
        bookings
            .entry(row.get("person_name")?)
            .or_default()
            .push(BookingRecord {
                id: id.to_string(),
                client_name: row.get("client_name")?,
                datetime: row.get("datetime")?,
                description: row.get("description")?,
            });
    }
    Ok(bookings)
}

fn load_next_booking_id(conn: &Connection) -> RepoResult<Option<u64>> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM directory_meta WHERE key = ?1;",
            [META_NEXT_BOOKING_ID],
            |row| row.get(0),
        )
        .optional()?;
    value
        .map(|text| {
            text.parse::<u64>().map_err(|_| {
                RepoError::InvalidData(format!(
                    "invalid value `{text}` for directory_meta.{META_NEXT_BOOKING_ID}"
                ))
            })
        })
        .transpose()
}
