//! Read-only SQLite view over the usage recorder database.
//!
//! An external recorder owns `usage.db` and appends per-app foreground
//! totals and transition events; Unplug only queries it. A missing
//! database means usage access has not been granted on this machine.
//!
//! Schema (owned by the recorder):
//!
//! ```sql
//! usage_stats  (app_id TEXT, foreground_ms INTEGER, bucket_start_ms INTEGER)
//! usage_events (app_id TEXT, kind TEXT, at_ms INTEGER)
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OpenFlags};

use super::data_dir;
use crate::error::UsageError;
use crate::usage::{UsageEvent, UsageEventKind, UsageRecord, UsageSource};

const USAGE_DB_FILE: &str = "usage.db";

/// Read-only usage database.
#[derive(Debug)]
pub struct UsageDb {
    conn: Connection,
}

impl UsageDb {
    /// Open the recorder database at `~/.config/unplug/usage.db`.
    ///
    /// # Errors
    /// Returns [`UsageError::PermissionMissing`] when the database does
    /// not exist.
    pub fn open() -> Result<Self, UsageError> {
        Self::open_at(&data_dir()?.join(USAGE_DB_FILE))
    }

    /// Open a recorder database at an explicit path, read-only.
    pub fn open_at(path: &Path) -> Result<Self, UsageError> {
        if !path.exists() {
            return Err(UsageError::PermissionMissing {
                path: path.to_path_buf(),
            });
        }
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        Ok(Self { conn })
    }

    /// Path the recorder is expected to populate.
    pub fn expected_path() -> Result<PathBuf, UsageError> {
        Ok(data_dir()?.join(USAGE_DB_FILE))
    }

    /// In-memory database with the recorder schema, for tests.
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, UsageError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(
            "CREATE TABLE usage_stats (
                app_id          TEXT NOT NULL,
                foreground_ms   INTEGER NOT NULL,
                bucket_start_ms INTEGER NOT NULL
            );
            CREATE TABLE usage_events (
                app_id TEXT NOT NULL,
                kind   TEXT NOT NULL,
                at_ms  INTEGER NOT NULL
            );",
        )?;
        Ok(Self { conn })
    }

    #[cfg(test)]
    fn insert_stat(
        &self,
        app_id: &str,
        foreground_ms: u64,
        bucket_start: DateTime<Utc>,
    ) -> Result<(), UsageError> {
        self.conn.execute(
            "INSERT INTO usage_stats (app_id, foreground_ms, bucket_start_ms) VALUES (?1, ?2, ?3)",
            params![app_id, foreground_ms as i64, bucket_start.timestamp_millis()],
        )?;
        Ok(())
    }

    #[cfg(test)]
    fn insert_event(&self, app_id: &str, kind: &str, at: DateTime<Utc>) -> Result<(), UsageError> {
        self.conn.execute(
            "INSERT INTO usage_events (app_id, kind, at_ms) VALUES (?1, ?2, ?3)",
            params![app_id, kind, at.timestamp_millis()],
        )?;
        Ok(())
    }
}

fn parse_kind(kind: &str) -> Option<UsageEventKind> {
    match kind {
        "foreground" => Some(UsageEventKind::MovedToForeground),
        "background" => Some(UsageEventKind::MovedToBackground),
        _ => None,
    }
}

impl UsageSource for UsageDb {
    fn usage_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<UsageRecord>, UsageError> {
        let mut stmt = self.conn.prepare(
            "SELECT app_id, foreground_ms FROM usage_stats
             WHERE bucket_start_ms >= ?1 AND bucket_start_ms < ?2
             ORDER BY bucket_start_ms",
        )?;
        let rows = stmt.query_map(
            params![start.timestamp_millis(), end.timestamp_millis()],
            |row| {
                Ok(UsageRecord {
                    app_id: row.get(0)?,
                    foreground_ms: row.get::<_, i64>(1)?.max(0) as u64,
                })
            },
        )?;
        rows.collect::<Result<Vec<_>, _>>().map_err(UsageError::from)
    }

    fn events_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<UsageEvent>, UsageError> {
        let mut stmt = self.conn.prepare(
            "SELECT app_id, kind, at_ms FROM usage_events
             WHERE at_ms >= ?1 AND at_ms < ?2
             ORDER BY at_ms",
        )?;
        let rows = stmt.query_map(
            params![start.timestamp_millis(), end.timestamp_millis()],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                ))
            },
        )?;

        let mut events = Vec::new();
        for row in rows {
            let (app_id, kind, at_ms) = row?;
            // Event kinds we don't model (and unrepresentable stamps)
            // recorded by the OS are skipped.
            let Some(kind) = parse_kind(&kind) else {
                continue;
            };
            let Some(at) = DateTime::from_timestamp_millis(at_ms) else {
                continue;
            };
            events.push(UsageEvent { app_id, kind, at });
        }
        Ok(events)
    }
}
