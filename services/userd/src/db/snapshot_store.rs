//! Snapshot persistence for projections.
//!
//! Snapshots are append-only: `save` inserts a new row and never touches
//! existing ones, and `load_latest` picks the row with the highest log
//! position. A snapshot row is only visible once committed, so a reader
//! always sees a self-consistent (state, position) pair regardless of
//! concurrent writers. Superseded rows are dead weight by design.

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use userd_events::LogPosition;

use super::DbError;

/// A stored projection snapshot.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Sequence number of the last event folded into the state.
    pub position: LogPosition,

    /// Serialized projection state.
    pub state: serde_json::Value,

    /// When the snapshot row was written.
    pub created_at: DateTime<Utc>,
}

impl<'r> sqlx::FromRow<'r, SqliteRow> for Snapshot {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            position: LogPosition::new(row.try_get("event_seq")?),
            state: row.try_get("state")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// Store for projection snapshots, one table per projection kind.
#[derive(Clone)]
pub struct SnapshotStore {
    pool: SqlitePool,
}

impl SnapshotStore {
    /// Create a new snapshot store.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append a new snapshot row for the given projection table.
    ///
    /// Table names are compile-time constants supplied by projection
    /// implementations, never caller input.
    pub async fn save(
        &self,
        table: &'static str,
        position: LogPosition,
        state: serde_json::Value,
    ) -> Result<(), DbError> {
        let sql = format!("INSERT INTO {table} (event_seq, state) VALUES (?, ?)");
        sqlx::query(&sql)
            .bind(position.value())
            .bind(state)
            .execute(&self.pool)
            .await
            .map_err(DbError::Query)?;

        Ok(())
    }

    /// Load the snapshot with the highest log position, if any exists.
    pub async fn load_latest(&self, table: &'static str) -> Result<Option<Snapshot>, DbError> {
        let sql = format!(
            "SELECT event_seq, state, created_at FROM {table} \
             ORDER BY event_seq DESC, id DESC LIMIT 1"
        );
        sqlx::query_as::<_, Snapshot>(&sql)
            .fetch_optional(&self.pool)
            .await
            .map_err(DbError::Query)
    }
}
