//! Event store for append-only event log operations.
//!
//! The event store provides:
//! - Transactional batch append (all events or none)
//! - Listing the full log or the tail after a position, in log order
//!
//! Listing is a consistent read: the row count taken at the start of the
//! transaction must match the rows scanned, so callers never observe a torn
//! log. Any row that fails to decode aborts the whole listing; malformed
//! rows are never skipped.

use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use userd_events::{Event, LogPosition, RecordedEvent};

use super::DbError;

/// A raw row from the events table.
#[derive(Debug, Clone)]
struct EventRow {
    seq: i64,
    event_name: String,
    payload: serde_json::Value,
}

impl<'r> sqlx::FromRow<'r, SqliteRow> for EventRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            seq: row.try_get("seq")?,
            event_name: row.try_get("event_name")?,
            payload: row.try_get("payload")?,
        })
    }
}

/// Event store for managing the append-only event log.
#[derive(Clone)]
pub struct EventStore {
    pool: SqlitePool,
}

impl EventStore {
    /// Create a new event store.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append a batch of events atomically.
    ///
    /// All events are inserted inside a single transaction, so they occupy a
    /// contiguous block of sequence numbers in the given order. An encoding
    /// or storage failure on any event leaves the log unchanged.
    pub async fn append(&self, events: &[Event]) -> Result<(), DbError> {
        if events.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await.map_err(DbError::Query)?;

        for event in events {
            let payload = event.encode().map_err(DbError::Encode)?;
            sqlx::query("INSERT INTO events (event_name, payload) VALUES (?, ?)")
                .bind(event.kind())
                .bind(payload)
                .execute(&mut *tx)
                .await
                .map_err(DbError::Query)?;
        }

        tx.commit().await.map_err(DbError::Query)?;
        Ok(())
    }

    /// List every stored event in ascending sequence order.
    pub async fn list_all(&self) -> Result<Vec<RecordedEvent>, DbError> {
        self.list_after(LogPosition::BEFORE_ALL).await
    }

    /// List events with sequence strictly greater than `position`, ascending.
    ///
    /// `LogPosition::BEFORE_ALL` returns the entire log. This is the primary
    /// interface for projection replay.
    pub async fn list_after(&self, position: LogPosition) -> Result<Vec<RecordedEvent>, DbError> {
        let mut tx = self.pool.begin().await.map_err(DbError::Query)?;

        let expected: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events WHERE seq > ?")
            .bind(position.value())
            .fetch_one(&mut *tx)
            .await
            .map_err(DbError::Query)?;

        let rows: Vec<EventRow> = sqlx::query_as(
            "SELECT seq, event_name, payload FROM events WHERE seq > ? ORDER BY seq ASC",
        )
        .bind(position.value())
        .fetch_all(&mut *tx)
        .await
        .map_err(DbError::Query)?;

        tx.commit().await.map_err(DbError::Query)?;

        if rows.len() as i64 != expected {
            return Err(DbError::InconsistentRead {
                expected,
                scanned: rows.len() as i64,
            });
        }

        rows.into_iter()
            .map(|row| {
                let event =
                    Event::decode(&row.event_name, &row.payload).map_err(|e| {
                        DbError::CorruptEvent {
                            seq: row.seq,
                            kind: row.event_name.clone(),
                            source: e,
                        }
                    })?;
                Ok(RecordedEvent {
                    seq: LogPosition::new(row.seq),
                    event,
                })
            })
            .collect()
    }

    /// Total number of stored events.
    pub async fn count(&self) -> Result<i64, DbError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM events")
            .fetch_one(&self.pool)
            .await
            .map_err(DbError::Query)
    }
}
