//! Database error types.

use thiserror::Error;
use userd_events::EventError;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Failed to connect to the database.
    #[error("failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    /// Failed to execute a query.
    #[error("query failed: {0}")]
    Query(#[source] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration failed: {0}")]
    Migration(#[source] sqlx::migrate::MigrateError),

    /// Migration directory not found in the current environment.
    #[error("migration directory not found; tried {tried}. Last error: {last_error}. Run from repo root or services/userd.")]
    MigrationDirNotFound { tried: String, last_error: String },

    /// An event could not be encoded for storage.
    #[error("event encoding failed: {0}")]
    Encode(#[source] EventError),

    /// A stored row could not be decoded back into a typed event.
    #[error("corrupt event at seq {seq} ({kind}): {source}")]
    CorruptEvent {
        seq: i64,
        kind: String,
        #[source]
        source: EventError,
    },

    /// A listing scanned a different number of rows than it counted.
    #[error("inconsistent read: expected {expected} events, scanned {scanned}")]
    InconsistentRead { expected: i64, scanned: i64 },
}
