//! Projection folders and the engine that rebuilds them.
//!
//! A projection is a derived view computed by folding a prefix of the event
//! log onto a zero value. Projections and their snapshots are disposable;
//! losing them costs a replay, never data.

mod admin_password;
mod engine;
mod users;

pub use admin_password::InitialAdminCreationPasswordProjection;
pub use engine::ProjectionEngine;
pub use users::{PasswordCredential, User, UsersProjection};

use serde::de::DeserializeOwned;
use serde::Serialize;
use userd_events::Event;

use crate::db::DbError;

/// Result type for projection operations.
pub type ProjectionResult<T> = Result<T, ProjectionError>;

/// Errors that can occur while rebuilding or snapshotting a projection.
#[derive(Debug, thiserror::Error)]
pub enum ProjectionError {
    #[error("database error: {0}")]
    Database(#[from] DbError),

    #[error("invalid snapshot state: {0}")]
    InvalidSnapshot(#[from] serde_json::Error),
}

/// A pure fold over the event log.
///
/// Implementations must be deterministic (no clock or randomness) and total
/// over any decodable event stream: events referencing unknown ids are
/// ignored, not errors. Folding must be split-associative: applying a
/// suffix to a state folded from the prefix equals folding the whole
/// sequence in one pass. Snapshot correctness depends on that property.
pub trait Projection: Default + Clone + Serialize + DeserializeOwned + Send + 'static {
    /// Name of this projection, used in logs.
    const NAME: &'static str;

    /// Table its snapshots are persisted in.
    const SNAPSHOT_TABLE: &'static str;

    /// Apply a single event to the state.
    fn apply(&mut self, event: &Event);
}
