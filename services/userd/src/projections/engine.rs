//! Projection engine: cheap snapshot load plus bounded replay.
//!
//! Rebuilding a projection costs replaying only the events appended since
//! its latest snapshot, not the whole log. Snapshot refresh runs as a
//! detached task whose failure is logged and swallowed; a write never waits
//! on or fails with snapshot maintenance.

use tracing::{debug, instrument, warn};
use userd_events::LogPosition;

use crate::db::{Database, EventStore, SnapshotStore};

use super::{
    InitialAdminCreationPasswordProjection, Projection, ProjectionResult, UsersProjection,
};

/// Rebuilds projections from snapshots and the event log tail.
#[derive(Clone)]
pub struct ProjectionEngine {
    events: EventStore,
    snapshots: SnapshotStore,
}

impl ProjectionEngine {
    /// Create a new engine over the given database.
    pub fn new(db: &Database) -> Self {
        Self {
            events: db.event_store(),
            snapshots: db.snapshot_store(),
        }
    }

    /// Rebuild projection `P` and return it with its log position.
    ///
    /// Starts from the latest snapshot (or the zero value at
    /// `LogPosition::BEFORE_ALL`), folds every later event in sequence
    /// order, and returns the highest sequence observed, or the snapshot's
    /// position unchanged when the tail is empty. Callers own the returned
    /// state; mutating it does not affect stored data.
    #[instrument(skip(self), fields(projection = P::NAME))]
    pub async fn get<P: Projection>(&self) -> ProjectionResult<(P, LogPosition)> {
        let (mut state, mut position) = match self.snapshots.load_latest(P::SNAPSHOT_TABLE).await? {
            Some(snapshot) => {
                let state: P = serde_json::from_value(snapshot.state)?;
                (state, snapshot.position)
            }
            None => (P::default(), LogPosition::BEFORE_ALL),
        };

        let tail = self.events.list_after(position).await?;
        let replayed = tail.len();
        for recorded in &tail {
            state.apply(&recorded.event);
            position = position.max(recorded.seq);
        }

        debug!(replayed, position = %position, "Rebuilt projection");
        Ok((state, position))
    }

    /// Persist the current state of projection `P` as a new snapshot row.
    pub async fn save_snapshot<P: Projection>(&self) -> ProjectionResult<()> {
        let (state, position) = self.get::<P>().await?;
        let state = serde_json::to_value(&state)?;
        self.snapshots.save(P::SNAPSHOT_TABLE, position, state).await?;

        debug!(projection = P::NAME, position = %position, "Saved snapshot");
        Ok(())
    }

    /// Refresh snapshots for every projection on a detached task.
    ///
    /// The task is not awaited by the caller. Failures are logged at warn
    /// level and never propagated to the operation that triggered the
    /// refresh.
    pub fn refresh_snapshots_in_background(&self, trigger: &'static str) {
        let engine = self.clone();
        tokio::spawn(async move {
            debug!(trigger, "Refreshing projection snapshots");

            if let Err(e) = engine.save_snapshot::<UsersProjection>().await {
                warn!(
                    error = %e,
                    trigger,
                    projection = UsersProjection::NAME,
                    "Failed to refresh snapshot"
                );
            }

            if let Err(e) = engine
                .save_snapshot::<InitialAdminCreationPasswordProjection>()
                .await
            {
                warn!(
                    error = %e,
                    trigger,
                    projection = InitialAdminCreationPasswordProjection::NAME,
                    "Failed to refresh snapshot"
                );
            }
        });
    }
}
