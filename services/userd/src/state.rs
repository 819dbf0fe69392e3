//! Application state shared across request handlers.

use std::sync::Arc;

use crate::db::Database;
use crate::projections::ProjectionEngine;

/// Shared application state.
///
/// This is passed to all request handlers via Axum's state extractor.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    db: Database,
    engine: ProjectionEngine,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: Database) -> Self {
        let engine = ProjectionEngine::new(&db);
        Self {
            inner: Arc::new(AppStateInner { db, engine }),
        }
    }

    /// Get a reference to the database.
    pub fn db(&self) -> &Database {
        &self.inner.db
    }

    /// Get a reference to the projection engine.
    pub fn engine(&self) -> &ProjectionEngine {
        &self.inner.engine
    }
}
