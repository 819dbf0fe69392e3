//! Database layer.
//!
//! This module provides:
//! - Connection pool management
//! - Event store operations (append, list)
//! - Snapshot store operations (save, load latest)
//!
//! The database layer uses SQLx with SQLite. The service targets a
//! single-process, single-storage-handle deployment; SQLite's transaction
//! mechanism serializes appends and gives listings a consistent view.

mod error;
mod event_store;
mod snapshot_store;

pub use error::DbError;
pub use event_store::EventStore;
pub use snapshot_store::{Snapshot, SnapshotStore};

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

/// Database configuration.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Database connection URL.
    pub database_url: String,

    /// Maximum number of connections in the pool.
    pub max_connections: u32,

    /// Connection acquire timeout.
    pub acquire_timeout: Duration,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:userd.db".to_string(),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

impl DbConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database_url =
            std::env::var("USERD_DATABASE_URL").unwrap_or_else(|_| "sqlite:userd.db".to_string());

        let max_connections = std::env::var("USERD_DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);

        Self {
            database_url,
            max_connections,
            ..Default::default()
        }
    }
}

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database connection pool.
    pub async fn connect(config: &DbConfig) -> Result<Self, DbError> {
        // Each pooled connection to ":memory:" would get its own empty
        // database, so in-memory URLs are pinned to a single connection.
        let max_connections = if config.database_url.contains(":memory:") {
            1
        } else {
            config.max_connections
        };

        info!(
            max_connections,
            database_url = %config.database_url,
            "Connecting to database"
        );

        let options = SqliteConnectOptions::from_str(&config.database_url)
            .map_err(DbError::Connect)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(options)
            .await
            .map_err(DbError::Connect)?;

        info!("Database connection pool established");

        Ok(Self { pool })
    }

    /// Get a reference to the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Check if the database is reachable.
    pub async fn health_check(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(DbError::Query)?;
        Ok(())
    }

    /// Run pending migrations.
    ///
    /// Note: In production, migrations should be run via a separate migration
    /// tool or as part of deployment. This method uses runtime migration
    /// loading.
    pub async fn run_migrations(&self) -> Result<(), DbError> {
        info!("Running database migrations");

        let candidates = vec![
            std::path::PathBuf::from("./migrations"),
            std::path::PathBuf::from("services/userd/migrations"),
            std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations"),
        ];
        let mut last_error: Option<sqlx::migrate::MigrateError> = None;

        for dir in &candidates {
            match sqlx::migrate::Migrator::new(dir.clone()).await {
                Ok(migrator) => {
                    info!(migrations_dir = %dir.display(), "Loaded migrations");
                    migrator.run(&self.pool).await.map_err(DbError::Migration)?;
                    info!("Database migrations complete");
                    return Ok(());
                }
                Err(e) => {
                    last_error = Some(e);
                }
            }
        }

        let tried = candidates
            .iter()
            .map(|dir| dir.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");

        Err(DbError::MigrationDirNotFound {
            tried,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown error".to_string()),
        })
    }

    /// Get an event store handle.
    pub fn event_store(&self) -> EventStore {
        EventStore::new(self.pool.clone())
    }

    /// Get a snapshot store handle.
    pub fn snapshot_store(&self) -> SnapshotStore {
        SnapshotStore::new(self.pool.clone())
    }
}
