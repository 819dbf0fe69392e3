use std::time::Duration;

use userd_server::db::{Database, DbConfig};

/// Connect to a fresh in-memory database with migrations applied.
pub async fn test_db() -> Database {
    let config = DbConfig {
        database_url: "sqlite::memory:".to_string(),
        max_connections: 1,
        acquire_timeout: Duration::from_secs(5),
    };

    let db = Database::connect(&config).await.expect("connect to sqlite");
    db.run_migrations().await.expect("run migrations");
    db
}
