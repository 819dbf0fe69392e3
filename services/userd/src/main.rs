//! userd
//!
//! An event-sourced user management service. All writes append to a single
//! event log; reads fold the log (seeded from snapshots) into projections.

use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use userd_server::{api, bootstrap, config, db::Database, projections::ProjectionEngine, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = config::Config::from_env()?;

    // Initialize tracing (prefer RUST_LOG, fallback to USERD_LOG_LEVEL)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_level.clone().into()))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("Starting userd");
    info!(listen_addr = %config.listen_addr, "Configuration loaded");

    // Connect to database
    let db = match Database::connect(&config.database).await {
        Ok(db) => {
            info!("Database connection established");
            db
        }
        Err(e) => {
            error!(error = %e, "Failed to connect to database");
            return Err(e.into());
        }
    };

    // Run migrations in dev mode
    if config.dev_mode {
        info!("Running database migrations (dev mode)");
        if let Err(e) = db.run_migrations().await {
            error!(error = %e, "Failed to run migrations");
            return Err(e.into());
        }
    }

    // Seed the admin creation password in dev mode
    if config.dev_mode {
        let engine = ProjectionEngine::new(&db);
        match bootstrap::ensure_admin_creation_password(&db, &engine).await {
            Ok(Some(password)) => {
                info!(%password, "Generated initial admin creation password");
            }
            Ok(None) => {}
            Err(e) => {
                error!(error = %e, "Failed to bootstrap admin creation password");
                return Err(e.into());
            }
        }
    }

    // Create application state
    let state = AppState::new(db);

    // Build and run the server
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!(addr = %config.listen_addr, "Listening for connections");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Received shutdown signal");
            }
        })
        .await?;

    info!("userd shutdown complete");
    Ok(())
}
