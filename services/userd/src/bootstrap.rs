//! Dev-mode seeding of the initial admin creation password.

use tracing::info;
use userd_events::InitialAdminCreationPasswordCreated;

use crate::auth;
use crate::db::Database;
use crate::projections::{
    InitialAdminCreationPasswordProjection, ProjectionEngine, ProjectionError, ProjectionResult,
    UsersProjection,
};

/// Ensure an admin creation password exists while the system has no admin.
///
/// Returns the generated plaintext when a new password was created, so the
/// caller can surface it once at startup. No-op when an admin user already
/// exists or a creation password is already active.
pub async fn ensure_admin_creation_password(
    db: &Database,
    engine: &ProjectionEngine,
) -> ProjectionResult<Option<String>> {
    let (users, _) = engine.get::<UsersProjection>().await?;
    if users.has_admin() {
        info!("Admin user exists, skipping creation password bootstrap");
        return Ok(None);
    }

    let (admin_password, _) = engine
        .get::<InitialAdminCreationPasswordProjection>()
        .await?;
    if admin_password.is_active() {
        info!("Admin creation password already active, skipping bootstrap");
        return Ok(None);
    }

    let password = auth::generate_password();
    let hashed = auth::hash_password_with_random_salt(&password);

    db.event_store()
        .append(&[InitialAdminCreationPasswordCreated {
            password_hash: hashed.hash,
            salt: hashed.salt,
        }
        .into()])
        .await
        .map_err(ProjectionError::Database)?;

    engine.refresh_snapshots_in_background("bootstrap");

    Ok(Some(password))
}
