//! Initial admin setup endpoints.
//!
//! The first admin is created by presenting the admin creation password.
//! Assigning the ADMIN role clears that password on the next fold, so the
//! flow is single-use until a fresh creation event activates a new one.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use userd_events::{Event, PasswordLoginConfigured, Role, RoleAssigned, UserCreated};
use userd_id::UserId;

use crate::api::error::ApiError;
use crate::auth;
use crate::projections::{InitialAdminCreationPasswordProjection, UsersProjection};
use crate::state::AppState;

use super::users::UserResponse;

/// Create initial admin routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/initial-admin-password", get(creation_password_status))
        .route("/initial-admin", post(create_initial_admin))
}

/// Status of the admin creation password.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct CreationPasswordStatusResponse {
    /// Whether a creation password is currently active.
    pub active: bool,
}

/// Request to create the initial admin user.
#[derive(Debug, Deserialize)]
pub struct CreateInitialAdminRequest {
    /// The admin creation password logged at startup.
    pub creation_password: String,

    /// Display name for the admin user.
    pub display_name: String,

    /// Email address for the admin user.
    pub email: String,

    /// Login password for the admin user.
    pub password: String,
}

/// Report whether an admin creation password is active.
///
/// GET /v1/initial-admin-password
async fn creation_password_status(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let (projection, _) = state
        .engine()
        .get::<InitialAdminCreationPasswordProjection>()
        .await?;

    Ok(Json(CreationPasswordStatusResponse {
        active: projection.is_active(),
    }))
}

/// Create the first admin user.
///
/// POST /v1/initial-admin
async fn create_initial_admin(
    State(state): State<AppState>,
    Json(req): Json<CreateInitialAdminRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (users, _) = state.engine().get::<UsersProjection>().await?;
    if users.has_admin() {
        return Err(ApiError::conflict(
            "admin_exists",
            "An admin user already exists",
        ));
    }

    let (projection, _) = state
        .engine()
        .get::<InitialAdminCreationPasswordProjection>()
        .await?;
    let credential = projection.credential.as_ref().ok_or_else(|| {
        ApiError::forbidden(
            "no_active_creation_password",
            "No admin creation password is active",
        )
    })?;

    if !auth::verify_password(&req.creation_password, &credential.hash, &credential.salt) {
        return Err(ApiError::forbidden(
            "invalid_creation_password",
            "The admin creation password is not correct",
        ));
    }

    if req.display_name.is_empty() {
        return Err(ApiError::bad_request(
            "invalid_display_name",
            "Display name cannot be empty",
        ));
    }
    if req.email.is_empty() || !req.email.contains('@') {
        return Err(ApiError::bad_request(
            "invalid_email",
            "Email address is not valid",
        ));
    }
    if req.password.is_empty() {
        return Err(ApiError::bad_request(
            "invalid_password",
            "Password cannot be empty",
        ));
    }

    let user_id = UserId::new();
    let hashed = auth::hash_password_with_random_salt(&req.password);

    let events: Vec<Event> = vec![
        UserCreated {
            id: user_id,
            display_name: req.display_name.clone(),
            email: req.email.clone(),
        }
        .into(),
        PasswordLoginConfigured {
            user_id,
            password_hash: hashed.hash,
            salt: hashed.salt,
        }
        .into(),
        RoleAssigned {
            user_id,
            role: Role::Admin,
        }
        .into(),
    ];

    state.db().event_store().append(&events).await?;
    state
        .engine()
        .refresh_snapshots_in_background("initial_admin.created");

    let response = UserResponse {
        id: user_id,
        display_name: req.display_name,
        email: req.email,
        role: Some(Role::Admin),
        has_password_login: true,
    };

    Ok((StatusCode::CREATED, Json(response)))
}
