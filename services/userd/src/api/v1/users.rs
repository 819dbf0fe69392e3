//! User API endpoints.
//!
//! Every write appends to the event log and triggers a background snapshot
//! refresh; every read rebuilds the users projection through the engine.

use axum::{
    extract::{Path, State},
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
use crate::projections::{User, UsersProjection};
use crate::state::AppState;

/// Create user routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user).get(list_users))
        .route("/{user_id}", get(get_user))
        .route("/{user_id}/role", post(assign_role))
}

// =============================================================================
// Request/Response Types
// =============================================================================

/// Request to create a new user.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    /// Display name.
    pub display_name: String,

    /// Email address.
    pub email: String,

    /// Optional initial password; configures password login when present.
    #[serde(default)]
    pub password: Option<String>,
}

/// Request to assign a role.
#[derive(Debug, Deserialize)]
pub struct AssignRoleRequest {
    /// Role to assign.
    pub role: Role,
}

/// Response for a single user.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct UserResponse {
    /// User ID.
    pub id: UserId,

    /// Display name.
    pub display_name: String,

    /// Email address.
    pub email: String,

    /// Assigned role, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    /// Whether password login is configured.
    pub has_password_login: bool,
}

/// Response for listing users.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct ListUsersResponse {
    /// List of users, in creation order.
    pub items: Vec<UserResponse>,

    /// Total count.
    pub total: i64,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            display_name: user.display_name.clone(),
            email: user.email.clone(),
            role: user.role,
            has_password_login: user.password_login.is_some(),
        }
    }
}

fn validate_identity(display_name: &str, email: &str) -> Result<(), ApiError> {
    if display_name.is_empty() {
        return Err(ApiError::bad_request(
            "invalid_display_name",
            "Display name cannot be empty",
        ));
    }
    if display_name.len() > 100 {
        return Err(ApiError::bad_request(
            "invalid_display_name",
            "Display name cannot exceed 100 characters",
        ));
    }
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::bad_request(
            "invalid_email",
            "Email address is not valid",
        ));
    }
    Ok(())
}

fn parse_user_id(raw: &str) -> Result<UserId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request("invalid_user_id", "Invalid user ID format"))
}

// =============================================================================
// Handlers
// =============================================================================

/// Create a new user.
///
/// POST /v1/users
async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_identity(&req.display_name, &req.email)?;

    let user_id = UserId::new();
    let mut events: Vec<Event> = vec![UserCreated {
        id: user_id,
        display_name: req.display_name.clone(),
        email: req.email.clone(),
    }
    .into()];

    if let Some(password) = &req.password {
        let hashed = auth::hash_password_with_random_salt(password);
        events.push(
            PasswordLoginConfigured {
                user_id,
                password_hash: hashed.hash,
                salt: hashed.salt,
            }
            .into(),
        );
    }

    let has_password_login = events.len() > 1;
    state.db().event_store().append(&events).await?;
    state.engine().refresh_snapshots_in_background("user.created");

    let response = UserResponse {
        id: user_id,
        display_name: req.display_name,
        email: req.email,
        role: None,
        has_password_login,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// List all users.
///
/// GET /v1/users
async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let (users, _) = state.engine().get::<UsersProjection>().await?;

    let items: Vec<UserResponse> = users.users.iter().map(UserResponse::from).collect();
    let total = items.len() as i64;

    Ok(Json(ListUsersResponse { items, total }))
}

/// Get a single user by ID.
///
/// GET /v1/users/{user_id}
async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = parse_user_id(&user_id)?;

    let (users, _) = state.engine().get::<UsersProjection>().await?;
    let user = users
        .get(user_id)
        .ok_or_else(|| ApiError::not_found("user_not_found", format!("User {user_id} not found")))?;

    Ok(Json(UserResponse::from(user)))
}

/// Assign a role to an existing user.
///
/// POST /v1/users/{user_id}/role
async fn assign_role(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(req): Json<AssignRoleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = parse_user_id(&user_id)?;

    let (users, _) = state.engine().get::<UsersProjection>().await?;
    let user = users
        .get(user_id)
        .ok_or_else(|| ApiError::not_found("user_not_found", format!("User {user_id} not found")))?;

    state
        .db()
        .event_store()
        .append(&[RoleAssigned {
            user_id,
            role: req.role,
        }
        .into()])
        .await?;
    state
        .engine()
        .refresh_snapshots_in_background("user.role_assigned");

    let mut response = UserResponse::from(user);
    response.role = Some(req.role);

    Ok(Json(response))
}
