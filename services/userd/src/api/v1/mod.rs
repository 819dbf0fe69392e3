//! API v1 routes.

mod admin_password;
mod users;

use axum::Router;

use crate::state::AppState;

/// Create API v1 routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::routes())
        // Initial admin setup lives at the v1 root:
        // /v1/initial-admin-password, /v1/initial-admin
        .merge(admin_password::routes())
}
