//! HTTP API integration tests over an in-memory database.

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use userd_server::{api, bootstrap, projections::ProjectionEngine, state::AppState};

use common::test_db;

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn test_router_builds_and_serves_root_level_routes() {
    // Health routes are merged at the root; building the router must not
    // panic and both root-level and nested routes must resolve.
    let db = test_db().await;
    let app = api::create_router(AppState::new(db));

    let (status, _) = send(&app, "GET", "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", "/v1/users", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", "/no-such-route", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_healthz_and_readyz() {
    let db = test_db().await;
    let app = api::create_router(AppState::new(db));

    let (status, body) = send(&app, "GET", "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "userd");

    let (status, body) = send(&app, "GET", "/readyz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["components"]["database"]["status"], "ok");
    assert_eq!(body["components"]["event_log"]["status"], "ok");
}

#[tokio::test]
async fn test_create_and_list_users() {
    let db = test_db().await;
    let app = api::create_router(AppState::new(db));

    let (status, created) = send(
        &app,
        "POST",
        "/v1/users",
        Some(json!({
            "display_name": "Foo",
            "email": "foo@example.com",
            "password": "hunter2hunter2"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["display_name"], "Foo");
    assert_eq!(created["has_password_login"], true);
    assert!(created["id"].as_str().unwrap().starts_with("usr_"));

    let (status, listed) = send(&app, "GET", "/v1/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["total"], 1);
    assert_eq!(listed["items"][0]["id"], created["id"]);

    let uri = format!("/v1/users/{}", created["id"].as_str().unwrap());
    let (status, fetched) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["email"], "foo@example.com");
}

#[tokio::test]
async fn test_create_user_validation() {
    let db = test_db().await;
    let app = api::create_router(AppState::new(db));

    let (status, body) = send(
        &app,
        "POST",
        "/v1/users",
        Some(json!({"display_name": "", "email": "foo@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_display_name");

    let (status, body) = send(
        &app,
        "POST",
        "/v1/users",
        Some(json!({"display_name": "Foo", "email": "nope"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_email");
}

#[tokio::test]
async fn test_assign_role() {
    let db = test_db().await;
    let app = api::create_router(AppState::new(db));

    let (_, created) = send(
        &app,
        "POST",
        "/v1/users",
        Some(json!({"display_name": "Foo", "email": "foo@example.com"})),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        "POST",
        &format!("/v1/users/{id}/role"),
        Some(json!({"role": "EDITOR"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "EDITOR");

    let (status, fetched) = send(&app, "GET", &format!("/v1/users/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["role"], "EDITOR");
}

#[tokio::test]
async fn test_assign_role_to_unknown_user() {
    let db = test_db().await;
    let app = api::create_router(AppState::new(db));

    let ghost = userd_id::UserId::new();
    let (status, body) = send(
        &app,
        "POST",
        &format!("/v1/users/{ghost}/role"),
        Some(json!({"role": "VIEWER"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "user_not_found");

    let (status, body) = send(
        &app,
        "POST",
        "/v1/users/not-a-ulid/role",
        Some(json!({"role": "VIEWER"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_user_id");
}

#[tokio::test]
async fn test_initial_admin_flow() {
    let db = test_db().await;
    let engine = ProjectionEngine::new(&db);

    let password = bootstrap::ensure_admin_creation_password(&db, &engine)
        .await
        .unwrap()
        .expect("bootstrap should generate a password");

    // Bootstrap is idempotent while the password stays active.
    let again = bootstrap::ensure_admin_creation_password(&db, &engine)
        .await
        .unwrap();
    assert_eq!(again, None);

    let app = api::create_router(AppState::new(db));

    let (status, body) = send(&app, "GET", "/v1/initial-admin-password", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["active"], true);

    let (status, body) = send(
        &app,
        "POST",
        "/v1/initial-admin",
        Some(json!({
            "creation_password": "wrong",
            "display_name": "Admin",
            "email": "admin@example.com",
            "password": "secret-password"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "invalid_creation_password");

    let (status, admin) = send(
        &app,
        "POST",
        "/v1/initial-admin",
        Some(json!({
            "creation_password": password,
            "display_name": "Admin",
            "email": "admin@example.com",
            "password": "secret-password"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(admin["role"], "ADMIN");
    assert_eq!(admin["has_password_login"], true);

    // The ADMIN assignment clears the creation password on the next fold.
    let (status, body) = send(&app, "GET", "/v1/initial-admin-password", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["active"], false);

    let (status, body) = send(
        &app,
        "POST",
        "/v1/initial-admin",
        Some(json!({
            "creation_password": password,
            "display_name": "Other",
            "email": "other@example.com",
            "password": "secret-password"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "admin_exists");
}

#[tokio::test]
async fn test_initial_admin_without_active_password() {
    let db = test_db().await;
    let app = api::create_router(AppState::new(db));

    let (status, body) = send(
        &app,
        "POST",
        "/v1/initial-admin",
        Some(json!({
            "creation_password": "anything",
            "display_name": "Admin",
            "email": "admin@example.com",
            "password": "secret-password"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "no_active_creation_password");
}
