//! API integration tests
//!
//! Drives the full router in-process with a fresh in-memory state per
//! test; no external services are required.

use asana_api::{create_router, state::AppState};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// Build a fresh application with empty stores and seeded teachers
fn test_app() -> Router {
    create_router(Arc::new(AppState::default()))
}

/// Helper to create a JSON request
fn json_request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");

    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }

    match body {
        Some(json_body) => builder
            .body(Body::from(serde_json::to_string(&json_body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn response_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn register_body(email: &str) -> Value {
    json!({
        "email": email,
        "first_name": "Hugo",
        "last_name": "Lebolide",
        "password": "Pass!w0rd",
    })
}

/// Register an account and log it in; returns (token, user id)
async fn register_and_login(app: &Router, email: &str) -> (String, i64) {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            None,
            Some(register_body(email)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": email, "password": "Pass!w0rd"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    let token = body["token"].as_str().unwrap().to_string();
    let id = body["id"].as_i64().unwrap();
    (token, id)
}

/// Create a session led by a seeded teacher; returns its id
async fn create_session(app: &Router, token: &str, name: &str) -> i64 {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/session",
            Some(token),
            Some(json!({
                "name": name,
                "description": "Morning flow for beginners",
                "date": "2026-09-01T09:00:00Z",
                "teacher_id": 1,
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    response_json(response).await["id"].as_i64().unwrap()
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_check() {
    let app = test_app();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert!(json["uptime_seconds"].is_number());
}

// =============================================================================
// Registration and login
// =============================================================================

#[tokio::test]
async fn test_register_then_login() {
    let app = test_app();

    let (token, id) = register_and_login(&app, "test@studio.com").await;
    assert!(!token.is_empty());
    assert!(id > 0);
}

#[tokio::test]
async fn test_register_duplicate_email_is_rejected() {
    let app = test_app();

    let first = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            None,
            Some(register_body("test@studio.com")),
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            None,
            Some(register_body("test@studio.com")),
        ))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);

    let json = response_json(second).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = test_app();
    register_and_login(&app, "test@studio.com").await;

    let wrong_password = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": "test@studio.com", "password": "Wrong!0pass"})),
        ))
        .await
        .unwrap();

    let unknown_email = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": "ghost@studio.com", "password": "Pass!w0rd"})),
        ))
        .await
        .unwrap();

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let a = response_json(wrong_password).await;
    let b = response_json(unknown_email).await;
    assert_eq!(a, b);
}

// =============================================================================
// Authentication gate
// =============================================================================

#[tokio::test]
async fn test_me_returns_current_identity() {
    let app = test_app();
    let (token, id) = register_and_login(&app, "test@studio.com").await;

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/auth/me", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["email"], "test@studio.com");
    assert_eq!(json["id"].as_i64().unwrap(), id);
    assert_eq!(json["admin"], false);
    assert!(json.get("password_hash").is_none());
}

#[tokio::test]
async fn test_protected_route_without_token() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/auth/me", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = response_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_protected_route_with_garbage_token() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            "/api/auth/me",
            Some("not-a-real-token"),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Sessions and rosters
// =============================================================================

#[tokio::test]
async fn test_session_crud() {
    let app = test_app();
    let (token, _) = register_and_login(&app, "test@studio.com").await;

    let session_id = create_session(&app, &token, "Yoga").await;

    let list = app
        .clone()
        .oneshot(json_request("GET", "/api/session", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(list.status(), StatusCode::OK);
    let sessions = response_json(list).await;
    assert_eq!(sessions.as_array().unwrap().len(), 1);

    let update = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/session/{session_id}"),
            Some(&token),
            Some(json!({
                "name": "Pilates",
                "description": "Core work",
                "date": "2026-09-02T09:00:00Z",
                "teacher_id": 2,
            })),
        ))
        .await
        .unwrap();
    assert_eq!(update.status(), StatusCode::OK);
    assert_eq!(response_json(update).await["name"], "Pilates");

    let delete = app
        .clone()
        .oneshot(json_request(
            "DELETE",
            &format!("/api/session/{session_id}"),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(delete.status(), StatusCode::OK);

    let gone = app
        .clone()
        .oneshot(json_request(
            "GET",
            &format!("/api/session/{session_id}"),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_session_with_unknown_teacher() {
    let app = test_app();
    let (token, _) = register_and_login(&app, "test@studio.com").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/session",
            Some(&token),
            Some(json!({
                "name": "Yoga",
                "description": "Morning flow",
                "date": "2026-09-01T09:00:00Z",
                "teacher_id": 99,
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_participate_and_leave_flow() {
    let app = test_app();
    let (token, user_id) = register_and_login(&app, "u2@studio.com").await;
    let session_id = create_session(&app, &token, "Yoga").await;

    let participate_uri = format!("/api/session/{session_id}/participate/{user_id}");

    let join = app
        .clone()
        .oneshot(json_request("POST", &participate_uri, Some(&token), None))
        .await
        .unwrap();
    assert_eq!(join.status(), StatusCode::OK);

    // Joining twice violates the at-most-once invariant
    let join_again = app
        .clone()
        .oneshot(json_request("POST", &participate_uri, Some(&token), None))
        .await
        .unwrap();
    assert_eq!(join_again.status(), StatusCode::BAD_REQUEST);

    // Roster holds exactly one entry
    let session = app
        .clone()
        .oneshot(json_request(
            "GET",
            &format!("/api/session/{session_id}"),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    let json = response_json(session).await;
    assert_eq!(json["user_ids"], json!([user_id]));

    let leave = app
        .clone()
        .oneshot(json_request("DELETE", &participate_uri, Some(&token), None))
        .await
        .unwrap();
    assert_eq!(leave.status(), StatusCode::OK);

    let leave_again = app
        .clone()
        .oneshot(json_request("DELETE", &participate_uri, Some(&token), None))
        .await
        .unwrap();
    assert_eq!(leave_again.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_participate_in_unknown_session() {
    let app = test_app();
    let (token, user_id) = register_and_login(&app, "test@studio.com").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/session/99/participate/{user_id}"),
            Some(&token),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Account deletion
// =============================================================================

#[tokio::test]
async fn test_delete_other_account_is_forbidden() {
    let app = test_app();
    let (_, target_id) = register_and_login(&app, "u1@studio.com").await;
    let (caller_token, _) = register_and_login(&app, "u2@studio.com").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "DELETE",
            &format!("/api/user/{target_id}"),
            Some(&caller_token),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_self_delete_then_token_stops_resolving() {
    let app = test_app();
    let (token, id) = register_and_login(&app, "test@studio.com").await;

    let delete = app
        .clone()
        .oneshot(json_request(
            "DELETE",
            &format!("/api/user/{id}"),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(delete.status(), StatusCode::OK);

    // The token still carries a valid signature, but the identity is gone
    let me = app
        .clone()
        .oneshot(json_request("GET", "/api/auth/me", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(me.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Teachers
// =============================================================================

#[tokio::test]
async fn test_teachers_are_seeded() {
    let app = test_app();
    let (token, _) = register_and_login(&app, "test@studio.com").await;

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/teacher", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 2);

    let missing = app
        .clone()
        .oneshot(json_request("GET", "/api/teacher/99", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}
