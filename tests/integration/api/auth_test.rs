//! Authentication API integration tests
//!
//! Tests for registration, login, logout, the current user and user search.

use axum::http::{header, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::assertions::{assert_error, assert_field_error};
use crate::common::TestApp;

fn registration(username: &str) -> serde_json::Value {
    json!({
        "username": username,
        "email": format!("{username}@example.com"),
        "password": "password123",
        "password2": "password123",
        "first_name": "Test",
        "last_name": "User"
    })
}

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::new().await;

    let response = app.post("/api/auth/register", None, registration("alice")).await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["username"], "alice");
    assert_eq!(response.body["email"], "alice@example.com");
    assert_eq!(response.body["first_name"], "Test");
    assert!(response.body.get("password").is_none());
    assert!(response.body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_password_mismatch() {
    let app = TestApp::new().await;
    let mut body = registration("alice");
    body["password2"] = json!("different123");

    let response = app.post("/api/auth/register", None, body).await;

    assert_field_error(&response, "password");
    assert_eq!(response.body["fields"]["password"][0], "Password fields didn't match.");
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::new().await;
    app.post("/api/auth/register", None, registration("alice")).await;

    let response = app.post("/api/auth/register", None, registration("alice")).await;

    assert_field_error(&response, "username");
    assert_eq!(response.body["reason"], "conflict");
}

#[tokio::test]
async fn test_register_missing_fields() {
    let app = TestApp::new().await;

    let response = app.post("/api/auth/register", None, json!({})).await;

    assert_error(&response, StatusCode::BAD_REQUEST, "validation_error");
    for field in ["username", "email", "password", "password2"] {
        assert!(response.body["fields"][field].is_array(), "no error for {field}");
    }
}

#[tokio::test]
async fn test_register_then_login_then_me() {
    let app = TestApp::new().await;
    app.post("/api/auth/register", None, registration("alice")).await;

    let login = app
        .post(
            "/api/auth/login",
            None,
            json!({ "username": "alice", "password": "password123" }),
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.body["user"]["username"], "alice");
    let token = login.body["token"].as_str().expect("token").to_string();

    let me = app.get("/api/auth/user", Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["username"], "alice");
    assert_eq!(me.body["id"], login.body["user"]["id"]);
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;

    let wrong_password = app
        .post(
            "/api/auth/login",
            None,
            json!({ "username": alice.username, "password": "wrongpassword" }),
        )
        .await;
    let unknown_user = app
        .post(
            "/api/auth/login",
            None,
            json!({ "username": "ghost", "password": alice.password }),
        )
        .await;

    assert_error(&wrong_password, StatusCode::BAD_REQUEST, "invalid_credentials");
    assert_eq!(wrong_password.body["error"], "Invalid credentials");
    assert_eq!(wrong_password.body, unknown_user.body);
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;

    let response = app.post("/api/auth/logout", Some(&alice.token), json!({})).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["detail"], "Successfully logged out.");

    let response = app.get("/api/auth/user", Some(&alice.token)).await;
    assert_error(&response, StatusCode::UNAUTHORIZED, "authentication_required");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = TestApp::new().await;

    for uri in ["/api/auth/user", "/api/auth/users", "/api/projects"] {
        let response = app.get(uri, None).await;
        assert_error(&response, StatusCode::UNAUTHORIZED, "authentication_required");
        assert_eq!(response.headers[header::WWW_AUTHENTICATE], "Bearer");
    }

    let response = app.get("/api/auth/user", Some("not-a-token")).await;
    assert_error(&response, StatusCode::UNAUTHORIZED, "authentication_required");
}

#[tokio::test]
async fn test_user_search() {
    let app = TestApp::new().await;
    let bob = app.user("bob").await;
    app.user("alice").await;
    app.user("alicia").await;

    let all = app.get("/api/auth/users", Some(&bob.token)).await;
    assert_eq!(all.status, StatusCode::OK);
    let names: Vec<_> = all.body.as_array().unwrap().iter().map(|u| u["username"].clone()).collect();
    assert_eq!(names, [json!("alice"), json!("alicia"), json!("bob")]);

    let exact = app.get("/api/auth/users?username=alice", Some(&bob.token)).await;
    assert_eq!(exact.body.as_array().unwrap().len(), 1);
    assert_eq!(exact.body[0]["username"], "alice");

    let none = app.get("/api/auth/users?username=ali", Some(&bob.token)).await;
    assert_eq!(none.body, json!([]));
}

#[tokio::test]
async fn test_health_and_unknown_route() {
    let app = TestApp::new().await;

    let health = app.get("/health", None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["status"], "ok");

    let missing = app.get("/nope", None).await;
    assert_error(&missing, StatusCode::NOT_FOUND, "not_found");
}
