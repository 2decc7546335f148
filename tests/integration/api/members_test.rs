//! Membership API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::assertions::{assert_error, assert_field_error};
use crate::common::TestApp;

#[tokio::test]
async fn test_add_member_defaults_to_reader() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let bob = app.user("bob").await;
    let id = app.project(&alice, "Roadmap").await;

    let response = app
        .post(
            &format!("/api/projects/{id}/add-user"),
            Some(&alice.token),
            json!({ "username": "bob" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["role"], "reader");
    assert_eq!(response.body["user_id"], bob.id.to_string());
    assert_eq!(response.body["user_details"]["username"], "bob");
}

#[tokio::test]
async fn test_add_member_by_user_id() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let bob = app.user("bob").await;
    let id = app.project(&alice, "Roadmap").await;

    let response = app
        .post(
            &format!("/api/projects/{id}/add-user"),
            Some(&alice.token),
            json!({ "user": bob.id, "role": "editor" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["role"], "editor");
}

#[tokio::test]
async fn test_add_member_rejections() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    app.user("bob").await;
    let id = app.project(&alice, "Roadmap").await;
    let uri = format!("/api/projects/{id}/add-user");

    let owner = app.post(&uri, Some(&alice.token), json!({ "username": "bob", "role": "owner" })).await;
    assert_field_error(&owner, "role");

    let bogus = app.post(&uri, Some(&alice.token), json!({ "username": "bob", "role": "admin" })).await;
    assert_field_error(&bogus, "role");

    let ghost = app.post(&uri, Some(&alice.token), json!({ "username": "ghost" })).await;
    assert_field_error(&ghost, "username");

    let nobody = app.post(&uri, Some(&alice.token), json!({})).await;
    assert_field_error(&nobody, "username");

    let first = app.post(&uri, Some(&alice.token), json!({ "username": "bob" })).await;
    assert_eq!(first.status, StatusCode::CREATED);
    let again = app.post(&uri, Some(&alice.token), json!({ "username": "bob", "role": "editor" })).await;
    assert_error(&again, StatusCode::BAD_REQUEST, "conflict");

    let self_add = app.post(&uri, Some(&alice.token), json!({ "username": "alice" })).await;
    assert_error(&self_add, StatusCode::BAD_REQUEST, "conflict");

    let members = app.get(&format!("/api/projects/{id}/users"), Some(&alice.token)).await;
    assert_eq!(members.body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_only_owner_manages_members() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let bob = app.user("bob").await;
    let carol = app.user("carol").await;
    let id = app.project(&alice, "Roadmap").await;
    app.add_member(&alice, &id, &bob, "editor").await;

    let add = app
        .post(
            &format!("/api/projects/{id}/add-user"),
            Some(&bob.token),
            json!({ "username": "carol" }),
        )
        .await;
    assert_error(&add, StatusCode::FORBIDDEN, "permission_denied");

    let promote = app
        .patch(
            &format!("/api/projects/{id}/update-role/{}", bob.id),
            Some(&bob.token),
            json!({ "role": "editor" }),
        )
        .await;
    assert_error(&promote, StatusCode::FORBIDDEN, "permission_denied");

    let outsider = app.get(&format!("/api/projects/{id}/users"), Some(&carol.token)).await;
    assert_error(&outsider, StatusCode::FORBIDDEN, "permission_denied");

    let listed = app.get(&format!("/api/projects/{id}/users"), Some(&bob.token)).await;
    assert_eq!(listed.status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_member_role() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let bob = app.user("bob").await;
    let carol = app.user("carol").await;
    let id = app.project(&alice, "Roadmap").await;
    app.add_member(&alice, &id, &bob, "reader").await;
    let uri = format!("/api/projects/{id}/update-role/{}", bob.id);

    let promoted = app.patch(&uri, Some(&alice.token), json!({ "role": "editor" })).await;
    assert_eq!(promoted.status, StatusCode::OK);
    assert_eq!(promoted.body["role"], "editor");

    let edit = app
        .patch(&format!("/api/projects/{id}"), Some(&bob.token), json!({ "title": "Bob's" }))
        .await;
    assert_eq!(edit.status, StatusCode::OK);

    let missing_role = app.patch(&uri, Some(&alice.token), json!({})).await;
    assert_field_error(&missing_role, "role");

    let unknown_role = app.patch(&uri, Some(&alice.token), json!({ "role": "admin" })).await;
    assert_field_error(&unknown_role, "role");

    let not_member = app
        .patch(
            &format!("/api/projects/{id}/update-role/{}", carol.id),
            Some(&alice.token),
            json!({ "role": "editor" }),
        )
        .await;
    assert_error(&not_member, StatusCode::NOT_FOUND, "not_found");

    let to_owner = app.patch(&uri, Some(&alice.token), json!({ "role": "owner" })).await;
    assert_field_error(&to_owner, "role");

    let demote_owner = app
        .patch(
            &format!("/api/projects/{id}/update-role/{}", alice.id),
            Some(&alice.token),
            json!({ "role": "reader" }),
        )
        .await;
    assert_error(&demote_owner, StatusCode::BAD_REQUEST, "conflict");
}

#[tokio::test]
async fn test_remove_member() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let bob = app.user("bob").await;
    let carol = app.user("carol").await;
    let id = app.project(&alice, "Roadmap").await;
    app.add_member(&alice, &id, &bob, "editor").await;

    let owner = app
        .delete(&format!("/api/projects/{id}/remove-user/{}", alice.id), Some(&alice.token))
        .await;
    assert_error(&owner, StatusCode::BAD_REQUEST, "conflict");

    let stranger = app
        .delete(&format!("/api/projects/{id}/remove-user/{}", carol.id), Some(&alice.token))
        .await;
    assert_error(&stranger, StatusCode::NOT_FOUND, "not_found");

    let removed = app
        .delete(&format!("/api/projects/{id}/remove-user/{}", bob.id), Some(&alice.token))
        .await;
    assert_eq!(removed.status, StatusCode::NO_CONTENT);

    let gone = app.get(&format!("/api/projects/{id}"), Some(&bob.token)).await;
    assert_error(&gone, StatusCode::FORBIDDEN, "permission_denied");
    assert_eq!(app.db.count_for_project("project_members", &id).await, 1);
}
