//! Project API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::assertions::{assert_error, assert_field_error};
use crate::common::TestApp;

#[tokio::test]
async fn test_collaboration_scenario() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let bob = app.user("bob").await;

    let created = app
        .post(
            "/api/projects",
            Some(&alice.token),
            json!({ "title": "P", "description": "first draft" }),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["owner"]["username"], "alice");
    let id = created.body["id"].as_str().unwrap().to_string();

    app.add_member(&alice, &id, &bob, "editor").await;

    let edited = app
        .patch(&format!("/api/projects/{id}"), Some(&bob.token), json!({ "title": "P2" }))
        .await;
    assert_eq!(edited.status, StatusCode::OK);
    assert_eq!(edited.body["title"], "P2");
    assert_eq!(edited.body["description"], "first draft");

    let comment = app
        .post(
            &format!("/api/projects/{id}/add-comment"),
            Some(&bob.token),
            json!({ "text": "looks good" }),
        )
        .await;
    assert_eq!(comment.status, StatusCode::CREATED);

    let denied = app.delete(&format!("/api/projects/{id}"), Some(&bob.token)).await;
    assert_error(&denied, StatusCode::FORBIDDEN, "permission_denied");

    let deleted = app.delete(&format!("/api/projects/{id}"), Some(&alice.token)).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    assert_eq!(app.db.count_for_project("project_members", &id).await, 0);
    assert_eq!(app.db.count_for_project("comments", &id).await, 0);

    let gone = app.get(&format!("/api/projects/{id}"), Some(&alice.token)).await;
    assert_error(&gone, StatusCode::NOT_FOUND, "not_found");
}

#[tokio::test]
async fn test_create_makes_single_owner_membership() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let id = app.project(&alice, "Roadmap").await;

    let members = app.get(&format!("/api/projects/{id}/users"), Some(&alice.token)).await;
    assert_eq!(members.status, StatusCode::OK);

    let members = members.body.as_array().unwrap().clone();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["role"], "owner");
    assert_eq!(members[0]["user_details"]["username"], "alice");
}

#[tokio::test]
async fn test_create_validation() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;

    let missing = app.post("/api/projects", Some(&alice.token), json!({})).await;
    assert_field_error(&missing, "title");

    let blank = app.post("/api/projects", Some(&alice.token), json!({ "title": "   " })).await;
    assert_field_error(&blank, "title");

    let long = app
        .post(
            "/api/projects",
            Some(&alice.token),
            json!({ "title": "ok", "description": "d".repeat(501) }),
        )
        .await;
    assert_field_error(&long, "description");

    let list = app.get("/api/projects", Some(&alice.token)).await;
    assert_eq!(list.body, json!([]));
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;

    let response = app
        .request(
            axum::http::Method::POST,
            "/api/projects",
            Some(&alice.token),
            Some(json!("just a string")),
        )
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST, "validation_error");
}

#[tokio::test]
async fn test_list_only_shows_member_projects() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let bob = app.user("bob").await;
    let shared = app.project(&alice, "Shared").await;
    app.project(&alice, "Private").await;
    app.add_member(&alice, &shared, &bob, "reader").await;

    let bobs = app.get("/api/projects", Some(&bob.token)).await;
    let titles: Vec<_> = bobs.body.as_array().unwrap().iter().map(|p| p["title"].clone()).collect();
    assert_eq!(titles, [json!("Shared")]);

    let alices = app.get("/api/projects", Some(&alice.token)).await;
    assert_eq!(alices.body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_retrieve_forbidden_for_non_member_and_404_for_missing() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let mallory = app.user("mallory").await;
    let id = app.project(&alice, "Secret").await;

    let response = app.get(&format!("/api/projects/{id}"), Some(&mallory.token)).await;
    assert_error(&response, StatusCode::FORBIDDEN, "permission_denied");

    let missing = uuid::Uuid::new_v4();
    let response = app.get(&format!("/api/projects/{missing}"), Some(&alice.token)).await;
    assert_error(&response, StatusCode::NOT_FOUND, "not_found");

    let response = app.get("/api/projects/not-a-uuid", Some(&alice.token)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reader_cannot_edit() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let carol = app.user("carol").await;
    let id = app.project(&alice, "Roadmap").await;
    app.add_member(&alice, &id, &carol, "reader").await;

    let view = app.get(&format!("/api/projects/{id}"), Some(&carol.token)).await;
    assert_eq!(view.status, StatusCode::OK);
    assert_eq!(view.body["owner"]["username"], "alice");

    let edit = app
        .patch(&format!("/api/projects/{id}"), Some(&carol.token), json!({ "title": "mine" }))
        .await;
    assert_error(&edit, StatusCode::FORBIDDEN, "permission_denied");

    let delete = app.delete(&format!("/api/projects/{id}"), Some(&carol.token)).await;
    assert_error(&delete, StatusCode::FORBIDDEN, "permission_denied");
}

#[tokio::test]
async fn test_put_requires_every_field_and_bumps_updated_at() {
    let app = TestApp::new().await;
    let alice = app.user("alice").await;
    let id = app.project(&alice, "Roadmap").await;
    let uri = format!("/api/projects/{id}");

    let partial = app.put(&uri, Some(&alice.token), json!({ "title": "New" })).await;
    assert_field_error(&partial, "description");

    let before = app.get(&uri, Some(&alice.token)).await;
    let full = app
        .put(&uri, Some(&alice.token), json!({ "title": "New", "description": "" }))
        .await;
    assert_eq!(full.status, StatusCode::OK);
    assert_eq!(full.body["title"], "New");
    assert_eq!(full.body["created_at"], before.body["created_at"]);

    let created: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(full.body["created_at"].clone()).unwrap();
    let updated: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(full.body["updated_at"].clone()).unwrap();
    assert!(updated >= created);
}
