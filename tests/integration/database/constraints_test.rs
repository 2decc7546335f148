//! Schema constraint tests
//!
//! Exercise the database directly to check the rules the schema enforces on
//! its own, whatever the application layer does.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::common::TestDatabase;

async fn insert_user(pool: &SqlitePool, username: &str) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO users (id, username, email, password_hash, created_at) VALUES (?, ?, ?, 'x', ?)")
        .bind(id)
        .bind(username)
        .bind(format!("{username}@example.com"))
        .bind(Utc::now())
        .execute(pool)
        .await
        .expect("insert user");
    id
}

async fn insert_project(pool: &SqlitePool, title: &str) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();
    sqlx::query("INSERT INTO projects (id, title, description, created_at, updated_at) VALUES (?, ?, '', ?, ?)")
        .bind(id)
        .bind(title)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await?;
    Ok(id)
}

async fn insert_member(pool: &SqlitePool, project_id: Uuid, user_id: Uuid, role: &str) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO project_members (id, project_id, user_id, role, created_at) VALUES (?, ?, ?, ?, ?)")
        .bind(Uuid::new_v4())
        .bind(project_id)
        .bind(user_id)
        .bind(role)
        .bind(Utc::now())
        .execute(pool)
        .await?;
    Ok(())
}

async fn insert_comment(pool: &SqlitePool, project_id: Uuid, user_id: Uuid, text: &str) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO comments (id, project_id, user_id, text, created_at) VALUES (?, ?, ?, ?, ?)")
        .bind(Uuid::new_v4())
        .bind(project_id)
        .bind(user_id)
        .bind(text)
        .bind(Utc::now())
        .execute(pool)
        .await?;
    Ok(())
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error().is_some_and(|e| e.is_unique_violation())
}

#[tokio::test]
async fn test_single_owner_per_project() {
    let db = TestDatabase::new().await;
    let alice = insert_user(db.pool(), "alice").await;
    let bob = insert_user(db.pool(), "bob").await;
    let project = insert_project(db.pool(), "Plan").await.unwrap();

    insert_member(db.pool(), project, alice, "owner").await.unwrap();
    let err = insert_member(db.pool(), project, bob, "owner").await.unwrap_err();
    assert!(is_unique_violation(&err), "{err:?}");

    insert_member(db.pool(), project, bob, "editor").await.unwrap();

    let other = insert_project(db.pool(), "Other").await.unwrap();
    insert_member(db.pool(), other, bob, "owner").await.unwrap();
}

#[tokio::test]
async fn test_one_membership_per_user_and_project() {
    let db = TestDatabase::new().await;
    let alice = insert_user(db.pool(), "alice").await;
    let project = insert_project(db.pool(), "Plan").await.unwrap();

    insert_member(db.pool(), project, alice, "reader").await.unwrap();
    let err = insert_member(db.pool(), project, alice, "editor").await.unwrap_err();
    assert!(is_unique_violation(&err), "{err:?}");
}

#[tokio::test]
async fn test_check_constraints() {
    let db = TestDatabase::new().await;
    let alice = insert_user(db.pool(), "alice").await;
    let project = insert_project(db.pool(), "Plan").await.unwrap();

    assert!(insert_member(db.pool(), project, alice, "admin").await.is_err());
    assert!(insert_project(db.pool(), "").await.is_err());
    assert!(insert_project(db.pool(), &"t".repeat(256)).await.is_err());
    assert!(insert_comment(db.pool(), project, alice, "").await.is_err());
    assert!(insert_comment(db.pool(), project, alice, &"c".repeat(301)).await.is_err());
    insert_comment(db.pool(), project, alice, &"c".repeat(300)).await.unwrap();
}

#[tokio::test]
async fn test_foreign_keys_enforced() {
    let db = TestDatabase::new().await;
    let alice = insert_user(db.pool(), "alice").await;

    assert!(insert_member(db.pool(), Uuid::new_v4(), alice, "reader").await.is_err());
    assert!(insert_comment(db.pool(), Uuid::new_v4(), alice, "hi").await.is_err());
}

#[tokio::test]
async fn test_deletes_cascade() {
    let db = TestDatabase::new().await;
    let alice = insert_user(db.pool(), "alice").await;
    let bob = insert_user(db.pool(), "bob").await;
    let project = insert_project(db.pool(), "Plan").await.unwrap();
    insert_member(db.pool(), project, alice, "owner").await.unwrap();
    insert_member(db.pool(), project, bob, "editor").await.unwrap();
    insert_comment(db.pool(), project, bob, "hello").await.unwrap();
    insert_comment(db.pool(), project, alice, "hi bob").await.unwrap();

    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(bob)
        .execute(db.pool())
        .await
        .unwrap();

    let project_id = project.to_string();
    assert_eq!(db.count_for_project("project_members", &project_id).await, 1);
    assert_eq!(db.count_for_project("comments", &project_id).await, 1);

    sqlx::query("DELETE FROM projects WHERE id = ?")
        .bind(project)
        .execute(db.pool())
        .await
        .unwrap();

    assert_eq!(db.count_for_project("project_members", &project_id).await, 0);
    assert_eq!(db.count_for_project("comments", &project_id).await, 0);
}
