//! Comment store
//!
//! Comments are append-only: there is no update, and deletion only happens by
//! cascade when the project (or the author) goes away.

use chrono::Utc;
use sqlx::SqliteConnection;
use uuid::Uuid;

use crate::backend::projects::models::{Comment, CommentEntry, CommentRow};

/// Insert a comment and return it with the author's profile
pub async fn insert_comment(
    conn: &mut SqliteConnection,
    project_id: Uuid,
    user_id: Uuid,
    text: &str,
) -> Result<CommentEntry, sqlx::Error> {
    let comment = Comment {
        id: Uuid::new_v4(),
        project_id,
        user_id,
        text: text.to_string(),
        created_at: Utc::now(),
    };

    sqlx::query(
        r#"
        INSERT INTO comments (id, project_id, user_id, text, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(comment.id)
    .bind(comment.project_id)
    .bind(comment.user_id)
    .bind(&comment.text)
    .bind(comment.created_at)
    .execute(&mut *conn)
    .await?;

    get_comment(conn, comment.id).await
}

async fn get_comment(conn: &mut SqliteConnection, comment_id: Uuid) -> Result<CommentEntry, sqlx::Error> {
    let row = sqlx::query_as::<_, CommentRow>(
        r#"
        SELECT c.id, c.project_id, c.user_id, c.text, c.created_at,
               u.username, u.email, u.first_name, u.last_name
        FROM comments c
        JOIN users u ON u.id = c.user_id
        WHERE c.id = ?
        "#,
    )
    .bind(comment_id)
    .fetch_one(conn)
    .await?;

    Ok(row.into())
}

/// All comments on a project, oldest first
pub async fn list_comments(conn: &mut SqliteConnection, project_id: Uuid) -> Result<Vec<CommentEntry>, sqlx::Error> {
    let rows = sqlx::query_as::<_, CommentRow>(
        r#"
        SELECT c.id, c.project_id, c.user_id, c.text, c.created_at,
               u.username, u.email, u.first_name, u.last_name
        FROM comments c
        JOIN users u ON u.id = c.user_id
        WHERE c.project_id = ?
        ORDER BY c.created_at, c.rowid
        "#,
    )
    .bind(project_id)
    .fetch_all(conn)
    .await?;

    Ok(rows.into_iter().map(CommentEntry::from).collect())
}
