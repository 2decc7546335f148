//! Project store
//!
//! Plain persistence for project rows. No authorization happens here; see
//! `service` for the checked operations.

use chrono::Utc;
use sqlx::SqliteExecutor;
use uuid::Uuid;

use crate::backend::projects::models::Project;

/// Insert a project with fresh timestamps
pub async fn insert_project<'e, E>(executor: E, title: &str, description: &str) -> Result<Project, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let now = Utc::now();
    let project = Project {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: description.to_string(),
        created_at: now,
        updated_at: now,
    };

    sqlx::query(
        r#"
        INSERT INTO projects (id, title, description, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(project.id)
    .bind(&project.title)
    .bind(&project.description)
    .bind(project.created_at)
    .bind(project.updated_at)
    .execute(executor)
    .await?;

    Ok(project)
}

pub async fn find_project<'e, E>(executor: E, project_id: Uuid) -> Result<Option<Project>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, Project>(
        r#"
        SELECT id, title, description, created_at, updated_at
        FROM projects
        WHERE id = ?
        "#,
    )
    .bind(project_id)
    .fetch_optional(executor)
    .await
}

/// Projects on which `user_id` holds any membership, newest first
pub async fn list_projects_for_user<'e, E>(executor: E, user_id: Uuid) -> Result<Vec<Project>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, Project>(
        r#"
        SELECT p.id, p.title, p.description, p.created_at, p.updated_at
        FROM projects p
        JOIN project_members m ON m.project_id = p.id
        WHERE m.user_id = ?
        ORDER BY p.created_at DESC, p.rowid DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
}

/// Persist title and description, moving `updated_at` forward
///
/// `updated_at` never goes backwards even if the clock does.
pub async fn save_project<'e, E>(executor: E, project: &mut Project) -> Result<(), sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    project.updated_at = Utc::now().max(project.updated_at);

    sqlx::query(
        r#"
        UPDATE projects
        SET title = ?, description = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&project.title)
    .bind(&project.description)
    .bind(project.updated_at)
    .bind(project.id)
    .execute(executor)
    .await?;

    Ok(())
}

/// Delete a project; memberships and comments go with it
pub async fn delete_project<'e, E>(executor: E, project_id: Uuid) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM projects WHERE id = ?")
        .bind(project_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}
