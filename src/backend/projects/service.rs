/**
 * Project Service
 *
 * Checked operations on projects and their sub-resources. Every function
 * takes the acting user's id explicitly, resolves the target project, asks
 * the authorization policy, and only then reads or writes.
 *
 * # Ordering
 *
 * 1. Missing project → `NotFound` (404)
 * 2. Role does not cover the action → `AuthorizationDenied` (403)
 * 3. Payload invalid → `Validation` (400)
 *
 * Mutations run inside one `BEGIN IMMEDIATE` transaction, so the check and
 * the write see the same membership state and concurrent writers queue on
 * the busy timeout instead of failing a lock upgrade.
 */

use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use uuid::Uuid;

use crate::backend::auth::users::{get_user_by_id, get_user_by_username, User};
use crate::backend::error::BackendError;
use crate::backend::projects::comments;
use crate::backend::projects::membership;
use crate::backend::projects::models::{
    CommentEntry, Member, Project, ProjectDetails, COMMENT_MAX_CHARS, DESCRIPTION_MAX_CHARS,
    TITLE_MAX_CHARS,
};
use crate::backend::projects::policy::{ProjectAccess, ProjectAction};
use crate::backend::projects::role::Role;
use crate::backend::projects::store;
use crate::backend::projects::types::{
    AddMemberRequest, CommentPayload, ProjectPayload, UpdateMode, UpdateRoleRequest,
};
use crate::shared::validation::{self, FieldErrors, REQUIRED};

/// Start a transaction that holds SQLite's write lock from the first statement
async fn begin_write(pool: &SqlitePool) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
    pool.begin_with("BEGIN IMMEDIATE").await
}

/// Load the project and the actor's standing on it
async fn resolve(
    conn: &mut SqliteConnection,
    actor: Uuid,
    project_id: Uuid,
) -> Result<(Project, ProjectAccess), BackendError> {
    let project = store::find_project(&mut *conn, project_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Project"))?;
    let role = membership::find_role(conn, project_id, actor).await?;

    Ok((project, ProjectAccess::new(actor, project_id, role)))
}

async fn with_owner(conn: &mut SqliteConnection, project: Project) -> Result<ProjectDetails, BackendError> {
    let owner = membership::owner(conn, project.id).await?;
    Ok(ProjectDetails { project, owner })
}

/// Projects the actor is a member of, with their owners
pub async fn list_projects(pool: &SqlitePool, actor: Uuid) -> Result<Vec<ProjectDetails>, BackendError> {
    let mut conn = pool.acquire().await?;
    let projects = store::list_projects_for_user(&mut *conn, actor).await?;

    let mut details = Vec::with_capacity(projects.len());
    for project in projects {
        details.push(with_owner(&mut conn, project).await?);
    }
    Ok(details)
}

/// Create a project owned by the actor
///
/// The project row and the owner membership are written in one transaction.
pub async fn create_project(
    pool: &SqlitePool,
    actor: Uuid,
    payload: ProjectPayload,
) -> Result<ProjectDetails, BackendError> {
    let mut errors = FieldErrors::new();
    let title = errors.check(validation::required_text("title", payload.title.as_deref(), TITLE_MAX_CHARS));
    let description = errors.check(validation::optional_text(
        "description",
        payload.description.as_deref(),
        DESCRIPTION_MAX_CHARS,
    ));
    let (Some(title), Some(description)) = (title, description) else {
        return Err(errors.into());
    };

    let mut tx = begin_write(pool).await?;
    let project = store::insert_project(&mut *tx, &title, &description).await?;
    membership::create(&mut tx, project.id, actor, Role::Owner).await?;
    let details = with_owner(&mut tx, project).await?;
    tx.commit().await?;

    tracing::info!(project = %details.project.id, owner = %actor, "project created");
    Ok(details)
}

pub async fn get_project(pool: &SqlitePool, actor: Uuid, project_id: Uuid) -> Result<ProjectDetails, BackendError> {
    let mut conn = pool.acquire().await?;
    let (project, access) = resolve(&mut conn, actor, project_id).await?;
    access.authorize(ProjectAction::Retrieve)?;

    with_owner(&mut conn, project).await
}

/// Update title and/or description
///
/// With [`UpdateMode::Replace`] both fields must be present; with
/// [`UpdateMode::Partial`] absent fields are left alone. `updated_at` is
/// bumped either way.
pub async fn update_project(
    pool: &SqlitePool,
    actor: Uuid,
    project_id: Uuid,
    payload: ProjectPayload,
    mode: UpdateMode,
) -> Result<ProjectDetails, BackendError> {
    let mut tx = begin_write(pool).await?;
    let (mut project, access) = resolve(&mut tx, actor, project_id).await?;
    access.authorize(ProjectAction::Update)?;

    let mut errors = FieldErrors::new();
    match (payload.title.as_deref(), mode) {
        (None, UpdateMode::Partial) => {}
        (title, _) => {
            if let Some(title) = errors.check(validation::required_text("title", title, TITLE_MAX_CHARS)) {
                project.title = title;
            }
        }
    }
    match (payload.description.as_deref(), mode) {
        (None, UpdateMode::Partial) => {}
        (None, UpdateMode::Replace) => errors.add("description", REQUIRED),
        (Some(description), _) => {
            if errors
                .check(validation::max_length("description", description, DESCRIPTION_MAX_CHARS))
                .is_some()
            {
                project.description = description.to_string();
            }
        }
    }
    errors.into_result()?;

    store::save_project(&mut *tx, &mut project).await?;
    let details = with_owner(&mut tx, project).await?;
    tx.commit().await?;

    tracing::info!(project = %project_id, actor = %actor, ?mode, "project updated");
    Ok(details)
}

/// Delete a project with its memberships and comments
pub async fn delete_project(pool: &SqlitePool, actor: Uuid, project_id: Uuid) -> Result<(), BackendError> {
    let mut tx = begin_write(pool).await?;
    let (_, access) = resolve(&mut tx, actor, project_id).await?;
    access.authorize(ProjectAction::Delete)?;

    store::delete_project(&mut *tx, project_id).await?;
    tx.commit().await?;

    tracing::info!(project = %project_id, actor = %actor, "project deleted");
    Ok(())
}

pub async fn list_members(pool: &SqlitePool, actor: Uuid, project_id: Uuid) -> Result<Vec<Member>, BackendError> {
    let mut conn = pool.acquire().await?;
    let (_, access) = resolve(&mut conn, actor, project_id).await?;
    access.authorize(ProjectAction::ListMembers)?;

    Ok(membership::list_members(&mut conn, project_id).await?)
}

fn parse_role(value: &str) -> Result<Role, BackendError> {
    let role: Role = value.parse().map_err(membership::MembershipError::from)?;
    if role == Role::Owner {
        return Err(membership::MembershipError::OwnerRoleNotAssignable.into());
    }
    Ok(role)
}

async fn find_target(conn: &mut SqliteConnection, request: &AddMemberRequest) -> Result<User, BackendError> {
    let (field, user) = match (request.username.as_deref(), request.user) {
        (Some(username), _) => ("username", get_user_by_username(conn, username).await?),
        (None, Some(user_id)) => ("user", get_user_by_id(conn, user_id).await?),
        (None, None) => return Err(BackendError::validation("username", REQUIRED)),
    };

    user.ok_or_else(|| BackendError::validation(field, "User not found."))
}

/// Add a collaborator as editor or reader (reader by default)
pub async fn add_member(
    pool: &SqlitePool,
    actor: Uuid,
    project_id: Uuid,
    request: AddMemberRequest,
) -> Result<Member, BackendError> {
    let mut tx = begin_write(pool).await?;
    let (_, access) = resolve(&mut tx, actor, project_id).await?;
    access.authorize(ProjectAction::AddMember)?;

    let role = match request.role.as_deref() {
        Some(role) => parse_role(role)?,
        None => Role::DEFAULT_MEMBER,
    };
    let target = find_target(&mut tx, &request).await?;

    membership::create(&mut tx, project_id, target.id, role).await?;
    let member = membership::get_member(&mut tx, project_id, target.id).await?;
    tx.commit().await?;

    tracing::info!(project = %project_id, user = %target.id, %role, "member added");
    Ok(member)
}

/// Remove a non-owner collaborator
pub async fn remove_member(
    pool: &SqlitePool,
    actor: Uuid,
    project_id: Uuid,
    user_id: Uuid,
) -> Result<(), BackendError> {
    let mut tx = begin_write(pool).await?;
    let (_, access) = resolve(&mut tx, actor, project_id).await?;
    access.authorize(ProjectAction::RemoveMember)?;

    membership::remove(&mut tx, project_id, user_id).await?;
    tx.commit().await?;

    tracing::info!(project = %project_id, user = %user_id, "member removed");
    Ok(())
}

/// Change a non-owner collaborator's role
pub async fn update_member_role(
    pool: &SqlitePool,
    actor: Uuid,
    project_id: Uuid,
    user_id: Uuid,
    request: UpdateRoleRequest,
) -> Result<Member, BackendError> {
    let mut tx = begin_write(pool).await?;
    let (_, access) = resolve(&mut tx, actor, project_id).await?;
    access.authorize(ProjectAction::UpdateRole)?;

    let role = request
        .role
        .as_deref()
        .ok_or_else(|| BackendError::validation("role", REQUIRED))?;
    let role = parse_role(role)?;

    membership::update_role(&mut tx, project_id, user_id, role).await?;
    let member = membership::get_member(&mut tx, project_id, user_id).await?;
    tx.commit().await?;

    tracing::info!(project = %project_id, user = %user_id, %role, "member role updated");
    Ok(member)
}

pub async fn list_comments(
    pool: &SqlitePool,
    actor: Uuid,
    project_id: Uuid,
) -> Result<Vec<CommentEntry>, BackendError> {
    let mut conn = pool.acquire().await?;
    let (_, access) = resolve(&mut conn, actor, project_id).await?;
    access.authorize(ProjectAction::ListComments)?;

    Ok(comments::list_comments(&mut conn, project_id).await?)
}

/// Post a comment authored by the actor
pub async fn add_comment(
    pool: &SqlitePool,
    actor: Uuid,
    project_id: Uuid,
    payload: CommentPayload,
) -> Result<CommentEntry, BackendError> {
    let mut tx = begin_write(pool).await?;
    let (_, access) = resolve(&mut tx, actor, project_id).await?;
    access.authorize(ProjectAction::AddComment)?;

    let text = validation::required_text("text", payload.text.as_deref(), COMMENT_MAX_CHARS)?;
    let comment = comments::insert_comment(&mut tx, project_id, actor, &text).await?;
    tx.commit().await?;

    tracing::info!(project = %project_id, author = %actor, comment = %comment.comment.id, "comment added");
    Ok(comment)
}
