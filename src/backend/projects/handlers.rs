/**
 * Project Handlers
 *
 * HTTP handlers for `/api/projects` and its sub-resources. Each handler takes
 * the actor from [`AuthUser`] and hands it to the project service, which
 * does all authorization.
 *
 * # Routes
 *
 * - `GET    /api/projects`                                - list visible projects
 * - `POST   /api/projects`                                - create (201)
 * - `GET    /api/projects/{id}`                           - retrieve
 * - `PUT    /api/projects/{id}`                           - full update
 * - `PATCH  /api/projects/{id}`                           - partial update
 * - `DELETE /api/projects/{id}`                           - delete (204)
 * - `GET    /api/projects/{id}/users`                     - list members
 * - `POST   /api/projects/{id}/add-user`                  - add member (201)
 * - `DELETE /api/projects/{id}/remove-user/{user_id}`     - remove member (204)
 * - `PATCH  /api/projects/{id}/update-role/{user_id}`     - change a member's role
 * - `GET    /api/projects/{id}/comments`                  - list comments
 * - `POST   /api/projects/{id}/add-comment`               - add comment (201)
 */

use axum::{extract::State, http::StatusCode, response::Json};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::extract::{ApiJson, ApiPath};
use crate::backend::middleware::AuthUser;
use crate::backend::projects::models::{CommentEntry, Member, ProjectDetails};
use crate::backend::projects::service;
use crate::backend::projects::types::{
    AddMemberRequest, CommentPayload, ProjectPayload, UpdateMode, UpdateRoleRequest,
};

pub async fn list_projects(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<ProjectDetails>>, BackendError> {
    let projects = service::list_projects(&pool, user.user_id).await?;
    Ok(Json(projects))
}

pub async fn create_project(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ApiJson(payload): ApiJson<ProjectPayload>,
) -> Result<(StatusCode, Json<ProjectDetails>), BackendError> {
    let project = service::create_project(&pool, user.user_id, payload).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn get_project(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ApiPath(project_id): ApiPath<Uuid>,
) -> Result<Json<ProjectDetails>, BackendError> {
    let project = service::get_project(&pool, user.user_id, project_id).await?;
    Ok(Json(project))
}

/// PUT: title and description are both required
pub async fn replace_project(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ApiPath(project_id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<ProjectPayload>,
) -> Result<Json<ProjectDetails>, BackendError> {
    let project = service::update_project(&pool, user.user_id, project_id, payload, UpdateMode::Replace).await?;
    Ok(Json(project))
}

/// PATCH: only the fields present are changed
pub async fn patch_project(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ApiPath(project_id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<ProjectPayload>,
) -> Result<Json<ProjectDetails>, BackendError> {
    let project = service::update_project(&pool, user.user_id, project_id, payload, UpdateMode::Partial).await?;
    Ok(Json(project))
}

pub async fn delete_project(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ApiPath(project_id): ApiPath<Uuid>,
) -> Result<StatusCode, BackendError> {
    service::delete_project(&pool, user.user_id, project_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_members(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ApiPath(project_id): ApiPath<Uuid>,
) -> Result<Json<Vec<Member>>, BackendError> {
    let members = service::list_members(&pool, user.user_id, project_id).await?;
    Ok(Json(members))
}

pub async fn add_member(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ApiPath(project_id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<AddMemberRequest>,
) -> Result<(StatusCode, Json<Member>), BackendError> {
    let member = service::add_member(&pool, user.user_id, project_id, request).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

pub async fn remove_member(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ApiPath((project_id, member_id)): ApiPath<(Uuid, Uuid)>,
) -> Result<StatusCode, BackendError> {
    service::remove_member(&pool, user.user_id, project_id, member_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn update_member_role(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ApiPath((project_id, member_id)): ApiPath<(Uuid, Uuid)>,
    ApiJson(request): ApiJson<UpdateRoleRequest>,
) -> Result<Json<Member>, BackendError> {
    let member = service::update_member_role(&pool, user.user_id, project_id, member_id, request).await?;
    Ok(Json(member))
}

pub async fn list_comments(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ApiPath(project_id): ApiPath<Uuid>,
) -> Result<Json<Vec<CommentEntry>>, BackendError> {
    let comments = service::list_comments(&pool, user.user_id, project_id).await?;
    Ok(Json(comments))
}

pub async fn add_comment(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
    ApiPath(project_id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<CommentPayload>,
) -> Result<(StatusCode, Json<CommentEntry>), BackendError> {
    let comment = service::add_comment(&pool, user.user_id, project_id, payload).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}
