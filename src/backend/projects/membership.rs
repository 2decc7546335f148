//! Membership model
//!
//! The `project_members` table is the single source of truth for who may do
//! what on a project. Every function takes a connection so callers can run
//! several of them inside one transaction.
//!
//! Invariants kept here:
//! - a (project, user) pair has at most one membership
//! - a project has at most one owner, and the owner membership is never
//!   changed or removed through this module

use chrono::Utc;
use sqlx::SqliteConnection;
use thiserror::Error;
use uuid::Uuid;

use crate::backend::auth::users::UserProfile;
use crate::backend::projects::models::{Member, MemberRow, Membership, MembershipRow};
use crate::backend::projects::role::{InvalidRole, Role};

/// Membership model errors
#[derive(Debug, Error)]
pub enum MembershipError {
    #[error("membership not found")]
    NotFound,

    #[error("user is already a member of this project")]
    AlreadyMember,

    #[error("the owner's membership cannot be changed or removed")]
    OwnerRoleImmutable,

    #[error("the owner role cannot be assigned")]
    OwnerRoleNotAssignable,

    #[error(transparent)]
    InvalidRole(#[from] InvalidRole),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Look up the membership of `user_id` in `project_id`
pub async fn find_membership(
    conn: &mut SqliteConnection,
    project_id: Uuid,
    user_id: Uuid,
) -> Result<Option<Membership>, MembershipError> {
    let row = sqlx::query_as::<_, MembershipRow>(
        r#"
        SELECT id, project_id, user_id, role, created_at
        FROM project_members
        WHERE project_id = ? AND user_id = ?
        "#,
    )
    .bind(project_id)
    .bind(user_id)
    .fetch_optional(conn)
    .await?;

    row.map(Membership::try_from).transpose()
}

/// Role of `user_id` in `project_id`, `None` for non-members
pub async fn find_role(
    conn: &mut SqliteConnection,
    project_id: Uuid,
    user_id: Uuid,
) -> Result<Option<Role>, MembershipError> {
    Ok(find_membership(conn, project_id, user_id)
        .await?
        .map(|membership| membership.role))
}

/// Role of `user_id` in `project_id`
pub async fn get_role(conn: &mut SqliteConnection, project_id: Uuid, user_id: Uuid) -> Result<Role, MembershipError> {
    find_role(conn, project_id, user_id)
        .await?
        .ok_or(MembershipError::NotFound)
}

/// One member with profile
pub async fn get_member(conn: &mut SqliteConnection, project_id: Uuid, user_id: Uuid) -> Result<Member, MembershipError> {
    let row = sqlx::query_as::<_, MemberRow>(
        r#"
        SELECT m.id, m.project_id, m.user_id, m.role, m.created_at,
               u.username, u.email, u.first_name, u.last_name
        FROM project_members m
        JOIN users u ON u.id = m.user_id
        WHERE m.project_id = ? AND m.user_id = ?
        "#,
    )
    .bind(project_id)
    .bind(user_id)
    .fetch_optional(conn)
    .await?
    .ok_or(MembershipError::NotFound)?;

    Member::try_from(row)
}

/// The owner of a project, derived from its owner membership
pub async fn owner(conn: &mut SqliteConnection, project_id: Uuid) -> Result<Option<UserProfile>, MembershipError> {
    let owner = sqlx::query_as::<_, UserProfile>(
        r#"
        SELECT u.id, u.username, u.email, u.first_name, u.last_name
        FROM project_members m
        JOIN users u ON u.id = m.user_id
        WHERE m.project_id = ? AND m.role = 'owner'
        "#,
    )
    .bind(project_id)
    .fetch_optional(conn)
    .await?;

    Ok(owner)
}

/// All members of a project, oldest membership first
pub async fn list_members(conn: &mut SqliteConnection, project_id: Uuid) -> Result<Vec<Member>, MembershipError> {
    let rows = sqlx::query_as::<_, MemberRow>(
        r#"
        SELECT m.id, m.project_id, m.user_id, m.role, m.created_at,
               u.username, u.email, u.first_name, u.last_name
        FROM project_members m
        JOIN users u ON u.id = m.user_id
        WHERE m.project_id = ?
        ORDER BY m.created_at, m.rowid
        "#,
    )
    .bind(project_id)
    .fetch_all(conn)
    .await?;

    rows.into_iter().map(Member::try_from).collect()
}

/// Add `user_id` to `project_id` with `role`
///
/// The owner role is only accepted for a project that has no owner yet,
/// which in practice means while the project is being created.
pub async fn create(
    conn: &mut SqliteConnection,
    project_id: Uuid,
    user_id: Uuid,
    role: Role,
) -> Result<Membership, MembershipError> {
    if find_membership(&mut *conn, project_id, user_id).await?.is_some() {
        return Err(MembershipError::AlreadyMember);
    }
    if role == Role::Owner && owner(&mut *conn, project_id).await?.is_some() {
        return Err(MembershipError::OwnerRoleNotAssignable);
    }

    let membership = Membership {
        id: Uuid::new_v4(),
        project_id,
        user_id,
        role,
        created_at: Utc::now(),
    };

    sqlx::query(
        r#"
        INSERT INTO project_members (id, project_id, user_id, role, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(membership.id)
    .bind(membership.project_id)
    .bind(membership.user_id)
    .bind(membership.role.as_str())
    .bind(membership.created_at)
    .execute(conn)
    .await
    .map_err(|err| match err.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => MembershipError::AlreadyMember,
        _ => MembershipError::Database(err),
    })?;

    Ok(membership)
}

/// Change a non-owner member's role
pub async fn update_role(
    conn: &mut SqliteConnection,
    project_id: Uuid,
    user_id: Uuid,
    role: Role,
) -> Result<Membership, MembershipError> {
    let mut membership = find_membership(&mut *conn, project_id, user_id)
        .await?
        .ok_or(MembershipError::NotFound)?;

    if membership.role == Role::Owner {
        return Err(MembershipError::OwnerRoleImmutable);
    }
    if role == Role::Owner {
        return Err(MembershipError::OwnerRoleNotAssignable);
    }

    sqlx::query("UPDATE project_members SET role = ? WHERE id = ?")
        .bind(role.as_str())
        .bind(membership.id)
        .execute(conn)
        .await?;

    membership.role = role;
    Ok(membership)
}

/// Remove a non-owner member
pub async fn remove(conn: &mut SqliteConnection, project_id: Uuid, user_id: Uuid) -> Result<(), MembershipError> {
    let membership = find_membership(&mut *conn, project_id, user_id)
        .await?
        .ok_or(MembershipError::NotFound)?;

    if membership.role == Role::Owner {
        return Err(MembershipError::OwnerRoleImmutable);
    }

    sqlx::query("DELETE FROM project_members WHERE id = ?")
        .bind(membership.id)
        .execute(conn)
        .await?;

    Ok(())
}
