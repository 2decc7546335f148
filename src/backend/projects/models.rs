//! Project, membership and comment records
//!
//! Rows are read through small `*Row` structs and converted, so that the
//! role column is parsed into [`Role`] in one place.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::backend::auth::users::UserProfile;
use crate::backend::projects::membership::MembershipError;
use crate::backend::projects::role::Role;

/// Maximum project title length, in characters
pub const TITLE_MAX_CHARS: usize = 255;
/// Maximum project description length, in characters
pub const DESCRIPTION_MAX_CHARS: usize = 500;
/// Maximum comment length, in characters
pub const COMMENT_MAX_CHARS: usize = 300;

/// A shared workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A project together with its derived owner
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetails {
    #[serde(flatten)]
    pub project: Project,
    /// `None` only if the owner membership is missing
    pub owner: Option<UserProfile>,
}

/// The role-bearing link between a user and a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Membership {
    pub id: Uuid,
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// A membership with the member's profile
#[derive(Debug, Clone, Serialize)]
pub struct Member {
    #[serde(flatten)]
    pub membership: Membership,
    pub user_details: UserProfile,
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct MembershipRow {
    pub id: Uuid,
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<MembershipRow> for Membership {
    type Error = MembershipError;

    fn try_from(row: MembershipRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            project_id: row.project_id,
            user_id: row.user_id,
            role: row.role.parse()?,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct MemberRow {
    #[sqlx(flatten)]
    pub membership: MembershipRow,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl TryFrom<MemberRow> for Member {
    type Error = MembershipError;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        let membership = Membership::try_from(row.membership)?;
        let user_details = UserProfile {
            id: membership.user_id,
            username: row.username,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
        };
        Ok(Self {
            membership,
            user_details,
        })
    }
}

/// A comment on a project; immutable once written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub project_id: Uuid,
    #[serde(skip)]
    pub user_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A comment with its author's profile
#[derive(Debug, Clone, Serialize)]
pub struct CommentEntry {
    #[serde(flatten)]
    pub comment: Comment,
    pub user: UserProfile,
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct CommentRow {
    #[sqlx(flatten)]
    pub comment: Comment,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<CommentRow> for CommentEntry {
    fn from(row: CommentRow) -> Self {
        let user = UserProfile {
            id: row.comment.user_id,
            username: row.username,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
        };
        Self {
            comment: row.comment,
            user,
        }
    }
}
