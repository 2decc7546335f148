/**
 * Project Request Types
 *
 * Request bodies for the project endpoints. Every field is optional at the
 * serde level so that missing fields are reported as field errors by the
 * service instead of as a JSON rejection.
 */

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of create, full update and partial update
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProjectPayload {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Body of add-member
///
/// The target is named either by `username` or by `user` (an id). `role`
/// defaults to reader.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AddMemberRequest {
    pub username: Option<String>,
    pub user: Option<Uuid>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateRoleRequest {
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CommentPayload {
    pub text: Option<String>,
}

/// How an update treats absent fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// PUT: every field must be present
    Replace,
    /// PATCH: absent fields keep their value
    Partial,
}
