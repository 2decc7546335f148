//! Authorization policy
//!
//! Pure decisions over an already-resolved role. Every project action maps to
//! exactly one [`Permission`], and every permission is a rank threshold, so
//! the three checks are monotone in [`Role::rank`].

use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::projects::role::Role;

/// What a role must at least allow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    View,
    Edit,
    Own,
}

impl Permission {
    pub const fn minimum_role(self) -> Role {
        match self {
            Permission::View => Role::Reader,
            Permission::Edit => Role::Editor,
            Permission::Own => Role::Owner,
        }
    }

    /// `None` means the actor has no membership, which never passes.
    pub fn allows(self, role: Option<Role>) -> bool {
        role.is_some_and(|role| role.includes(self.minimum_role()))
    }
}

/// Any membership at all
pub fn can_view(role: Option<Role>) -> bool {
    Permission::View.allows(role)
}

/// Owner or editor
pub fn can_edit(role: Option<Role>) -> bool {
    Permission::Edit.allows(role)
}

/// Owner only
pub fn can_own(role: Option<Role>) -> bool {
    Permission::Own.allows(role)
}

/// Actions on an existing project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectAction {
    Retrieve,
    Update,
    Delete,
    ListMembers,
    AddMember,
    RemoveMember,
    UpdateRole,
    ListComments,
    AddComment,
}

impl ProjectAction {
    pub const fn permission(self) -> Permission {
        match self {
            ProjectAction::Retrieve | ProjectAction::ListMembers | ProjectAction::ListComments => {
                Permission::View
            }
            ProjectAction::Update | ProjectAction::AddComment => Permission::Edit,
            ProjectAction::Delete
            | ProjectAction::AddMember
            | ProjectAction::RemoveMember
            | ProjectAction::UpdateRole => Permission::Own,
        }
    }

    /// Phrase used in denial messages ("You do not have permission to ...")
    pub const fn describe(self) -> &'static str {
        match self {
            ProjectAction::Retrieve => "view this project",
            ProjectAction::Update => "edit this project",
            ProjectAction::Delete => "delete this project",
            ProjectAction::ListMembers => "view the members of this project",
            ProjectAction::AddMember => "add members to this project",
            ProjectAction::RemoveMember => "remove members from this project",
            ProjectAction::UpdateRole => "change member roles in this project",
            ProjectAction::ListComments => "view the comments of this project",
            ProjectAction::AddComment => "comment on this project",
        }
    }
}

/// An actor's resolved standing on one project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectAccess {
    pub actor: Uuid,
    pub project_id: Uuid,
    pub role: Option<Role>,
}

impl ProjectAccess {
    pub fn new(actor: Uuid, project_id: Uuid, role: Option<Role>) -> Self {
        Self { actor, project_id, role }
    }

    pub fn allows(&self, action: ProjectAction) -> bool {
        action.permission().allows(self.role)
    }

    /// Deny with `AuthorizationDenied` unless the role covers `action`
    pub fn authorize(&self, action: ProjectAction) -> Result<(), BackendError> {
        if self.allows(action) {
            return Ok(());
        }

        tracing::warn!(
            actor = %self.actor,
            project = %self.project_id,
            role = ?self.role,
            ?action,
            "permission denied"
        );
        Err(BackendError::denied(action.describe()))
    }
}
