//! Project roles
//!
//! A membership carries exactly one role. Roles form a total order by rank:
//! every permission an editor has, the owner has too, and every permission a
//! reader has, an editor has too.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role of a user within one project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Editor,
    Reader,
}

/// A role string outside the fixed set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("\"{0}\" is not a valid role. Choose one of: owner, editor, reader.")]
pub struct InvalidRole(pub String);

impl Role {
    pub const ALL: [Role; 3] = [Role::Owner, Role::Editor, Role::Reader];

    /// Role given to added members when none is requested.
    pub const DEFAULT_MEMBER: Role = Role::Reader;

    /// Rank used for threshold checks; higher ranks include lower ones.
    pub const fn rank(self) -> u8 {
        match self {
            Role::Owner => 3,
            Role::Editor => 2,
            Role::Reader => 1,
        }
    }

    /// True if this role grants at least what `minimum` grants.
    pub const fn includes(self, minimum: Role) -> bool {
        self.rank() >= minimum.rank()
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Editor => "editor",
            Role::Reader => "reader",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = InvalidRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(Role::Owner),
            "editor" => Ok(Role::Editor),
            "reader" => Ok(Role::Reader),
            other => Err(InvalidRole(other.to_string())),
        }
    }
}
