//! Projects Module
//!
//! Projects, their memberships and their comments, and the role-based
//! authorization that gates every action on them.
//!
//! # Module Structure
//!
//! ```text
//! projects/
//! ├── mod.rs          - Module exports and documentation
//! ├── role.rs         - Role enum and rank order
//! ├── models.rs       - Project, Membership and Comment records
//! ├── store.rs        - Project persistence
//! ├── membership.rs   - Membership model (who holds which role)
//! ├── comments.rs     - Comment persistence
//! ├── policy.rs       - Authorization decisions
//! ├── service.rs      - Checked operations, one per action
//! ├── types.rs        - Request bodies
//! └── handlers.rs     - HTTP handlers
//! ```
//!
//! # Permissions
//!
//! | Action                                  | Minimum role |
//! |-----------------------------------------|--------------|
//! | retrieve, list members, list comments   | reader       |
//! | update, add comment                     | editor       |
//! | delete, add/remove member, update role  | owner        |
//!
//! The owner is whoever holds the single `owner` membership; it is created
//! with the project and can be neither changed nor removed.

pub mod comments;
pub mod handlers;
pub mod membership;
pub mod models;
pub mod policy;
pub mod role;
pub mod service;
pub mod store;
pub mod types;

pub use membership::MembershipError;
pub use models::{Comment, CommentEntry, Member, Membership, Project, ProjectDetails};
pub use policy::{Permission, ProjectAccess, ProjectAction};
pub use role::{InvalidRole, Role};
