//! Repository traits for the stores the authorization core reads from.

pub mod permission;
pub mod team;

pub use permission::PermissionRepository;
pub use team::{TeamMembershipRepository, TeamRepository};
