//! # Storage
//!
//! Repository traits for the membership and grant stores, plus an in-memory
//! implementation of all of them.

pub mod memory;
pub mod repositories;

pub use memory::InMemoryStore;
pub use repositories::{PermissionRepository, TeamMembershipRepository, TeamRepository};
