//! Domain layer
//!
//! Pure identifier types with zero infrastructure dependencies.
//!
//! ## Module Organization
//!
//! - `id`: Type-safe organization, team and user identifiers

pub mod id;

pub use id::{IdParseError, OrgId, TeamId, UserId};
