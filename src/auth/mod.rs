//! Authorization for team membership changes.
//!
//! Value types for actors, teams and memberships, the two evaluators (legacy
//! role hierarchy and fine-grained grants), the router that picks between
//! them, and the hidden-user filter applied to member listings.

pub mod authorization;
pub mod fine_grained;
pub mod legacy;
pub mod models;
pub mod organization;
pub mod scope;
pub mod team;
pub mod user;
pub mod validation;
pub mod visibility;

pub use authorization::{authorize, require_authorized, AuthorizationMode, TeamMemberOperation};
pub use models::{Actor, AuthError, AuthorizationDecision, Grant};
pub use organization::OrgRole;
pub use team::{NewTeamMembership, Team, TeamMemberDto, TeamMembership, TeamPermission};
pub use user::UserProfile;
pub use visibility::filter_hidden;
