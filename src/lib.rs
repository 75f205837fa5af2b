//! # Teamguard
//!
//! Authorization core for team membership changes in a multi-tenant
//! application where organizations contain teams and teams contain members.
//!
//! Two mutually exclusive modes decide whether an actor may add, update or
//! remove a team member:
//!
//! - **Legacy**: org role (Admin / Editor / Viewer), server-wide super-admin,
//!   an `editors_can_admin` toggle and per-team admin memberships.
//! - **Fine-grained**: `(action, scope)` grants matched against
//!   `teams:id:<team>`.
//!
//! ## Architecture
//!
//! ```text
//! TeamMemberService → Authorization Router → Legacy / Fine-Grained Evaluator
//!        ↓                                            ↓
//!  Membership Store                             Scope Matcher
//!        ↓
//!  Visibility Filter (member listings)
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use teamguard::auth::{Actor, OrgRole};
//! use teamguard::auth::validation::AddTeamMemberRequest;
//! use teamguard::config::{AccessControlConfig, ConfigHandle};
//! use teamguard::domain::{OrgId, UserId};
//! use teamguard::{InMemoryStore, Result, TeamMemberService};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let store = Arc::new(InMemoryStore::new());
//!     let config = Arc::new(ConfigHandle::new(AccessControlConfig::from_env()?));
//!     let service = TeamMemberService::with_memory_store(store.clone(), config);
//!
//!     let org = OrgId::from_i64_unchecked(1);
//!     let team = store.create_team(org, "platform").await?;
//!     let user = store.create_user("jdoe", "jdoe@example.com", "J Doe").await?;
//!
//!     let admin = Actor::new(UserId::from_i64_unchecked(100), org, OrgRole::Admin);
//!     service.add_member(&admin, team.id, AddTeamMemberRequest::new(user.id.as_i64())).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod config;
pub mod domain;
pub mod errors;
pub mod observability;
pub mod services;
pub mod storage;

// Re-export commonly used types and traits
pub use auth::{authorize, filter_hidden, Actor, AuthorizationDecision, TeamMemberOperation};
pub use config::{AccessControlConfig, AppConfig, ConfigHandle};
pub use errors::{Error, Result, TeamguardError};
pub use services::TeamMemberService;
pub use storage::InMemoryStore;

/// Library version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
