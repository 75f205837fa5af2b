//! Authorization router for team membership mutations.
//!
//! Selects the legacy role evaluator or the fine-grained evaluator from the
//! deployment config and returns a single allow/deny decision:
//!
//! - Legacy mode: super-admin, org admin, or team admin (see [`crate::auth::legacy`])
//! - Fine-grained mode: `teams.permissions:write` on `teams:id:<team>`
//!
//! Request handlers must call [`authorize`] (or [`require_authorized`]) on
//! every request before touching the membership store.

use std::fmt::{Display, Formatter};

use tracing::{debug, info};

use crate::auth::fine_grained::{self, ACTION_TEAMS_PERMISSIONS_WRITE};
use crate::auth::legacy;
use crate::auth::models::{Actor, AuthError, AuthorizationDecision};
use crate::auth::scope::team_id_scope;
use crate::auth::team::{Team, TeamMembership};
use crate::config::AccessControlConfig;

/// A membership mutation that needs authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TeamMemberOperation {
    Add,
    Update,
    Remove,
}

impl TeamMemberOperation {
    pub const ALL: [TeamMemberOperation; 3] =
        [TeamMemberOperation::Add, TeamMemberOperation::Update, TeamMemberOperation::Remove];

    pub fn as_str(&self) -> &'static str {
        match self {
            TeamMemberOperation::Add => "add",
            TeamMemberOperation::Update => "update",
            TeamMemberOperation::Remove => "remove",
        }
    }

    /// Action a fine-grained grant must carry for this operation.
    ///
    /// All three mutations are write-class and share the same action.
    pub fn required_action(&self) -> &'static str {
        match self {
            TeamMemberOperation::Add
            | TeamMemberOperation::Update
            | TeamMemberOperation::Remove => ACTION_TEAMS_PERMISSIONS_WRITE,
        }
    }
}

impl Display for TeamMemberOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which evaluator a deployment uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationMode {
    Legacy,
    FineGrained,
}

impl AuthorizationMode {
    pub fn from_config(config: &AccessControlConfig) -> Self {
        if config.fine_grained_enabled {
            AuthorizationMode::FineGrained
        } else {
            AuthorizationMode::Legacy
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthorizationMode::Legacy => "legacy",
            AuthorizationMode::FineGrained => "fine_grained",
        }
    }
}

/// Decide whether `actor` may perform `operation` on the members of `team`.
///
/// `membership` is the actor's own membership on `team`; it is only
/// consulted in legacy mode. Teams of another organization are denied in
/// both modes, except for a legacy super-admin.
pub fn authorize(
    operation: TeamMemberOperation,
    actor: &Actor,
    team: &Team,
    membership: Option<&TeamMembership>,
    config: &AccessControlConfig,
) -> AuthorizationDecision {
    let mode = AuthorizationMode::from_config(config);
    let same_org = team.belongs_to(actor.org_id);

    let decision = match mode {
        AuthorizationMode::Legacy => {
            if !same_org && !actor.is_super_admin {
                AuthorizationDecision::deny()
            } else {
                legacy::can_administer(actor, team, membership, config)
            }
        }
        AuthorizationMode::FineGrained => {
            if !same_org {
                AuthorizationDecision::deny()
            } else {
                fine_grained::can_perform(
                    actor,
                    operation.required_action(),
                    &team_id_scope(team.id),
                    config,
                )
            }
        }
    };

    debug!(
        operation = operation.as_str(),
        mode = mode.as_str(),
        user_id = %actor.user_id,
        actor_org_id = %actor.org_id,
        team_id = %team.id,
        team_org_id = %team.org_id,
        allowed = decision.is_allowed(),
        "team member authorization"
    );

    decision
}

/// [`authorize`], with a denial returned as `AuthError::Forbidden`.
///
/// # Errors
///
/// Returns `AuthError::Forbidden` if the evaluator denies the operation.
pub fn require_authorized(
    operation: TeamMemberOperation,
    actor: &Actor,
    team: &Team,
    membership: Option<&TeamMembership>,
    config: &AccessControlConfig,
) -> Result<(), AuthError> {
    if authorize(operation, actor, team, membership, config).is_allowed() {
        Ok(())
    } else {
        info!(
            operation = operation.as_str(),
            user_id = %actor.user_id,
            team_id = %team.id,
            "team member operation forbidden"
        );
        Err(AuthError::Forbidden { operation: operation.as_str() })
    }
}
