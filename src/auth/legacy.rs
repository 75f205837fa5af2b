//! Role hierarchy evaluator used when fine-grained access control is off.
//!
//! Legacy mode does not distinguish between add, update and remove: an actor
//! who may administer a team may perform all three membership mutations.

use tracing::debug;

use crate::auth::models::{Actor, AuthorizationDecision};
use crate::auth::organization::OrgRole;
use crate::auth::team::{Team, TeamMembership};
use crate::config::AccessControlConfig;

/// The rule that granted legacy access, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyRule {
    /// Server-wide super-admin
    SuperAdmin,
    /// Admin of the team's organization
    OrgAdmin,
    /// Editor who is a team admin, with `editors_can_admin` enabled
    EditorTeamAdmin,
    /// Team admin whose org role is not Editor
    TeamAdmin,
}

impl LegacyRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            LegacyRule::SuperAdmin => "super_admin",
            LegacyRule::OrgAdmin => "org_admin",
            LegacyRule::EditorTeamAdmin => "editor_team_admin",
            LegacyRule::TeamAdmin => "team_admin",
        }
    }
}

/// Decide whether `actor` may administer the members of `team`.
///
/// `membership` is the actor's own membership on the team, if any. A record
/// for another user or another team is ignored.
///
/// # Examples
///
/// ```rust
/// use teamguard::auth::legacy::can_administer;
/// use teamguard::auth::models::Actor;
/// use teamguard::auth::organization::OrgRole;
/// use teamguard::auth::team::Team;
/// use teamguard::config::AccessControlConfig;
/// use teamguard::domain::{OrgId, TeamId, UserId};
///
/// let team = Team {
///     id: TeamId::from_i64_unchecked(1),
///     org_id: OrgId::from_i64_unchecked(1),
///     name: "core".into(),
///     email: None,
///     created_at: chrono::Utc::now(),
/// };
/// let config = AccessControlConfig::default();
///
/// let admin = Actor::new(UserId::from_i64_unchecked(1), team.org_id, OrgRole::Admin);
/// assert!(can_administer(&admin, &team, None, &config).is_allowed());
///
/// let viewer = Actor::new(UserId::from_i64_unchecked(2), team.org_id, OrgRole::Viewer);
/// assert!(!can_administer(&viewer, &team, None, &config).is_allowed());
/// ```
pub fn can_administer(
    actor: &Actor,
    team: &Team,
    membership: Option<&TeamMembership>,
    config: &AccessControlConfig,
) -> AuthorizationDecision {
    let rule = matching_rule(actor, team, membership, config);

    debug!(
        user_id = %actor.user_id,
        team_id = %team.id,
        org_role = %actor.org_role,
        rule = rule.map(|r| r.as_str()).unwrap_or("none"),
        allowed = rule.is_some(),
        "legacy team admin decision"
    );

    AuthorizationDecision::from(rule.is_some())
}

/// First rule that grants access, or `None` when the actor is denied.
pub fn matching_rule(
    actor: &Actor,
    team: &Team,
    membership: Option<&TeamMembership>,
    config: &AccessControlConfig,
) -> Option<LegacyRule> {
    if actor.is_super_admin {
        return Some(LegacyRule::SuperAdmin);
    }

    // Org-scoped rules only apply inside the team's organization.
    if !team.belongs_to(actor.org_id) {
        return None;
    }

    if actor.org_role.is_admin() {
        return Some(LegacyRule::OrgAdmin);
    }

    if !holds_team_admin(actor, team, membership) {
        return None;
    }

    // Editors only gain delegated team trust when the deployment opts in.
    match actor.org_role {
        OrgRole::Editor if config.editors_can_admin => Some(LegacyRule::EditorTeamAdmin),
        OrgRole::Editor => None,
        _ => Some(LegacyRule::TeamAdmin),
    }
}

fn holds_team_admin(actor: &Actor, team: &Team, membership: Option<&TeamMembership>) -> bool {
    membership.is_some_and(|m| m.is_for(actor.user_id, team.id) && m.is_admin())
}
