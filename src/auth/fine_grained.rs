//! Capability evaluator used when fine-grained access control is on.
//!
//! Org role plays no part here: an Admin without a matching grant is denied,
//! and a Viewer with one is allowed.

use tracing::debug;

use crate::auth::models::{Actor, AuthorizationDecision};
use crate::auth::scope;
use crate::config::AccessControlConfig;

/// Read the members of a team.
pub const ACTION_TEAMS_PERMISSIONS_READ: &str = "teams.permissions:read";

/// Add, update or remove members of a team.
pub const ACTION_TEAMS_PERMISSIONS_WRITE: &str = "teams.permissions:write";

/// Decide whether `actor` holds `required_action` on `target_scope`.
///
/// Super-admin status only short-circuits when the deployment enables
/// `super_admin_bypasses_fine_grained`.
///
/// # Examples
///
/// ```rust
/// use teamguard::auth::fine_grained::{can_perform, ACTION_TEAMS_PERMISSIONS_WRITE};
/// use teamguard::auth::models::{Actor, Grant};
/// use teamguard::auth::organization::OrgRole;
/// use teamguard::config::AccessControlConfig;
/// use teamguard::domain::{OrgId, UserId};
///
/// let actor = Actor::new(UserId::from_i64_unchecked(3), OrgId::from_i64_unchecked(1), OrgRole::Viewer)
///     .with_grants(vec![Grant::new(ACTION_TEAMS_PERMISSIONS_WRITE, "teams:id:1")]);
/// let config = AccessControlConfig { fine_grained_enabled: true, ..Default::default() };
///
/// assert!(can_perform(&actor, ACTION_TEAMS_PERMISSIONS_WRITE, "teams:id:1", &config).is_allowed());
/// assert!(!can_perform(&actor, ACTION_TEAMS_PERMISSIONS_WRITE, "teams:id:2", &config).is_allowed());
/// ```
pub fn can_perform(
    actor: &Actor,
    required_action: &str,
    target_scope: &str,
    config: &AccessControlConfig,
) -> AuthorizationDecision {
    if actor.is_super_admin && config.super_admin_bypasses_fine_grained {
        debug!(
            user_id = %actor.user_id,
            action = required_action,
            scope = target_scope,
            "super-admin bypass of fine-grained check"
        );
        return AuthorizationDecision::allow();
    }

    let allowed = actor
        .grants()
        .any(|grant| grant.action == required_action && scope::matches(&grant.scope, target_scope));

    debug!(
        user_id = %actor.user_id,
        action = required_action,
        scope = target_scope,
        grants = actor.grants().count(),
        allowed,
        "fine-grained decision"
    );

    AuthorizationDecision::from(allowed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::Grant;
    use crate::auth::organization::OrgRole;
    use crate::domain::{OrgId, UserId};

    fn actor(role: OrgRole, grants: Vec<Grant>) -> Actor {
        Actor::new(UserId::from_i64_unchecked(5), OrgId::from_i64_unchecked(1), role).with_grants(grants)
    }

    fn fgac() -> AccessControlConfig {
        AccessControlConfig { fine_grained_enabled: true, ..Default::default() }
    }

    #[test]
    fn matching_action_and_scope_allows() {
        let actor = actor(OrgRole::Viewer, vec![Grant::new(ACTION_TEAMS_PERMISSIONS_WRITE, "teams:id:1")]);
        assert!(can_perform(&actor, ACTION_TEAMS_PERMISSIONS_WRITE, "teams:id:1", &fgac()).is_allowed());
    }

    #[test]
    fn wrong_scope_denies() {
        let actor = actor(OrgRole::Viewer, vec![Grant::new(ACTION_TEAMS_PERMISSIONS_WRITE, "teams:id:2")]);
        assert!(!can_perform(&actor, ACTION_TEAMS_PERMISSIONS_WRITE, "teams:id:1", &fgac()).is_allowed());
    }

    #[test]
    fn wrong_action_denies_even_for_org_admin() {
        let actor = actor(OrgRole::Admin, vec![Grant::new(ACTION_TEAMS_PERMISSIONS_READ, "teams:id:1")]);
        assert!(!can_perform(&actor, ACTION_TEAMS_PERMISSIONS_WRITE, "teams:id:1", &fgac()).is_allowed());
        assert!(can_perform(&actor, ACTION_TEAMS_PERMISSIONS_READ, "teams:id:1", &fgac()).is_allowed());
    }

    #[test]
    fn action_and_scope_must_come_from_the_same_grant() {
        let actor = actor(
            OrgRole::Viewer,
            vec![
                Grant::new(ACTION_TEAMS_PERMISSIONS_READ, "teams:id:1"),
                Grant::new(ACTION_TEAMS_PERMISSIONS_WRITE, "teams:id:2"),
            ],
        );
        assert!(!can_perform(&actor, ACTION_TEAMS_PERMISSIONS_WRITE, "teams:id:1", &fgac()).is_allowed());
    }

    #[test]
    fn wildcard_grant_covers_every_team() {
        let actor = actor(OrgRole::Viewer, vec![Grant::new(ACTION_TEAMS_PERMISSIONS_WRITE, "teams:*")]);
        assert!(can_perform(&actor, ACTION_TEAMS_PERMISSIONS_WRITE, "teams:id:1", &fgac()).is_allowed());
        assert!(can_perform(&actor, ACTION_TEAMS_PERMISSIONS_WRITE, "teams:id:99", &fgac()).is_allowed());
    }

    #[test]
    fn super_admin_needs_grant_unless_bypass_enabled() {
        let actor = actor(OrgRole::Viewer, vec![]).with_super_admin(true);
        assert!(!can_perform(&actor, ACTION_TEAMS_PERMISSIONS_WRITE, "teams:id:1", &fgac()).is_allowed());

        let bypass = AccessControlConfig { super_admin_bypasses_fine_grained: true, ..fgac() };
        assert!(can_perform(&actor, ACTION_TEAMS_PERMISSIONS_WRITE, "teams:id:1", &bypass).is_allowed());
    }

    #[test]
    fn empty_grant_set_denies() {
        let actor = actor(OrgRole::Admin, vec![]);
        assert!(!can_perform(&actor, ACTION_TEAMS_PERMISSIONS_READ, "teams:id:1", &fgac()).is_allowed());
    }
}
