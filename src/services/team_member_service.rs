//! Team member business logic service
//!
//! Fetches everything a decision needs from the stores, asks the
//! authorization router, and only then mutates. Nothing is cached between
//! calls: every request takes a fresh config snapshot and re-reads teams,
//! memberships and grants.

use std::sync::Arc;

use tracing::{info, instrument, Instrument};

use crate::auth::authorization::{require_authorized, AuthorizationMode, TeamMemberOperation};
use crate::auth::fine_grained::{
    can_perform, ACTION_TEAMS_PERMISSIONS_READ, ACTION_TEAMS_PERMISSIONS_WRITE,
};
use crate::auth::models::{Actor, AuthError};
use crate::auth::scope::team_id_scope;
use crate::auth::team::{NewTeamMembership, Team, TeamMemberDto, TeamMembership, TeamPermission};
use crate::auth::validation::{AddTeamMemberRequest, UpdateTeamMemberRequest};
use crate::auth::visibility::filter_hidden;
use crate::config::{AccessControlConfig, ConfigHandle};
use crate::domain::{TeamId, UserId};
use crate::errors::{Error, Result};
use crate::storage::{
    InMemoryStore, PermissionRepository, TeamMembershipRepository, TeamRepository,
};

/// Service for listing and changing team membership
#[derive(Clone)]
pub struct TeamMemberService {
    teams: Arc<dyn TeamRepository>,
    memberships: Arc<dyn TeamMembershipRepository>,
    permissions: Arc<dyn PermissionRepository>,
    config: Arc<ConfigHandle>,
}

/// Inputs gathered for one decision.
struct DecisionContext {
    config: Arc<AccessControlConfig>,
    team: Team,
    actor: Actor,
    actor_membership: Option<TeamMembership>,
}

impl TeamMemberService {
    pub fn new(
        teams: Arc<dyn TeamRepository>,
        memberships: Arc<dyn TeamMembershipRepository>,
        permissions: Arc<dyn PermissionRepository>,
        config: Arc<ConfigHandle>,
    ) -> Self {
        Self { teams, memberships, permissions, config }
    }

    /// Create a service backed entirely by one in-memory store
    pub fn with_memory_store(store: Arc<InMemoryStore>, config: Arc<ConfigHandle>) -> Self {
        Self::new(store.clone(), store.clone(), store, config)
    }

    /// List the members of a team, with hidden users removed.
    ///
    /// In fine-grained mode the actor needs `teams.permissions:read` (or
    /// write) on the team. In legacy mode any member of the team's
    /// organization may list.
    #[instrument(skip(self, actor), fields(actor_id = %actor.user_id, org_id = %actor.org_id))]
    pub async fn list_members(&self, actor: &Actor, team_id: TeamId) -> Result<Vec<TeamMemberDto>> {
        let ctx = self.load_context(actor, team_id).await?;

        if AuthorizationMode::from_config(&ctx.config) == AuthorizationMode::FineGrained {
            let scope = team_id_scope(ctx.team.id);
            let allowed = [ACTION_TEAMS_PERMISSIONS_READ, ACTION_TEAMS_PERMISSIONS_WRITE]
                .into_iter()
                .any(|action| can_perform(&ctx.actor, action, &scope, &ctx.config).is_allowed());
            if !allowed {
                return Err(AuthError::Forbidden { operation: "list" }.into());
            }
        }

        let members = self.memberships.list_team_members(ctx.team.org_id, ctx.team.id).await?;
        Ok(filter_hidden(members, &ctx.config.hidden_users))
    }

    /// Add a user to a team as a plain, non-external member
    #[instrument(skip(self, actor, request), fields(actor_id = %actor.user_id, org_id = %actor.org_id))]
    pub async fn add_member(
        &self,
        actor: &Actor,
        team_id: TeamId,
        request: AddTeamMemberRequest,
    ) -> Result<TeamMembership> {
        let target_user_id = request.user_id()?;
        let ctx = self.authorize(TeamMemberOperation::Add, actor, team_id).await?;

        if self.memberships.get_membership(ctx.team.id, target_user_id).await?.is_some() {
            return Err(Error::conflict(
                format!("User {} is already a member of team {}", target_user_id, ctx.team.id),
                "team_membership",
            ));
        }

        let created = self
            .memberships
            .create_membership(NewTeamMembership {
                user_id: target_user_id,
                team_id: ctx.team.id,
                org_id: ctx.team.org_id,
                permission: TeamPermission::Member,
                external: false,
            })
            .await?;

        info!(target_user_id = %created.user_id, team_id = %created.team_id, "Team member added");
        Ok(created)
    }

    /// Change the permission level of an existing member
    #[instrument(skip(self, actor, request), fields(actor_id = %actor.user_id, org_id = %actor.org_id))]
    pub async fn update_member(
        &self,
        actor: &Actor,
        team_id: TeamId,
        user_id: UserId,
        request: UpdateTeamMemberRequest,
    ) -> Result<TeamMembership> {
        let permission = request.permission()?;
        let ctx = self.authorize(TeamMemberOperation::Update, actor, team_id).await?;

        self.require_membership(ctx.team.id, user_id).await?;
        let updated =
            self.memberships.update_membership_permission(ctx.team.id, user_id, permission).await?;

        info!(
            target_user_id = %updated.user_id,
            team_id = %updated.team_id,
            permission = %updated.permission,
            "Team member permission updated"
        );
        Ok(updated)
    }

    /// Remove a member from a team
    #[instrument(skip(self, actor), fields(actor_id = %actor.user_id, org_id = %actor.org_id))]
    pub async fn remove_member(&self, actor: &Actor, team_id: TeamId, user_id: UserId) -> Result<()> {
        let ctx = self.authorize(TeamMemberOperation::Remove, actor, team_id).await?;

        self.require_membership(ctx.team.id, user_id).await?;
        self.memberships.delete_membership(ctx.team.id, user_id).await?;

        info!(target_user_id = %user_id, team_id = %ctx.team.id, "Team member removed");
        Ok(())
    }

    async fn authorize(
        &self,
        operation: TeamMemberOperation,
        actor: &Actor,
        team_id: TeamId,
    ) -> Result<DecisionContext> {
        let span = crate::authz_span!(operation, org_id = actor.org_id, team_id = team_id);
        async move {
            let ctx = self.load_context(actor, team_id).await?;
            require_authorized(
                operation,
                &ctx.actor,
                &ctx.team,
                ctx.actor_membership.as_ref(),
                &ctx.config,
            )?;
            Ok::<_, Error>(ctx)
        }
        .instrument(span)
        .await
    }

    /// Snapshot config and read the team plus whichever actor facts the
    /// active mode consults.
    async fn load_context(&self, actor: &Actor, team_id: TeamId) -> Result<DecisionContext> {
        let config = self.config.snapshot()?;

        let team = self
            .teams
            .get_team(actor.org_id, team_id)
            .await?
            .ok_or_else(|| Error::not_found("team", team_id.to_string()))?;

        let (actor, actor_membership) = match AuthorizationMode::from_config(&config) {
            AuthorizationMode::FineGrained => {
                let grants = self.permissions.get_user_permissions(actor.org_id, actor.user_id).await?;
                (actor.clone().with_grants(grants), None)
            }
            AuthorizationMode::Legacy => {
                let membership = self.memberships.get_membership(team.id, actor.user_id).await?;
                (actor.clone(), membership)
            }
        };

        Ok(DecisionContext { config, team, actor, actor_membership })
    }

    async fn require_membership(&self, team_id: TeamId, user_id: UserId) -> Result<TeamMembership> {
        self.memberships
            .get_membership(team_id, user_id)
            .await?
            .ok_or_else(|| Error::not_found("team_membership", user_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::Grant;
    use crate::auth::organization::OrgRole;
    use crate::domain::OrgId;

    const ORG: OrgId = OrgId::from_i64_unchecked(1);

    async fn setup(config: AccessControlConfig) -> (TeamMemberService, Arc<InMemoryStore>, Team) {
        let store = Arc::new(InMemoryStore::new());
        let team = store.create_team(ORG, "core").await.unwrap();
        let service = TeamMemberService::with_memory_store(store.clone(), Arc::new(ConfigHandle::new(config)));
        (service, store, team)
    }

    #[tokio::test]
    async fn validation_runs_before_authorization() {
        let (service, _store, team) = setup(AccessControlConfig::default()).await;
        let viewer = Actor::new(UserId::from_i64_unchecked(1), ORG, OrgRole::Viewer);

        let err = service.add_member(&viewer, team.id, AddTeamMemberRequest::new(0)).await.unwrap_err();
        assert_eq!(err.status_code(), 400);

        let err = service
            .update_member(&viewer, team.id, UserId::from_i64_unchecked(2), UpdateTeamMemberRequest::new(2))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn unknown_team_is_not_found() {
        let (service, _store, _team) = setup(AccessControlConfig::default()).await;
        let admin = Actor::new(UserId::from_i64_unchecked(1), ORG, OrgRole::Admin);

        let err = service
            .remove_member(&admin, TeamId::from_i64_unchecked(42), UserId::from_i64_unchecked(2))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn denial_leaves_store_untouched() {
        let (service, store, team) = setup(AccessControlConfig::default()).await;
        let user = store.create_user("loginuser0", "user0@test.com", "user0").await.unwrap();
        let viewer = Actor::new(UserId::from_i64_unchecked(99), ORG, OrgRole::Viewer);

        let err = service.add_member(&viewer, team.id, AddTeamMemberRequest::new(user.id.as_i64())).await.unwrap_err();
        assert!(err.is_forbidden());
        assert_eq!(store.membership_count().await, 0);
    }

    #[tokio::test]
    async fn fine_grained_grants_are_read_from_the_store() {
        let config = AccessControlConfig { fine_grained_enabled: true, ..Default::default() };
        let (service, store, team) = setup(config).await;
        let user = store.create_user("loginuser0", "user0@test.com", "user0").await.unwrap();
        let actor_id = UserId::from_i64_unchecked(50);

        // Grants carried on the actor itself are replaced by the store's view
        let actor = Actor::new(actor_id, ORG, OrgRole::Viewer)
            .with_grants(vec![Grant::new(ACTION_TEAMS_PERMISSIONS_WRITE, team_id_scope(team.id))]);
        let err = service.add_member(&actor, team.id, AddTeamMemberRequest::new(user.id.as_i64())).await.unwrap_err();
        assert!(err.is_forbidden());

        store
            .set_permissions(ORG, actor_id, vec![Grant::new(ACTION_TEAMS_PERMISSIONS_WRITE, team_id_scope(team.id))])
            .await
            .unwrap();
        service.add_member(&actor, team.id, AddTeamMemberRequest::new(user.id.as_i64())).await.unwrap();
    }
}
