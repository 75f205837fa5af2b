//! Team and membership store seams
//!
//! The authorization core reads teams and memberships through these traits
//! and never caches what they return. Implementations own uniqueness of
//! `(user_id, team_id)` and the ordering of member listings.

use async_trait::async_trait;

use crate::auth::team::{NewTeamMembership, Team, TeamMemberDto, TeamMembership, TeamPermission};
use crate::domain::{OrgId, TeamId, UserId};
use crate::errors::Result;

#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Get a team by ID, scoped to an organization.
    ///
    /// A team that exists in another organization is reported as `None`.
    async fn get_team(&self, org_id: OrgId, team_id: TeamId) -> Result<Option<Team>>;
}

#[async_trait]
pub trait TeamMembershipRepository: Send + Sync {
    /// Get a user's membership on a team
    async fn get_membership(
        &self,
        team_id: TeamId,
        user_id: UserId,
    ) -> Result<Option<TeamMembership>>;

    /// List the members of a team in creation order
    async fn list_team_members(&self, org_id: OrgId, team_id: TeamId) -> Result<Vec<TeamMemberDto>>;

    /// Create a membership.
    ///
    /// Fails with `Conflict` if the user already belongs to the team.
    async fn create_membership(&self, membership: NewTeamMembership) -> Result<TeamMembership>;

    /// Change the permission level of an existing membership
    async fn update_membership_permission(
        &self,
        team_id: TeamId,
        user_id: UserId,
        permission: TeamPermission,
    ) -> Result<TeamMembership>;

    /// Delete a membership. Fails with `NotFound` if there is none.
    async fn delete_membership(&self, team_id: TeamId, user_id: UserId) -> Result<()>;
}
