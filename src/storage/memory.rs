//! In-memory implementation of the team, membership and grant stores.
//!
//! All state lives behind one `tokio::sync::RwLock`, so the uniqueness check
//! and insert of `create_membership` happen under a single write lock.
//! Memberships are kept in a `Vec` in insertion order, which is the order
//! listings return.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, Instrument};

use crate::auth::models::Grant;
use crate::auth::team::{NewTeamMembership, Team, TeamMemberDto, TeamMembership, TeamPermission};
use crate::auth::user::UserProfile;
use crate::domain::{OrgId, TeamId, UserId};
use crate::errors::{Result, TeamguardError};
use crate::storage::repositories::{PermissionRepository, TeamMembershipRepository, TeamRepository};

#[derive(Debug, Default)]
struct StoreState {
    teams: HashMap<TeamId, Team>,
    users: HashMap<UserId, UserProfile>,
    memberships: Vec<TeamMembership>,
    grants: HashMap<(OrgId, UserId), Vec<Grant>>,
}

impl StoreState {
    fn membership_index(&self, team_id: TeamId, user_id: UserId) -> Option<usize> {
        self.memberships.iter().position(|m| m.is_for(user_id, team_id))
    }
}

#[derive(Debug)]
pub struct InMemoryStore {
    state: RwLock<StoreState>,
    next_team_id: AtomicI64,
    next_user_id: AtomicI64,
    unavailable: AtomicBool,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            next_team_id: AtomicI64::new(1),
            next_user_id: AtomicI64::new(1),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Make every subsequent call fail with a `Store` error until reset.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self, operation: &str) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            let cause = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "store marked unavailable");
            return Err(TeamguardError::store_with_source(
                format!("store unavailable during {}", operation),
                Box::new(cause),
            ));
        }
        Ok(())
    }

    /// Create a team in `org_id` with the next free id.
    pub async fn create_team<S: Into<String>>(&self, org_id: OrgId, name: S) -> Result<Team> {
        self.check_available("create_team")?;
        let id = TeamId::from_i64_unchecked(self.next_team_id.fetch_add(1, Ordering::SeqCst));
        let team = Team { id, org_id, name: name.into(), email: None, created_at: Utc::now() };

        self.state.write().await.teams.insert(id, team.clone());
        debug!(team_id = %id, org_id = %org_id, "created team");
        Ok(team)
    }

    /// Create a user with the next free id. Logins are unique.
    pub async fn create_user<L, E, N>(&self, login: L, email: E, name: N) -> Result<UserProfile>
    where
        L: Into<String>,
        E: Into<String>,
        N: Into<String>,
    {
        self.check_available("create_user")?;
        let login = login.into();

        let mut state = self.state.write().await;
        if state.users.values().any(|u| u.login == login) {
            return Err(TeamguardError::conflict(
                format!("User with login '{}' already exists", login),
                "user",
            ));
        }

        let id = UserId::from_i64_unchecked(self.next_user_id.fetch_add(1, Ordering::SeqCst));
        let user = UserProfile::new(id, login, email, name);
        state.users.insert(id, user.clone());
        Ok(user)
    }

    /// Insert or replace a user profile under its own id.
    pub async fn put_user(&self, user: UserProfile) -> Result<()> {
        self.check_available("put_user")?;
        self.state.write().await.users.insert(user.id, user);
        Ok(())
    }

    /// Seed a membership, bypassing authorization.
    pub async fn add_member(
        &self,
        team: &Team,
        user_id: UserId,
        permission: TeamPermission,
        external: bool,
    ) -> Result<TeamMembership> {
        self.create_membership(NewTeamMembership {
            user_id,
            team_id: team.id,
            org_id: team.org_id,
            permission,
            external,
        })
        .await
    }

    /// Replace the grants `user_id` holds in `org_id`.
    pub async fn set_permissions<I>(&self, org_id: OrgId, user_id: UserId, grants: I) -> Result<()>
    where
        I: IntoIterator<Item = Grant>,
    {
        self.check_available("set_permissions")?;
        self.state.write().await.grants.insert((org_id, user_id), grants.into_iter().collect());
        Ok(())
    }

    /// Number of memberships across all teams.
    pub async fn membership_count(&self) -> usize {
        self.state.read().await.memberships.len()
    }
}

#[async_trait]
impl TeamRepository for InMemoryStore {
    async fn get_team(&self, org_id: OrgId, team_id: TeamId) -> Result<Option<Team>> {
        let span = crate::store_span!("get_team", team_id = team_id);
        async move {
            self.check_available("get_team")?;
            let state = self.state.read().await;
            Ok::<_, TeamguardError>(state.teams.get(&team_id).filter(|t| t.belongs_to(org_id)).cloned())
        }
        .instrument(span)
        .await
    }
}

#[async_trait]
impl TeamMembershipRepository for InMemoryStore {
    async fn get_membership(
        &self,
        team_id: TeamId,
        user_id: UserId,
    ) -> Result<Option<TeamMembership>> {
        let span = crate::store_span!("get_membership", team_id = team_id);
        async move {
            self.check_available("get_membership")?;
            let state = self.state.read().await;
            let membership = state.membership_index(team_id, user_id).map(|i| state.memberships[i].clone());
            debug!(user_id = %user_id, found = membership.is_some(), "loaded membership");
            Ok::<_, TeamguardError>(membership)
        }
        .instrument(span)
        .await
    }

    async fn list_team_members(&self, org_id: OrgId, team_id: TeamId) -> Result<Vec<TeamMemberDto>> {
        let span = crate::store_span!("list_team_members", team_id = team_id);
        async move {
            self.check_available("list_team_members")?;
            let state = self.state.read().await;

            let mut members = Vec::new();
            for membership in state
                .memberships
                .iter()
                .filter(|m| m.team_id == team_id && m.org_id == org_id)
            {
                let user = state.users.get(&membership.user_id).ok_or_else(|| {
                    TeamguardError::store(format!(
                        "membership references unknown user {}",
                        membership.user_id
                    ))
                })?;

                members.push(TeamMemberDto {
                    org_id: membership.org_id,
                    team_id: membership.team_id,
                    user_id: membership.user_id,
                    email: user.email.clone(),
                    name: user.name.clone(),
                    login: user.login.clone(),
                    avatar_url: user.avatar_url.clone(),
                    labels: user.labels.clone(),
                    auth_module: user.auth_module.clone(),
                    permission: membership.permission,
                    external: membership.external,
                });
            }
            Ok::<_, TeamguardError>(members)
        }
        .instrument(span)
        .await
    }

    async fn create_membership(&self, membership: NewTeamMembership) -> Result<TeamMembership> {
        let span = crate::store_span!("create_membership", team_id = membership.team_id);
        async move {
            self.check_available("create_membership")?;
            let mut state = self.state.write().await;

            if !state.teams.get(&membership.team_id).is_some_and(|t| t.belongs_to(membership.org_id)) {
                return Err(TeamguardError::not_found("team", membership.team_id.to_string()));
            }
            if !state.users.contains_key(&membership.user_id) {
                return Err(TeamguardError::not_found("user", membership.user_id.to_string()));
            }
            if state.membership_index(membership.team_id, membership.user_id).is_some() {
                return Err(TeamguardError::conflict(
                    format!(
                        "User {} is already a member of team {}",
                        membership.user_id, membership.team_id
                    ),
                    "team_membership",
                ));
            }

            let created = TeamMembership {
                user_id: membership.user_id,
                team_id: membership.team_id,
                org_id: membership.org_id,
                permission: membership.permission,
                external: membership.external,
                created_at: Utc::now(),
            };
            state.memberships.push(created.clone());
            debug!(user_id = %created.user_id, permission = %created.permission, "created membership");
            Ok::<_, TeamguardError>(created)
        }
        .instrument(span)
        .await
    }

    async fn update_membership_permission(
        &self,
        team_id: TeamId,
        user_id: UserId,
        permission: TeamPermission,
    ) -> Result<TeamMembership> {
        let span = crate::store_span!("update_membership_permission", team_id = team_id);
        async move {
            self.check_available("update_membership_permission")?;
            let mut state = self.state.write().await;
            let index = state
                .membership_index(team_id, user_id)
                .ok_or_else(|| TeamguardError::not_found("team_membership", user_id.to_string()))?;

            let membership = &mut state.memberships[index];
            membership.permission = permission;
            debug!(user_id = %user_id, permission = %permission, "updated membership");
            Ok::<_, TeamguardError>(membership.clone())
        }
        .instrument(span)
        .await
    }

    async fn delete_membership(&self, team_id: TeamId, user_id: UserId) -> Result<()> {
        let span = crate::store_span!("delete_membership", team_id = team_id);
        async move {
            self.check_available("delete_membership")?;
            let mut state = self.state.write().await;
            let index = state
                .membership_index(team_id, user_id)
                .ok_or_else(|| TeamguardError::not_found("team_membership", user_id.to_string()))?;

            // `remove` keeps the remaining members in creation order
            state.memberships.remove(index);
            debug!(user_id = %user_id, "deleted membership");
            Ok::<_, TeamguardError>(())
        }
        .instrument(span)
        .await
    }
}

#[async_trait]
impl PermissionRepository for InMemoryStore {
    async fn get_user_permissions(&self, org_id: OrgId, user_id: UserId) -> Result<Vec<Grant>> {
        let span = crate::store_span!("get_user_permissions", org_id = %org_id, user_id = %user_id);
        async move {
            self.check_available("get_user_permissions")?;
            let state = self.state.read().await;
            let grants = state.grants.get(&(org_id, user_id)).cloned().unwrap_or_default();
            debug!(grant_count = grants.len(), "loaded grants");
            Ok::<_, TeamguardError>(grants)
        }
        .instrument(span)
        .await
    }
}
