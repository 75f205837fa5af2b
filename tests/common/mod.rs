//! Shared fixtures for team member integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use teamguard::auth::models::Grant;
use teamguard::auth::team::{Team, TeamPermission};
use teamguard::auth::{Actor, OrgRole, UserProfile};
use teamguard::config::{AccessControlConfig, ConfigHandle};
use teamguard::domain::OrgId;
use teamguard::storage::TeamMembershipRepository;
use teamguard::{InMemoryStore, TeamMemberService};

pub const TEST_ORG: OrgId = OrgId::from_i64_unchecked(1);
pub const OTHER_ORG: OrgId = OrgId::from_i64_unchecked(2);

/// Login of the signed-in user every scenario acts as.
pub const TEST_USER_LOGIN: &str = "testUserLogin";

pub struct TestContext {
    pub store: Arc<InMemoryStore>,
    pub config: Arc<ConfigHandle>,
    pub service: TeamMemberService,
    /// Team 1, seeded with `members`
    pub team: Team,
    /// Team 2, empty
    pub other_team: Team,
    pub members: Vec<UserProfile>,
    pub signed_in: UserProfile,
}

/// Seed an org with two teams and `member_count` plain members on the first.
pub async fn setup(config: AccessControlConfig, member_count: usize) -> TestContext {
    let store = Arc::new(InMemoryStore::new());
    let config = Arc::new(ConfigHandle::new(config));
    let service = TeamMemberService::with_memory_store(store.clone(), config.clone());

    let signed_in = store
        .create_user(TEST_USER_LOGIN, "test@test.com", "Test User")
        .await
        .expect("create signed-in user");
    let team = store.create_team(TEST_ORG, "test").await.expect("create team");
    let other_team = store.create_team(TEST_ORG, "other").await.expect("create team");

    let mut members = Vec::with_capacity(member_count);
    for i in 0..member_count {
        let user = store
            .create_user(format!("loginuser{}", i), format!("user{}@test.com", i), format!("user{}", i))
            .await
            .expect("create member");
        store
            .add_member(&team, user.id, TeamPermission::Member, false)
            .await
            .expect("add member");
        members.push(user);
    }

    TestContext { store, config, service, team, other_team, members, signed_in }
}

pub fn legacy(editors_can_admin: bool) -> AccessControlConfig {
    AccessControlConfig { editors_can_admin, ..Default::default() }
}

pub fn fine_grained() -> AccessControlConfig {
    AccessControlConfig { fine_grained_enabled: true, ..Default::default() }
}

impl TestContext {
    /// The signed-in user with the given org role.
    pub fn actor(&self, role: OrgRole) -> Actor {
        Actor::new(self.signed_in.id, TEST_ORG, role)
    }

    /// A fresh user in the org who is not on any team.
    pub async fn new_user(&self, login: &str) -> UserProfile {
        self.store
            .create_user(login, format!("{}@test.com", login), login)
            .await
            .expect("create user")
    }

    /// Put the signed-in user on team 1 with `permission`.
    pub async fn join_team(&self, permission: TeamPermission) {
        match self.store.get_membership(self.team.id, self.signed_in.id).await.expect("read membership") {
            Some(_) => {
                self.store
                    .update_membership_permission(self.team.id, self.signed_in.id, permission)
                    .await
                    .expect("update membership");
            }
            None => {
                self.store
                    .add_member(&self.team, self.signed_in.id, permission, false)
                    .await
                    .expect("add membership");
            }
        }
    }

    /// Replace the signed-in user's fine-grained grants.
    pub async fn grant(&self, grants: Vec<Grant>) {
        self.store
            .set_permissions(TEST_ORG, self.signed_in.id, grants)
            .await
            .expect("set permissions");
    }

    pub async fn member_logins(&self) -> Vec<String> {
        let admin = self.actor(OrgRole::Admin);
        self.service
            .list_members(&admin, self.team.id)
            .await
            .expect("list members")
            .into_iter()
            .map(|m| m.login)
            .collect()
    }
}
