//! Loaded configuration drives the team member service.

mod common;

use std::io::Write;
use std::sync::Arc;

use common::{setup, TEST_ORG};
use teamguard::auth::OrgRole;
use teamguard::config::{AppConfig, ConfigHandle};
use teamguard::{InMemoryStore, Result, TeamMemberService};
use tracing_test::traced_test;

#[traced_test]
#[tokio::test]
async fn test_file_config_hides_users_and_selects_mode() -> Result<()> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
[access_control]
fine_grained_enabled = false
editors_can_admin = true
hidden_users = ["loginuser1"]

[observability]
log_level = "debug"
"#
    )
    .unwrap();

    let app = AppConfig::load(Some(file.path()))?;
    assert!(app.access_control.editors_can_admin);
    assert_eq!(app.observability.log_level, "debug");

    let ctx = setup(app.access_control.clone(), 3).await;
    assert_eq!(ctx.member_logins().await, vec!["loginuser0", "loginuser2"]);
    Ok(())
}

#[tokio::test]
async fn test_service_reads_shared_handle() -> Result<()> {
    let store = Arc::new(InMemoryStore::new());
    let handle = Arc::new(ConfigHandle::default());
    let service = TeamMemberService::with_memory_store(store.clone(), handle.clone());

    let team = store.create_team(TEST_ORG, "core").await?;
    let user = store.create_user("jdoe", "JDoe@Example.com", "J Doe").await?;
    store.add_member(&team, user.id, Default::default(), false).await?;

    let viewer = teamguard::Actor::new(user.id, TEST_ORG, OrgRole::Viewer);
    assert_eq!(service.list_members(&viewer, team.id).await?.len(), 1);

    let mut hidden = (*handle.snapshot()?).clone();
    hidden.hidden_users.insert("jdoe".to_string());
    handle.replace(hidden)?;
    assert!(service.list_members(&viewer, team.id).await?.is_empty());

    let members = store_emails(&store, &team).await;
    assert_eq!(members, vec!["jdoe@example.com"]);
    Ok(())
}

async fn store_emails(store: &InMemoryStore, team: &teamguard::auth::Team) -> Vec<String> {
    use teamguard::storage::TeamMembershipRepository;
    store
        .list_team_members(team.org_id, team.id)
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.email)
        .collect()
}
