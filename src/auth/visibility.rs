//! Hides configured logins from team member listings.
//!
//! Hiding is unconditional: it applies to every viewer, admins included, and
//! is independent of the authorization router. The membership store owns the
//! ordering of a listing; filtering never re-sorts.

use std::collections::HashSet;

use crate::auth::team::TeamMemberDto;

/// Remove every member whose login is in `hidden_logins`, keeping the
/// relative order of the rest.
pub fn filter_hidden(members: Vec<TeamMemberDto>, hidden_logins: &HashSet<String>) -> Vec<TeamMemberDto> {
    retain_visible(members, hidden_logins, |member| member.login.as_str())
}

/// [`filter_hidden`] for any row type that exposes a login.
///
/// # Examples
///
/// ```rust
/// use std::collections::HashSet;
/// use teamguard::auth::visibility::retain_visible;
///
/// let hidden: HashSet<String> = ["admin".to_string()].into_iter().collect();
/// let logins = vec!["a", "admin", "b"];
/// assert_eq!(retain_visible(logins, &hidden, |login| *login), vec!["a", "b"]);
/// ```
pub fn retain_visible<T, F>(mut rows: Vec<T>, hidden_logins: &HashSet<String>, login_of: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    if hidden_logins.is_empty() {
        return rows;
    }
    rows.retain(|row| !hidden_logins.contains(login_of(row)));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::team::TeamPermission;
    use crate::domain::{OrgId, TeamId, UserId};

    fn member(user_id: i64, login: &str) -> TeamMemberDto {
        TeamMemberDto {
            org_id: OrgId::from_i64_unchecked(1),
            team_id: TeamId::from_i64_unchecked(1),
            user_id: UserId::from_i64_unchecked(user_id),
            email: format!("{}@test.com", login),
            name: login.to_string(),
            login: login.to_string(),
            avatar_url: String::new(),
            labels: vec![],
            auth_module: String::new(),
            permission: TeamPermission::Member,
            external: false,
        }
    }

    fn hidden(logins: &[&str]) -> HashSet<String> {
        logins.iter().map(|l| l.to_string()).collect()
    }

    fn logins(members: &[TeamMemberDto]) -> Vec<&str> {
        members.iter().map(|m| m.login.as_str()).collect()
    }

    #[test]
    fn no_hidden_users_keeps_everything() {
        let members = vec![member(1, "loginuser0"), member(2, "loginuser1"), member(3, "loginuser2")];
        let visible = filter_hidden(members.clone(), &HashSet::new());
        assert_eq!(visible, members);
    }

    #[test]
    fn hidden_users_are_removed_in_place() {
        let members = vec![member(1, "loginuser0"), member(2, "user1"), member(3, "loginuser2"), member(4, "testuser")];
        let visible = filter_hidden(members, &hidden(&["user1", "testuser"]));
        assert_eq!(logins(&visible), vec!["loginuser0", "loginuser2"]);
    }

    #[test]
    fn hidden_logins_absent_from_the_list_change_nothing() {
        let members = vec![member(1, "loginuser0"), member(2, "loginuser1"), member(3, "loginuser2")];
        let visible = filter_hidden(members, &hidden(&["user1", "testuser"]));
        assert_eq!(logins(&visible), vec!["loginuser0", "loginuser1", "loginuser2"]);
    }

    #[test]
    fn matching_is_exact_and_case_sensitive() {
        let members = vec![member(1, "User1"), member(2, "user1")];
        let visible = filter_hidden(members, &hidden(&["user1"]));
        assert_eq!(logins(&visible), vec!["User1"]);
    }
}
