//! Scope matching for fine-grained grants.
//!
//! Scopes are colon separated paths naming a resource kind and an instance,
//! e.g. `teams:id:1`. A grant scope may end in a `*` segment, which covers
//! every scope sharing the prefix up to and including the last separator:
//!
//! - `teams:id:1` matches only `teams:id:1`
//! - `teams:id:*` matches `teams:id:1`, `teams:id:42`, ...
//! - `teams:*` matches any `teams:` scope
//!
//! A wildcard never crosses resource kinds, and a bare `*` is not a global
//! wildcard. Malformed scopes fail to match.

use crate::domain::TeamId;

/// Separator between scope segments.
pub const SCOPE_SEPARATOR: char = ':';

/// Trailing wildcard segment.
pub const WILDCARD: &str = "*";

/// Prefix of the identity scope of a team.
pub const TEAMS_ID_PREFIX: &str = "teams:id:";

/// Decide whether a granted scope covers a required scope.
///
/// # Examples
///
/// ```rust
/// use teamguard::auth::scope::matches;
///
/// assert!(matches("teams:id:1", "teams:id:1"));
/// assert!(matches("teams:id:*", "teams:id:7"));
/// assert!(matches("teams:*", "teams:id:7"));
/// assert!(!matches("teams:id:2", "teams:id:1"));
/// assert!(!matches("teams:id:*", "users:id:1"));
/// assert!(!matches("*", "teams:id:1"));
/// ```
pub fn matches(granted: &str, required: &str) -> bool {
    if granted.is_empty() || required.is_empty() {
        return false;
    }

    if granted == required {
        return true;
    }

    let Some(prefix) = granted.strip_suffix(WILDCARD) else {
        return false;
    };

    // The wildcard must be a whole segment after at least one kind segment.
    if prefix.len() < 2 || !prefix.ends_with(SCOPE_SEPARATOR) || prefix.contains(WILDCARD) {
        return false;
    }

    required.len() > prefix.len() && required.starts_with(prefix)
}

/// Build the identity scope of a team (`teams:id:<id>`).
pub fn team_id_scope(team_id: TeamId) -> String {
    format!("{}{}", TEAMS_ID_PREFIX, team_id)
}
