//! Team domain models and types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

use crate::domain::{OrgId, TeamId, UserId};

/// Delegated trust level a user holds on a single team.
///
/// Serialized as the integer codes used by the membership API: `0` for a
/// plain member and `4` for a team admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum TeamPermission {
    #[default]
    Member,
    Admin,
}

impl TeamPermission {
    pub const MEMBER_CODE: i64 = 0;
    pub const ADMIN_CODE: i64 = 4;

    pub fn code(&self) -> i64 {
        match self {
            TeamPermission::Member => Self::MEMBER_CODE,
            TeamPermission::Admin => Self::ADMIN_CODE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TeamPermission::Member => "member",
            TeamPermission::Admin => "admin",
        }
    }
}

impl Display for TeamPermission {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<i64> for TeamPermission {
    type Error = TeamPermissionParseError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            Self::MEMBER_CODE => Ok(TeamPermission::Member),
            Self::ADMIN_CODE => Ok(TeamPermission::Admin),
            other => Err(TeamPermissionParseError(other.to_string())),
        }
    }
}

impl From<TeamPermission> for i64 {
    fn from(permission: TeamPermission) -> Self {
        permission.code()
    }
}

impl FromStr for TeamPermission {
    type Err = TeamPermissionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "member" => Ok(TeamPermission::Member),
            "admin" => Ok(TeamPermission::Admin),
            other => other
                .parse::<i64>()
                .map_err(|_| TeamPermissionParseError(other.to_string()))
                .and_then(TeamPermission::try_from),
        }
    }
}

/// Error returned when a team permission is outside the defined levels.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid team permission: {0}")]
pub struct TeamPermissionParseError(pub String);

/// A team inside an organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    pub org_id: OrgId,
    pub name: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Team {
    pub fn belongs_to(&self, org_id: OrgId) -> bool {
        self.org_id == org_id
    }
}

/// A user's membership in a team. Unique per `(user_id, team_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMembership {
    pub user_id: UserId,
    pub team_id: TeamId,
    pub org_id: OrgId,
    pub permission: TeamPermission,
    /// Synced from an external identity source
    pub external: bool,
    pub created_at: DateTime<Utc>,
}

impl TeamMembership {
    pub fn is_admin(&self) -> bool {
        self.permission == TeamPermission::Admin
    }

    pub fn is_external(&self) -> bool {
        self.external
    }

    /// Whether this record describes `user_id` on `team_id`.
    pub fn is_for(&self, user_id: UserId, team_id: TeamId) -> bool {
        self.user_id == user_id && self.team_id == team_id
    }
}

/// New team membership creation payload.
#[derive(Debug, Clone)]
pub struct NewTeamMembership {
    pub user_id: UserId,
    pub team_id: TeamId,
    pub org_id: OrgId,
    pub permission: TeamPermission,
    pub external: bool,
}

/// One row of a team member listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberDto {
    pub org_id: OrgId,
    pub team_id: TeamId,
    pub user_id: UserId,
    pub email: String,
    pub name: String,
    pub login: String,
    pub avatar_url: String,
    pub labels: Vec<String>,
    pub auth_module: String,
    pub permission: TeamPermission,
    pub external: bool,
}
