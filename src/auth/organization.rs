//! Organization roles.
//!
//! Every user holds exactly one role per organization. The legacy evaluator
//! treats Admin as org admin and gives Editor a configurable team admin path.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Role of a user within an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrgRole {
    /// Read-only access to org resources
    Viewer,
    /// Can edit org resources; may administer teams when the deployment allows it
    Editor,
    /// Full control over the organization
    Admin,
}

impl OrgRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrgRole::Viewer => "Viewer",
            OrgRole::Editor => "Editor",
            OrgRole::Admin => "Admin",
        }
    }

    /// Whether this role grants org admin privileges.
    pub fn is_admin(&self) -> bool {
        matches!(self, OrgRole::Admin)
    }
}

impl Display for OrgRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OrgRole {
    type Err = OrgRoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Viewer" => Ok(OrgRole::Viewer),
            "Editor" => Ok(OrgRole::Editor),
            "Admin" => Ok(OrgRole::Admin),
            other => Err(OrgRoleParseError(other.to_string())),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid organization role: {0}")]
pub struct OrgRoleParseError(pub String);
