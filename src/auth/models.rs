//! Request-scoped identity and decision types used by the evaluators.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use thiserror::Error;

use crate::auth::organization::OrgRole;
use crate::domain::{OrgId, UserId};
use crate::errors::Error;

/// A fine-grained capability: an action allowed on resources matched by a scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grant {
    pub action: String,
    pub scope: String,
}

impl Grant {
    pub fn new<A: Into<String>, S: Into<String>>(action: A, scope: S) -> Self {
        Self { action: action.into(), scope: scope.into() }
    }
}

impl Display for Grant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} on {}", self.action, self.scope)
    }
}

/// The authenticated identity a decision is made for.
///
/// Built once per request by the caller and never mutated while a decision
/// is being evaluated. `grants` is only populated in fine-grained mode.
#[derive(Debug, Clone)]
pub struct Actor {
    pub user_id: UserId,
    pub org_id: OrgId,
    pub org_role: OrgRole,
    pub is_super_admin: bool,
    grants: HashSet<Grant>,
}

impl Actor {
    pub fn new(user_id: UserId, org_id: OrgId, org_role: OrgRole) -> Self {
        Self {
            user_id,
            org_id,
            org_role,
            is_super_admin: false,
            grants: HashSet::new(),
        }
    }

    pub fn with_super_admin(mut self, is_super_admin: bool) -> Self {
        self.is_super_admin = is_super_admin;
        self
    }

    /// Replace the grant set.
    pub fn with_grants<I: IntoIterator<Item = Grant>>(mut self, grants: I) -> Self {
        self.grants = grants.into_iter().collect();
        self
    }

    pub fn grants(&self) -> impl Iterator<Item = &Grant> {
        self.grants.iter()
    }
}

/// Outcome of every evaluator. There is no partial or soft deny.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationDecision {
    pub allowed: bool,
}

impl AuthorizationDecision {
    pub const fn allow() -> Self {
        Self { allowed: true }
    }

    pub const fn deny() -> Self {
        Self { allowed: false }
    }

    pub fn is_allowed(&self) -> bool {
        self.allowed
    }
}

impl From<bool> for AuthorizationDecision {
    fn from(allowed: bool) -> Self {
        Self { allowed }
    }
}

/// Errors returned by the authorization layer.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("forbidden: not permitted to {operation} team members")]
    Forbidden { operation: &'static str },
    #[error(transparent)]
    Persistence(#[from] Error),
}

impl From<AuthError> for Error {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::Forbidden { operation } => {
                Error::forbidden(format!("not permitted to {} team members", operation))
            }
            AuthError::Persistence(inner) => inner,
        }
    }
}
