//! User profile data joined into team member listings.

use serde::{Deserialize, Serialize};

use crate::domain::UserId;

/// The subset of a user account the membership listing exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub login: String,
    pub email: String,
    pub name: String,
    pub avatar_url: String,
    pub auth_module: String,
    pub labels: Vec<String>,
}

impl UserProfile {
    pub fn new<L: Into<String>, E: Into<String>, N: Into<String>>(
        id: UserId,
        login: L,
        email: E,
        name: N,
    ) -> Self {
        let email = normalize_email(&email.into());
        Self {
            id,
            login: login.into(),
            avatar_url: gravatar_path(&email),
            email,
            name: name.into(),
            auth_module: String::new(),
            labels: Vec::new(),
        }
    }

    /// Mark the profile as provisioned by an external auth module.
    pub fn with_auth_module<S: Into<String>>(mut self, module: S) -> Self {
        let module = module.into();
        self.labels = auth_module_labels(&module);
        self.auth_module = module;
        self
    }
}

/// Normalize email to lowercase for consistent storage and comparison.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn gravatar_path(email: &str) -> String {
    format!("/avatar/{}", email.replace(['@', '.'], "_"))
}

fn auth_module_labels(module: &str) -> Vec<String> {
    match module {
        "" => Vec::new(),
        "ldap" => vec!["LDAP".to_string()],
        other => vec![other.to_string()],
    }
}
