//! # Configuration Settings
//!
//! Defines the configuration structure for teamguard.

use crate::errors::{Result, TeamguardError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, RwLock};
use validator::{Validate, ValidationError};

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "TEAMGUARD";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Authorization mode and membership visibility
    #[validate(nested)]
    pub access_control: AccessControlConfig,

    /// Logging configuration
    #[validate(nested)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Load configuration from an optional TOML file, then apply
    /// `TEAMGUARD_<SECTION>__<KEY>` environment overrides.
    ///
    /// `TEAMGUARD_ACCESS_CONTROL__HIDDEN_USERS` is read as a comma separated list.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config: AppConfig = builder.add_source(env_source()).build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        Validate::validate(self).map_err(TeamguardError::from)
    }
}

/// `TEAMGUARD_<SECTION>__<KEY>` overrides. This is the only environment
/// scheme; `AccessControlConfig::from_env` reads the same variables.
fn env_source() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("access_control.hidden_users")
        .try_parsing(true)
}

/// Deployment-wide authorization settings.
///
/// Read once per request; evaluators receive it explicitly instead of
/// reading ambient state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, Default)]
#[serde(default)]
pub struct AccessControlConfig {
    /// Use `(action, scope)` grants instead of the role hierarchy
    pub fine_grained_enabled: bool,

    /// Let Editors who are team admins administer their teams (legacy mode)
    pub editors_can_admin: bool,

    /// Logins removed from every team member listing
    #[validate(custom(function = "validate_hidden_users"))]
    pub hidden_users: HashSet<String>,

    /// Let super-admins skip grant checks in fine-grained mode
    pub super_admin_bypasses_fine_grained: bool,
}

impl AccessControlConfig {
    /// Read `TEAMGUARD_ACCESS_CONTROL__*` variables without a config file.
    pub fn from_env() -> Result<Self> {
        let app: AppConfig = config::Config::builder().add_source(env_source()).build()?.try_deserialize()?;
        Validate::validate(&app.access_control).map_err(TeamguardError::from)?;
        Ok(app.access_control)
    }
}

fn validate_hidden_users(users: &HashSet<String>) -> std::result::Result<(), ValidationError> {
    if users.iter().any(|login| login.trim().is_empty() || login.trim() != login) {
        let mut error = ValidationError::new("hidden_users");
        error.message = Some("Hidden user logins must be non-empty without surrounding whitespace".into());
        return Err(error);
    }
    Ok(())
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Tracing service name
    #[validate(length(min = 1, message = "Service name cannot be empty"))]
    pub service_name: String,

    /// Log level or filter directive (trace, debug, info, warn, error)
    #[validate(length(min = 1, message = "Log level cannot be empty"))]
    pub log_level: String,

    /// Enable JSON structured logging
    pub json_logging: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: "teamguard".to_string(),
            log_level: "info".to_string(),
            json_logging: false,
        }
    }
}

/// Shared holder for the current access control settings.
///
/// Requests take a snapshot at the start of a decision, so swapping the
/// settings never affects a decision already in flight.
#[derive(Debug, Default)]
pub struct ConfigHandle {
    current: RwLock<Arc<AccessControlConfig>>,
}

impl ConfigHandle {
    pub fn new(config: AccessControlConfig) -> Self {
        Self { current: RwLock::new(Arc::new(config)) }
    }

    /// The settings in effect right now.
    pub fn snapshot(&self) -> Result<Arc<AccessControlConfig>> {
        self.current
            .read()
            .map(|guard| Arc::clone(&*guard))
            .map_err(|_| TeamguardError::internal("Access control config lock poisoned"))
    }

    /// Swap in new settings for subsequent requests.
    pub fn replace(&self, config: AccessControlConfig) -> Result<()> {
        Validate::validate(&config).map_err(TeamguardError::from)?;
        let mut guard = self
            .current
            .write()
            .map_err(|_| TeamguardError::internal("Access control config lock poisoned"))?;
        *guard = Arc::new(config);
        Ok(())
    }
}
