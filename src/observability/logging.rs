//! # Structured Logging
//!
//! Span macros and subscriber setup built on the tracing ecosystem.
//!
//! Every authorization span carries an `operation_id` so the decision, the
//! store reads that fed it and the resulting mutation can be correlated in
//! log output.

use tracing_subscriber::EnvFilter;

use crate::config::{AccessControlConfig, ObservabilityConfig};
use crate::errors::{Result, TeamguardError};

/// Create a tracing span for one team member operation.
///
/// ```rust,ignore
/// let span = authz_span!("add_member", org_id = actor.org_id, team_id = team_id);
/// ```
#[macro_export]
macro_rules! authz_span {
    ($operation:expr) => {
        tracing::info_span!(
            "team_member_operation",
            operation = %$operation,
            operation_id = %uuid::Uuid::new_v4(),
            org_id = tracing::field::Empty,
            team_id = tracing::field::Empty
        )
    };
    ($operation:expr, org_id = $org:expr, team_id = $team:expr) => {
        tracing::info_span!(
            "team_member_operation",
            operation = %$operation,
            operation_id = %uuid::Uuid::new_v4(),
            org_id = %$org,
            team_id = %$team
        )
    };
    ($operation:expr, $($field:tt)*) => {
        tracing::info_span!(
            "team_member_operation",
            operation = %$operation,
            operation_id = %uuid::Uuid::new_v4(),
            org_id = tracing::field::Empty,
            team_id = tracing::field::Empty,
            $($field)*
        )
    };
}

/// Create a tracing span for a membership or grant store call.
#[macro_export]
macro_rules! store_span {
    ($operation:expr) => {
        tracing::debug_span!(
            "store_operation",
            operation = %$operation,
            operation_id = %uuid::Uuid::new_v4(),
            team_id = tracing::field::Empty
        )
    };
    ($operation:expr, team_id = $team:expr) => {
        tracing::debug_span!(
            "store_operation",
            operation = %$operation,
            operation_id = %uuid::Uuid::new_v4(),
            team_id = %$team
        )
    };
    ($operation:expr, $($field:tt)*) => {
        tracing::debug_span!(
            "store_operation",
            operation = %$operation,
            operation_id = %uuid::Uuid::new_v4(),
            team_id = tracing::field::Empty,
            $($field)*
        )
    };
}

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `config.log_level`. Returns a config
/// error if a subscriber is already installed.
pub fn init_logging(config: &ObservabilityConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| {
            TeamguardError::config_with_source(
                format!("Invalid log level '{}'", config.log_level),
                Box::new(e),
            )
        })?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let installed = if config.json_logging {
        builder.json().with_current_span(true).try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| TeamguardError::config(format!("Failed to install subscriber: {}", e)))
}

/// Log the access control settings in effect at startup
pub fn log_config_info(service_name: &str, config: &AccessControlConfig) {
    tracing::info!(
        service = service_name,
        fine_grained_enabled = config.fine_grained_enabled,
        editors_can_admin = config.editors_can_admin,
        hidden_users = config.hidden_users.len(),
        super_admin_bypasses_fine_grained = config.super_admin_bypasses_fine_grained,
        "team member authorization configuration"
    );
}
