//! # Configuration Management
//!
//! Deployment settings for the authorization core: which evaluator is active,
//! whether Editors may act as team admins, which logins are hidden from
//! member listings, and how logging is set up.

pub mod settings;

pub use settings::{AccessControlConfig, AppConfig, ConfigHandle, ObservabilityConfig, ENV_PREFIX};
