//! # Observability
//!
//! Structured logging for authorization decisions and store calls.

pub mod logging;

pub use logging::{init_logging, log_config_info};
