//! # Error Handling
//!
//! Error types shared by the evaluators, stores and the team member service.

mod types;

pub use types::{Result, TeamguardError};

/// Short alias used across the crate.
pub type Error = TeamguardError;
