//! Domain ID Types with NewType Pattern
//!
//! Organizations, teams and users are addressed by positive integer
//! identifiers. Each wrapper keeps the kinds apart at compile time and
//! implements Display, FromStr, Serialize and Deserialize.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when an identifier is not a positive integer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid {kind}: '{value}' is not a positive integer")]
pub struct IdParseError {
    pub kind: &'static str,
    pub value: String,
}

/// Macro to generate NewType ID wrappers with all required traits
macro_rules! domain_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw value that is already known to be valid (store rows, tests)
            pub const fn from_i64_unchecked(value: i64) -> Self {
                Self(value)
            }

            /// Get the inner integer value
            pub const fn as_i64(&self) -> i64 {
                self.0
            }

            /// Parse and validate a positive integer identifier
            pub fn parse(s: &str) -> Result<Self, IdParseError> {
                match s.trim().parse::<i64>() {
                    Ok(value) if value > 0 => Ok(Self(value)),
                    _ => Err(IdParseError { kind: $kind, value: s.to_string() }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<i64> for $name {
            type Error = IdParseError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(IdParseError { kind: $kind, value: value.to_string() })
                }
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

domain_id!(
    /// Identifier of an organization
    OrgId,
    "organization id"
);
domain_id!(
    /// Identifier of a team within an organization
    TeamId,
    "team id"
);
domain_id!(
    /// Identifier of a user account
    UserId,
    "user id"
);
