//! Request DTOs and input validation for team member endpoints.
//!
//! Validation runs before any store access or authorization decision, so a
//! malformed request is always reported as Invalid Input.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::auth::team::TeamPermission;
use crate::domain::UserId;
use crate::errors::{Result, TeamguardError};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddTeamMemberRequest {
    #[validate(range(min = 1, message = "userId must be a positive integer"))]
    pub user_id: i64,
}

impl AddTeamMemberRequest {
    pub fn new(user_id: i64) -> Self {
        Self { user_id }
    }

    /// Validated target user id.
    pub fn user_id(&self) -> Result<UserId> {
        self.validate()?;
        Ok(UserId::from_i64_unchecked(self.user_id))
    }
}

/// Permission change for an existing member. Accepts the wire codes only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeamMemberRequest {
    pub permission: i64,
}

impl UpdateTeamMemberRequest {
    pub fn new(permission: i64) -> Self {
        Self { permission }
    }

    /// Validated permission level.
    pub fn permission(&self) -> Result<TeamPermission> {
        self.validate()?;
        TeamPermission::try_from(self.permission).map_err(|e| {
            TeamguardError::validation_field(e.to_string(), "permission")
        })
    }
}

impl Validate for UpdateTeamMemberRequest {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        validate_permission_code(self.permission).map_err(|err| {
            let mut errors = ValidationErrors::new();
            errors.add("permission", err);
            errors
        })
    }
}

fn validate_permission_code(code: i64) -> std::result::Result<(), ValidationError> {
    if TeamPermission::try_from(code).is_ok() {
        Ok(())
    } else {
        let mut err = ValidationError::new("invalid_permission");
        err.message = Some(
            format!(
                "permission must be {} (Member) or {} (Admin), got {}",
                TeamPermission::MEMBER_CODE,
                TeamPermission::ADMIN_CODE,
                code
            )
            .into(),
        );
        Err(err)
    }
}

/// Parse a positive integer path parameter such as `:teamId` or `:userId`.
///
/// # Errors
///
/// Returns a `Validation` error naming `field` for non-numeric or
/// non-positive input.
pub fn parse_positive_id(raw: &str, field: &'static str) -> Result<i64> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        Ok(_) => Err(TeamguardError::validation_field(
            format!("{} must be a positive integer", field),
            field,
        )),
        Err(_) => Err(TeamguardError::validation_field(
            format!("{} is not a valid id: '{}'", field, raw),
            field,
        )),
    }
}
