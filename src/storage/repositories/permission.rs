//! Fine-grained grant store seam

use async_trait::async_trait;

use crate::auth::models::Grant;
use crate::domain::{OrgId, UserId};
use crate::errors::Result;

#[async_trait]
pub trait PermissionRepository: Send + Sync {
    /// Resolve every `(action, scope)` grant a user holds in an organization.
    ///
    /// Role expansion and inheritance happen behind this call; the evaluator
    /// only sees the flattened set.
    async fn get_user_permissions(&self, org_id: OrgId, user_id: UserId) -> Result<Vec<Grant>>;
}
