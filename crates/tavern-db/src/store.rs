use async_trait::async_trait;

use tavern_core::AppError;
use tavern_models::{CredentialRecord, RoleId};

/// Fields to replace on a Credential Record. `None` leaves the stored value
/// untouched. The password must already be in stored form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleChanges {
    pub role_name: Option<String>,
    pub password: Option<String>,
    pub permissions: Option<Vec<String>>,
}

/// Persistence for Credential Records.
///
/// Every method is a single-document operation. There is no optimistic
/// locking: concurrent updates to the same record are last-write-wins.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn insert(&self, record: &CredentialRecord) -> Result<(), AppError>;

    async fn find_by_id(&self, id: RoleId) -> Result<Option<CredentialRecord>, AppError>;

    /// Exact, case-sensitive match on the role name.
    async fn find_by_role_name(
        &self,
        role_name: &str,
    ) -> Result<Option<CredentialRecord>, AppError>;

    /// All records ordered by role name.
    async fn list(&self) -> Result<Vec<CredentialRecord>, AppError>;

    /// Applies `changes` and bumps `updated_at`. Returns the updated record,
    /// or `None` if no record has that ID.
    async fn update(
        &self,
        id: RoleId,
        changes: RoleChanges,
    ) -> Result<Option<CredentialRecord>, AppError>;

    /// Returns whether a record was removed.
    async fn delete(&self, id: RoleId) -> Result<bool, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}
