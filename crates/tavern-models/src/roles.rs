//! Credential Record models and role administration DTOs.
//!
//! A Credential Record ("role") is a login identity: a unique role name, a
//! password, and the permissions the role grants. The dashboard logs in as a
//! role, not as a person.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use tavern_core::PermissionInfo;

use crate::ids::RoleId;

/// A stored Credential Record.
///
/// This is the persisted shape and carries the password; it is never
/// returned from the API. Use [`RoleResponse`] for that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    #[serde(rename = "_id")]
    pub id: RoleId,
    pub role_name: String,
    pub password: String,
    #[serde(default)]
    pub permissions: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CredentialRecord {
    /// Builds a new record with a fresh ID. `password` must already be in
    /// stored form.
    pub fn new(
        role_name: impl Into<String>,
        password: impl Into<String>,
        permissions: Vec<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: RoleId::new(),
            role_name: role_name.into(),
            password: password.into(),
            permissions,
            created_at: now,
            updated_at: now,
        }
    }

    /// Membership test; order and duplicates do not matter.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}

/// The identity a guarded request runs as, resolved once per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedRole {
    pub id: RoleId,
    pub role_name: String,
    pub permissions: Vec<String>,
}

impl From<CredentialRecord> for AuthenticatedRole {
    fn from(record: CredentialRecord) -> Self {
        Self {
            id: record.id,
            role_name: record.role_name,
            permissions: record.permissions,
        }
    }
}

/// A Credential Record as returned by the API (no password).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleResponse {
    pub id: RoleId,
    pub role_name: String,
    pub permissions: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CredentialRecord> for RoleResponse {
    fn from(record: CredentialRecord) -> Self {
        Self {
            id: record.id,
            role_name: record.role_name,
            permissions: record.permissions,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

// DTOs

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoleDto {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Role name must be between 1 and 100 characters"
    ))]
    #[schema(example = "editor")]
    pub role_name: String,
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Partial update. Each present field replaces the stored value wholesale.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoleDto {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Role name must be between 1 and 100 characters"
    ))]
    pub role_name: Option<String>,
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: Option<String>,
    pub permissions: Option<Vec<String>>,
}

impl UpdateRoleDto {
    pub fn is_empty(&self) -> bool {
        self.role_name.is_none() && self.password.is_none() && self.permissions.is_none()
    }
}

/// Returns the first blank permission name, if any.
pub fn find_blank_permission(permissions: &[String]) -> Option<usize> {
    permissions.iter().position(|p| p.trim().is_empty())
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PermissionCatalogResponse {
    pub permissions: Vec<PermissionInfo>,
}
