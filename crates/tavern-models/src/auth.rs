//! Authentication DTOs.
//!
//! Login takes a role name and password and answers with the role's identity;
//! the session itself travels in a cookie, never in a response body.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::ids::RoleId;

/// Login request.
///
/// Both fields are optional on the wire so a missing field is reported as
/// "role and password required" rather than as a JSON parse failure.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default, alias = "role")]
    #[schema(example = "editor")]
    pub role_name: Option<String>,
    #[serde(default)]
    #[schema(example = "p1")]
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn new(role_name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            role_name: Some(role_name.into()),
            password: Some(password.into()),
        }
    }

    /// Both credentials, if both are present and non-empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let role_name = self.role_name.as_deref().filter(|s| !s.is_empty())?;
        let password = self.password.as_deref().filter(|s| !s.is_empty())?;
        Some((role_name, password))
    }
}

/// Successful login. The password is never echoed back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub id: RoleId,
    pub role_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SessionStatus {
    pub authenticated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
