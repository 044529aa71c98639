//! # Tavern Models
//!
//! Domain models and DTOs for the Tavern API.
//!
//! # Modules
//!
//! - [`ids`]: The [`RoleId`] newtype
//! - [`roles`]: Credential Records and role administration DTOs
//! - [`auth`]: Login, logout and session status DTOs

pub mod auth;
pub mod ids;
pub mod roles;

// Re-export commonly used types at crate root for convenience
pub use auth::{LoginRequest, LoginResponse, MessageResponse, SessionStatus};
pub use ids::RoleId;
pub use roles::{
    AuthenticatedRole, CreateRoleDto, CredentialRecord, PermissionCatalogResponse, RoleResponse,
    UpdateRoleDto, find_blank_permission,
};
