use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use tavern_core::PermissionInfo;
use tavern_models::{
    AuthenticatedRole, CreateRoleDto, LoginRequest, LoginResponse, MessageResponse,
    PermissionCatalogResponse, RoleId, RoleResponse, SessionStatus, UpdateRoleDto,
};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::health::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::health_check,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::logout,
        crate::modules::auth::controller::check_session,
        crate::modules::auth::controller::current_role,
        crate::modules::roles::controller::get_permissions,
        crate::modules::roles::controller::get_roles,
        crate::modules::roles::controller::create_role,
        crate::modules::roles::controller::get_role_by_id,
        crate::modules::roles::controller::update_role,
        crate::modules::roles::controller::delete_role,
    ),
    components(
        schemas(
            RoleId,
            LoginRequest,
            LoginResponse,
            SessionStatus,
            MessageResponse,
            AuthenticatedRole,
            RoleResponse,
            CreateRoleDto,
            UpdateRoleDto,
            PermissionInfo,
            PermissionCatalogResponse,
            HealthResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Authentication", description = "Role login and session cookie management"),
        (name = "Roles", description = "Login role and permission administration")
    ),
    info(
        title = "Tavern API",
        version = "0.1.0",
        description = "Admin backend for a restaurant and bar. Dashboard sessions are carried in an HttpOnly cookie.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("token"))),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_auth_and_role_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/auth/login",
            "/api/auth/logout",
            "/api/auth/session",
            "/api/roles",
            "/api/roles/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
