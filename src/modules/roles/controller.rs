use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use tavern_core::AppError;
use tavern_models::{
    CreateRoleDto, MessageResponse, PermissionCatalogResponse, RoleResponse, UpdateRoleDto,
};

use super::service;
use crate::middleware::auth::CurrentRole;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/roles/permissions",
    responses(
        (status = 200, description = "Permission catalog", body = PermissionCatalogResponse),
        (status = 401, description = "No valid session", body = ErrorResponse),
        (status = 403, description = "Missing ManageRoles permission", body = ErrorResponse)
    ),
    tag = "Roles",
    security(("session_cookie" = []))
)]
pub async fn get_permissions() -> Json<PermissionCatalogResponse> {
    Json(service::permission_catalog())
}

#[utoipa::path(
    get,
    path = "/api/roles",
    responses(
        (status = 200, description = "All roles, ordered by name", body = Vec<RoleResponse>),
        (status = 401, description = "No valid session", body = ErrorResponse),
        (status = 403, description = "Missing ManageRoles permission", body = ErrorResponse)
    ),
    tag = "Roles",
    security(("session_cookie" = []))
)]
pub async fn get_roles(State(state): State<AppState>) -> Result<Json<Vec<RoleResponse>>, AppError> {
    let roles = service::list_roles(state.store.as_ref()).await?;
    Ok(Json(roles))
}

#[utoipa::path(
    post,
    path = "/api/roles",
    request_body = CreateRoleDto,
    responses(
        (status = 201, description = "Role created", body = RoleResponse),
        (status = 400, description = "Role already exists or invalid permissions", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "No valid session", body = ErrorResponse),
        (status = 403, description = "Missing ManageRoles permission", body = ErrorResponse)
    ),
    tag = "Roles",
    security(("session_cookie" = []))
)]
pub async fn create_role(
    State(state): State<AppState>,
    CurrentRole(actor): CurrentRole,
    ValidatedJson(dto): ValidatedJson<CreateRoleDto>,
) -> Result<(StatusCode, Json<RoleResponse>), AppError> {
    let role = service::create_role(state.store.as_ref(), state.verifier.as_ref(), dto).await?;
    tracing::info!(actor = %actor.role_name, role_name = %role.role_name, "Role created via API");
    Ok((StatusCode::CREATED, Json(role)))
}

#[utoipa::path(
    get,
    path = "/api/roles/{id}",
    params(
        ("id" = String, Path, description = "Role ID")
    ),
    responses(
        (status = 200, description = "Role", body = RoleResponse),
        (status = 400, description = "Malformed role ID", body = ErrorResponse),
        (status = 404, description = "Role not found", body = ErrorResponse)
    ),
    tag = "Roles",
    security(("session_cookie" = []))
)]
pub async fn get_role_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RoleResponse>, AppError> {
    let id = service::parse_role_id(&id)?;
    let role = service::get_role(state.store.as_ref(), id).await?;
    Ok(Json(role))
}

#[utoipa::path(
    put,
    path = "/api/roles/{id}",
    params(
        ("id" = String, Path, description = "Role ID")
    ),
    request_body = UpdateRoleDto,
    responses(
        (status = 200, description = "Role updated", body = RoleResponse),
        (status = 400, description = "Malformed ID, empty update or name taken", body = ErrorResponse),
        (status = 404, description = "Role not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Roles",
    security(("session_cookie" = []))
)]
pub async fn update_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateRoleDto>,
) -> Result<Json<RoleResponse>, AppError> {
    let id = service::parse_role_id(&id)?;
    let role = service::update_role(state.store.as_ref(), state.verifier.as_ref(), id, dto).await?;
    Ok(Json(role))
}

#[utoipa::path(
    delete,
    path = "/api/roles/{id}",
    params(
        ("id" = String, Path, description = "Role ID")
    ),
    responses(
        (status = 200, description = "Role deleted", body = MessageResponse),
        (status = 400, description = "Malformed role ID", body = ErrorResponse),
        (status = 404, description = "Role not found", body = ErrorResponse)
    ),
    tag = "Roles",
    security(("session_cookie" = []))
)]
pub async fn delete_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = service::parse_role_id(&id)?;
    service::delete_role(state.store.as_ref(), id).await?;
    Ok(Json(MessageResponse::new("role deleted")))
}
