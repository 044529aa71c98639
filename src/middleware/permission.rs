use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use tavern_core::{AppError, permissions};
use tavern_models::AuthenticatedRole;

use super::auth::session_role_id;
use crate::state::AppState;

/// Rejects requests whose session lacks `permission`.
///
/// The session is verified first with the same 401s as
/// [`require_authentication`](super::auth::require_authentication). The
/// Credential Record is then loaded once; a missing record or a permission
/// set without `permission` is a 403.
pub async fn require_permission(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
    permission: &'static str,
) -> Result<Response, AppError> {
    let role_id = session_role_id(&state, &req)?;

    let record = state.store.find_by_id(role_id).await?.ok_or_else(|| {
        tracing::warn!(role_id = %role_id, permission, "Session names a role that no longer exists");
        AppError::forbidden("access denied")
    })?;

    if !record.has_permission(permission) {
        tracing::warn!(
            role_id = %record.id,
            role_name = %record.role_name,
            permission,
            "Permission denied"
        );
        return Err(AppError::forbidden(format!(
            "access denied. missing required permission: {}",
            permission
        )));
    }

    req.extensions_mut().insert(AuthenticatedRole::from(record));
    Ok(next.run(req).await)
}

/// Declares a named middleware fn gating on one permission, for use with
/// `axum::middleware::from_fn_with_state`.
macro_rules! permission_guard {
    ($name:ident, $permission:expr) => {
        pub async fn $name(
            state: State<AppState>,
            req: Request,
            next: Next,
        ) -> Result<Response, AppError> {
            require_permission(state, req, next, $permission).await
        }
    };
}

permission_guard!(require_add_events, permissions::ADD_EVENTS);
permission_guard!(require_manage_gallery, permissions::MANAGE_GALLERY);
permission_guard!(require_manage_roles, permissions::MANAGE_ROLES);
