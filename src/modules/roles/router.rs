use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::controller::{
    create_role, delete_role, get_permissions, get_role_by_id, get_roles, update_role,
};
use crate::middleware::permission::require_manage_roles;
use crate::state::AppState;

/// Every route requires the `ManageRoles` permission.
pub fn init_roles_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/permissions", get(get_permissions))
        .route("/", post(create_role).get(get_roles))
        .route(
            "/{id}",
            get(get_role_by_id).put(update_role).delete(delete_role),
        )
        .route_layer(middleware::from_fn_with_state(state, require_manage_roles))
}
