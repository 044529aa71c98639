use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::controller::{check_session, current_role, login, logout};
use crate::middleware::auth::require_authentication;
use crate::state::AppState;

pub fn init_auth_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/me",
            get(current_role).route_layer(middleware::from_fn_with_state(
                state,
                require_authentication,
            )),
        )
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/session", get(check_session))
}
