use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use tavern_core::AppError;
use tavern_models::{AuthenticatedRole, RoleId};

use crate::modules::auth::service::AuthService;
use crate::state::AppState;

/// Reads and verifies the session cookie. No storage access.
pub(crate) fn session_role_id(state: &AppState, req: &Request) -> Result<RoleId, AppError> {
    let jar = CookieJar::from_headers(req.headers());
    let token = jar.get(&state.cookie_config.name).map(|c| c.value());
    AuthService::verify_session(token, &state.jwt_config)
}

/// Rejects requests without a live session.
///
/// - No session cookie: 401 "no token provided"
/// - Bad signature, expired, malformed or subject-less token: 401 "invalid token"
/// - Subject names a record that no longer exists: 401 "invalid token"
/// - Storage failure: 500
///
/// On success the resolved [`AuthenticatedRole`] is stored in the request
/// extensions for [`CurrentRole`].
pub async fn require_authentication(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let role_id = session_role_id(&state, &req)?;

    let record = state.store.find_by_id(role_id).await?.ok_or_else(|| {
        tracing::warn!(role_id = %role_id, "Session names a role that no longer exists");
        AppError::unauthorized(tavern_auth::INVALID_TOKEN)
    })?;

    req.extensions_mut().insert(AuthenticatedRole::from(record));
    Ok(next.run(req).await)
}

/// The role a guarded request runs as.
///
/// Only available behind [`require_authentication`] or a permission guard;
/// elsewhere it rejects with 401.
#[derive(Debug, Clone)]
pub struct CurrentRole(pub AuthenticatedRole);

impl<S> FromRequestParts<S> for CurrentRole
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedRole>()
            .cloned()
            .map(CurrentRole)
            .ok_or_else(|| AppError::unauthorized("not authenticated"))
    }
}
