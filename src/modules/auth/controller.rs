use axum::Json;
use axum::extract::State;
use axum_extra::extract::CookieJar;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;

use tavern_core::AppError;
use tavern_models::{AuthenticatedRole, LoginRequest, LoginResponse, MessageResponse, SessionStatus};

use super::cookie::{removal_cookie, session_cookie};
use super::service::AuthService;
use crate::middleware::auth::CurrentRole;
use crate::state::AppState;
use crate::validator::JsonBodyOrDefault;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Log in as a role and receive a session cookie
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, session cookie set", body = LoginResponse),
        (status = 400, description = "Role name or password missing", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 404, description = "Role not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBodyOrDefault(dto): JsonBodyOrDefault<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let session = match AuthService::authenticate(
        state.store.as_ref(),
        state.verifier.as_ref(),
        &state.jwt_config,
        &dto,
    )
    .await
    {
        Ok(session) => session,
        Err(e) => {
            warn!(role_name = ?dto.role_name, status = %e.status.as_u16(), "Login rejected");
            return Err(e);
        }
    };

    info!(role_id = %session.record.id, role_name = %session.record.role_name, "Login succeeded");

    let cookie = session_cookie(
        &state.cookie_config,
        session.token,
        state.jwt_config.session_expiry,
    );

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            id: session.record.id,
            role_name: session.record.role_name,
        }),
    ))
}

/// Clear the session cookie
///
/// The token itself is not revoked; a copy of it stays valid until it expires.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Session cookie cleared", body = MessageResponse)
    ),
    tag = "Authentication"
)]
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    (
        jar.add(removal_cookie(&state.cookie_config)),
        Json(MessageResponse::new("logged out")),
    )
}

/// Report whether the request carries a valid session
#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "Session status", body = SessionStatus),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
pub async fn check_session(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<SessionStatus>, AppError> {
    let token = jar.get(&state.cookie_config.name).map(|c| c.value());
    let authenticated =
        AuthService::is_authenticated(state.store.as_ref(), &state.jwt_config, token).await?;

    Ok(Json(SessionStatus { authenticated }))
}

/// The role the current session is logged in as
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current role", body = AuthenticatedRole),
        (status = 401, description = "No valid session", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("session_cookie" = []))
)]
pub async fn current_role(CurrentRole(role): CurrentRole) -> Json<AuthenticatedRole> {
    Json(role)
}
