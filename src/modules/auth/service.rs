use tracing::instrument;

use tavern_auth::{INVALID_TOKEN, create_session_token, verify_session_token};
use tavern_config::JwtConfig;
use tavern_core::{AppError, CredentialVerifier};
use tavern_db::CredentialStore;
use tavern_models::{CredentialRecord, LoginRequest, RoleId};

pub const NO_TOKEN_PROVIDED: &str = "no token provided";
pub const CREDENTIALS_REQUIRED: &str = "role and password required";
pub const ROLE_NOT_FOUND: &str = "role not found";
pub const INVALID_CREDENTIALS: &str = "invalid credentials";

/// A freshly issued session: the record it names and the signed token.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub record: CredentialRecord,
    pub token: String,
}

pub struct AuthService;

impl AuthService {
    /// Validates a role+password pair and signs a session token for it.
    ///
    /// Fields are checked before the lookup, so a request missing the
    /// password is a 400 even for an unknown role.
    #[instrument(skip_all, fields(role_name = ?dto.role_name))]
    pub async fn authenticate(
        store: &dyn CredentialStore,
        verifier: &dyn CredentialVerifier,
        jwt_config: &JwtConfig,
        dto: &LoginRequest,
    ) -> Result<IssuedSession, AppError> {
        let (role_name, password) = dto
            .credentials()
            .ok_or_else(|| AppError::bad_request(anyhow::anyhow!(CREDENTIALS_REQUIRED)))?;

        let record = store
            .find_by_role_name(role_name)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!(ROLE_NOT_FOUND)))?;

        if !verifier.verify(password, &record.password) {
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let token = create_session_token(&record.id.to_string(), jwt_config)?;

        Ok(IssuedSession { record, token })
    }

    /// Verifies a session token and returns the record ID it names.
    ///
    /// Does not touch storage. Every failure is a 401: no token is
    /// "no token provided", anything else is "invalid token".
    pub fn verify_session(token: Option<&str>, jwt_config: &JwtConfig) -> Result<RoleId, AppError> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::unauthorized(NO_TOKEN_PROVIDED))?;

        let claims = verify_session_token(token, jwt_config)?;

        claims
            .subject()
            .and_then(|sub| sub.parse::<RoleId>().ok())
            .ok_or_else(|| AppError::unauthorized(INVALID_TOKEN))
    }

    /// Whether `token` is a live session naming an existing record.
    ///
    /// Token failures and deleted records are `false`; storage errors propagate.
    pub async fn is_authenticated(
        store: &dyn CredentialStore,
        jwt_config: &JwtConfig,
        token: Option<&str>,
    ) -> Result<bool, AppError> {
        let Ok(role_id) = Self::verify_session(token, jwt_config) else {
            return Ok(false);
        };

        Ok(store.find_by_id(role_id).await?.is_some())
    }
}
