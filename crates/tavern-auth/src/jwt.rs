//! Session token signing and verification.
//!
//! Tokens are HS256 JWTs signed with [`JwtConfig::secret`]. Nothing is stored
//! server-side: a token is valid as long as its signature verifies and the
//! current time is before `exp`. Both operations come in two flavours, one
//! reading the system clock and an `_at` variant taking the current Unix time
//! explicitly.
//!
//! # Example
//!
//! ```ignore
//! use tavern_auth::{create_session_token, verify_session_token};
//! use tavern_config::JwtConfig;
//!
//! let config = JwtConfig::new("secret");
//! let token = create_session_token(&record.id.to_string(), &config)?;
//! let claims = verify_session_token(&token, &config)?;
//! assert_eq!(claims.subject(), Some(record.id.to_string().as_str()));
//! ```

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use tavern_config::JwtConfig;
use tavern_core::AppError;

use crate::claims::SessionClaims;

pub const INVALID_TOKEN: &str = "invalid token";

/// Creates a session token for `subject`, issued now.
pub fn create_session_token(subject: &str, jwt_config: &JwtConfig) -> Result<String, AppError> {
    create_session_token_at(subject, jwt_config, Utc::now().timestamp())
}

/// Creates a session token for `subject`, issued at `issued_at` (Unix seconds).
///
/// # Errors
///
/// Returns an internal error if encoding fails.
pub fn create_session_token_at(
    subject: &str,
    jwt_config: &JwtConfig,
    issued_at: i64,
) -> Result<String, AppError> {
    let claims = SessionClaims::new(subject, issued_at, jwt_config.session_expiry);
    encode_claims(&claims, jwt_config)
}

/// Signs arbitrary session claims.
pub fn encode_claims(claims: &SessionClaims, jwt_config: &JwtConfig) -> Result<String, AppError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

/// Verifies a session token against the system clock.
pub fn verify_session_token(token: &str, jwt_config: &JwtConfig) -> Result<SessionClaims, AppError> {
    verify_session_token_at(token, jwt_config, Utc::now().timestamp())
}

/// Verifies a session token as of `now` (Unix seconds).
///
/// # Errors
///
/// Returns an unauthorized error with the message [`INVALID_TOKEN`] if:
/// - The token is malformed
/// - The signature does not verify against the secret
/// - The `exp` claim is missing or `now >= exp`
///
/// A missing subject is *not* checked here; see [`SessionClaims::subject`].
pub fn verify_session_token_at(
    token: &str,
    jwt_config: &JwtConfig,
    now: i64,
) -> Result<SessionClaims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    // Expiry is checked below against `now`, with no leeway.
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp"]);

    let claims = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized(INVALID_TOKEN))?;

    if claims.is_expired_at(now) {
        return Err(AppError::unauthorized(INVALID_TOKEN));
    }

    Ok(claims)
}
