//! # Tavern Auth
//!
//! Session token types and JWT utilities for the Tavern API.
//!
//! - [`claims`]: The [`SessionClaims`] carried by a session token
//! - [`jwt`]: Token creation and verification
//! - [`verifier`]: Credential verifier selection from configuration
//!
//! A session token is an HS256 JWT naming one Credential Record. It lives in
//! an `HttpOnly` cookie for one day and is never stored server-side, so
//! logging out only clears the cookie: a copied token stays valid until it
//! expires.

pub mod claims;
pub mod jwt;
pub mod verifier;

// Re-export commonly used types at crate root
pub use claims::SessionClaims;
pub use jwt::{
    INVALID_TOKEN, create_session_token, create_session_token_at, encode_claims,
    verify_session_token, verify_session_token_at,
};
pub use verifier::verifier_for;
