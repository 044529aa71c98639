//! # Tavern API
//!
//! Admin backend for a restaurant and bar, built with Axum and MongoDB.
//!
//! The dashboard logs in as a *role* (a Credential Record holding a role name,
//! a password and a set of permissions), not as a person. This crate holds
//! the HTTP surface around that:
//!
//! - **Session Issuer** ([`modules::auth`]): checks a role+password pair and
//!   sets a one-day session token in an `HttpOnly` cookie
//! - **Access Guard** ([`middleware`]): per-request checks that the session is
//!   valid and that its role holds a named permission
//! - **Role administration** ([`modules::roles`]): CRUD over Credential
//!   Records for roles holding `ManageRoles`
//!
//! ## Request lifecycle
//!
//! ```text
//! Unauthenticated ──(valid session cookie)──▶ Authenticated ──(permission held)──▶ Authorized
//!        │                                          │
//!        ▼                                          ▼
//!  401 Unauthorized                            403 Forbidden
//! ```
//!
//! Nothing is kept between requests except the Credential Records themselves.
//! Logging out clears the cookie but does not revoke the token.
//!
//! ## Environment Variables
//!
//! ```bash
//! APP_ENV=production
//! JWT_SECRET=your-secure-secret-key
//! DATABASE_BACKEND=mongodb
//! MONGODB_URI=mongodb://localhost:27017
//! MONGODB_DATABASE=tavern
//! PASSWORD_SCHEME=plaintext
//! ALLOWED_ORIGINS=https://admin.tavern.example
//! PORT=3000
//! ```
//!
//! The first `ManageRoles` role is created with the CLI:
//!
//! ```bash
//! cargo run --bin tavern-cli -- create-role --role-name admin --permissions ManageRoles
//! ```
//!
//! Swagger UI is served at `/swagger-ui`.

pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use tavern_auth;
pub use tavern_config;
pub use tavern_core;
pub use tavern_db;
pub use tavern_models;
