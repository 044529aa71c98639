//! Session Issuer: login, logout and session status.
//!
//! A successful login sets an `HttpOnly` cookie holding a signed session token
//! that names the Credential Record. Logout only clears the cookie.

pub mod controller;
pub mod cookie;
pub mod router;
pub mod service;
