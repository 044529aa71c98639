//! Access Guard.
//!
//! Two checks run in front of protected routes:
//!
//! - [`auth::require_authentication`]: the request carries a valid session
//!   cookie naming an existing Credential Record
//! - [`permission::require_permission`]: the session's record holds a named
//!   permission
//!
//! Both resolve the record once and hand it to the handler through the
//! [`auth::CurrentRole`] extractor.
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, middleware, routing::get};
//! use crate::middleware::permission::require_manage_roles;
//!
//! let roles = Router::new()
//!     .route("/", get(controller::get_roles))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_manage_roles));
//! ```

pub mod auth;
pub mod permission;
