//! # Tavern Core
//!
//! Core types shared by every Tavern crate:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`permissions`]: Permission names and the catalog shown to the dashboard
//! - [`credentials`]: Pluggable password verification strategies
//!
//! # Example
//!
//! ```ignore
//! use tavern_core::{AppError, CredentialVerifier, PlaintextVerifier};
//!
//! let verifier = PlaintextVerifier;
//! if !verifier.verify(&candidate, &record.password) {
//!     return Err(AppError::unauthorized("invalid credentials"));
//! }
//! ```

pub mod credentials;
pub mod errors;
pub mod permissions;

// Re-export commonly used types at crate root
pub use credentials::{BcryptVerifier, CredentialVerifier, PlaintextVerifier};
pub use errors::AppError;
pub use permissions::PermissionInfo;
