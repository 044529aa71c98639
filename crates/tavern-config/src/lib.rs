//! # Tavern Config
//!
//! Configuration types for the Tavern API, loaded from environment variables:
//!
//! - [`environment`]: Development vs production (`APP_ENV`)
//! - [`jwt`]: Session token signing secret and lifetime
//! - [`cookie`]: Session cookie name and security attributes
//! - [`cors`]: Allowed dashboard origins
//! - [`database`]: Credential store backend
//! - [`password`]: Credential verification scheme
//!
//! # Example
//!
//! ```ignore
//! use tavern_config::{AppEnvironment, CookieConfig, JwtConfig};
//!
//! let environment = AppEnvironment::from_env()?;
//! let jwt_config = JwtConfig::from_env(environment)?;
//! let cookie_config = CookieConfig::from_env(environment);
//! ```

pub mod cookie;
pub mod cors;
pub mod database;
pub mod environment;
pub mod jwt;
pub mod password;

// Re-export commonly used types at crate root
pub use cookie::{CookieConfig, SameSitePolicy};
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use environment::AppEnvironment;
pub use jwt::JwtConfig;
pub use password::{PasswordConfig, PasswordScheme};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}
